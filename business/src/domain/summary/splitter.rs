//! Header-based Markdown splitting.
//!
//! Splits a document into [`Section`]s on `#`, `##` and `###` headers. Header
//! lines are dropped from the content and kept as metadata instead, so each
//! section can be summarized with the headers it belongs to.

use super::model::{Heading, HeadingLevel, Section};

const BACKTICK_FENCE: &str = "```";
const TILDE_FENCE: &str = "~~~";

/// Splits `markdown` into sections keyed by their open headers.
///
/// Adjacent blocks sharing the same headers are merged with `"  \n"`.
/// Blank lines end a block. Lines inside fenced code blocks are never
/// treated as headers.
pub fn split_by_headers(markdown: &str) -> Vec<Section> {
    let mut blocks: Vec<Section> = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut open: Vec<Heading> = Vec::new();
    let mut fence: Option<&'static str> = None;

    for raw in markdown.lines() {
        let line: String = raw.trim().chars().filter(|c| !c.is_control()).collect();

        match fence {
            None => {
                if line.starts_with(BACKTICK_FENCE) && line.matches(BACKTICK_FENCE).count() == 1 {
                    fence = Some(BACKTICK_FENCE);
                } else if line.starts_with(TILDE_FENCE) {
                    fence = Some(TILDE_FENCE);
                }
            }
            Some(marker) => {
                if line.starts_with(marker) {
                    fence = None;
                }
            }
        }

        if fence.is_some() {
            current.push(line);
            continue;
        }

        if let Some(heading) = parse_heading(&line) {
            flush(&mut blocks, &mut current, &open);
            open.retain(|h| h.level < heading.level);
            open.push(heading);
            continue;
        }

        if line.is_empty() {
            flush(&mut blocks, &mut current, &open);
        } else {
            current.push(line);
        }
    }
    flush(&mut blocks, &mut current, &open);

    merge_adjacent(blocks)
}

fn parse_heading(line: &str) -> Option<Heading> {
    HeadingLevel::ALL.iter().rev().find_map(|level| {
        let rest = line.strip_prefix(level.marker())?;
        if rest.is_empty() || rest.starts_with(' ') {
            Some(Heading {
                level: *level,
                title: rest.trim().to_string(),
            })
        } else {
            None
        }
    })
}

fn flush(blocks: &mut Vec<Section>, current: &mut Vec<String>, open: &[Heading]) {
    if current.is_empty() {
        return;
    }
    blocks.push(Section {
        headers: open.to_vec(),
        content: current.join("\n"),
    });
    current.clear();
}

fn merge_adjacent(blocks: Vec<Section>) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::with_capacity(blocks.len());
    for block in blocks {
        match sections.last_mut() {
            Some(last) if last.headers == block.headers => {
                last.content.push_str("  \n");
                last.content.push_str(&block.content);
            }
            _ => sections.push(block),
        }
    }
    sections
}
