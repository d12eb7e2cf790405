use super::model::{ChatPrompt, Section};

/// Prompt asking for a short bullet-point summary of one paper section.
pub fn section_summary_prompt(section: &Section) -> ChatPrompt {
    ChatPrompt::new(format!(
        r#"You are given one section of a larger arXiv paper, written in Markdown. Write a summary of this section.
The headers this section sits under are:
"{}"
The content of the section is:
"{}"
Format the summary as a Markdown bullet point list with at least 2 and at most 5 bullet points.
SUMMARY:"#,
        section.headers_json(),
        section.content
    ))
}

/// Prompt asking to merge per-section summaries into one paper summary.
pub fn final_summary_prompt(section_summaries: &str) -> ChatPrompt {
    ChatPrompt::new(format!(
        r#"You are given a collection of text snippets. Each snippet summarizes one section of an academic paper published on arXiv. Combine the snippets into a coherent, concise summary of the whole paper.

DOCUMENT SNIPPETS:
"{}"

INSTRUCTIONS: Write a concise summary that captures the essence of the paper based on the snippets.
Highlight the key contributions of the paper and list 3 key takeaways.
Finish with a list of 5 questions you would ask the authors if you had the chance.
SUMMARY:"#,
        section_summaries
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::summary::model::{Heading, HeadingLevel};

    #[test]
    fn should_embed_headers_and_content_in_section_prompt() {
        let section = Section {
            headers: vec![Heading {
                level: HeadingLevel::H2,
                title: "Results".to_string(),
            }],
            content: "BLEU improves by 2 points.".to_string(),
        };

        let prompt = section_summary_prompt(&section);

        assert!(prompt.user.contains(r#"{"Header 2": "Results"}"#));
        assert!(prompt.user.contains("BLEU improves by 2 points."));
        assert!(prompt.user.contains("at least 2 and at most 5"));
    }

    #[test]
    fn should_embed_snippets_in_final_prompt() {
        let prompt = final_summary_prompt("- point one\n- point two");

        assert!(prompt.user.contains("- point one\n- point two"));
        assert!(prompt.user.contains("3 key takeaways"));
        assert!(prompt.user.contains("5 questions"));
    }
}
