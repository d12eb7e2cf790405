use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use super::errors::PaperError;

const ARXIV_HOSTS: [&str; 3] = ["arxiv.org", "www.arxiv.org", "export.arxiv.org"];
const ARXIV_PATH_PATTERN: &str = r"^/(?:abs|pdf)/(?P<id>(?:\d{4}\.\d{4,5}|[a-z][a-z\-]*(?:\.[A-Z]{2})?/\d{7})(?:v\d+)?)(?:\.pdf)?/?$";

static ARXIV_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(ARXIV_PATH_PATTERN).expect("Invalid arXiv path regex"));

/// Normalizes a user-provided paper link into a URL that serves the PDF itself.
///
/// arXiv abstract pages and extension-less PDF links are rewritten to the
/// canonical `https://arxiv.org/pdf/<id>.pdf`. Any other http(s) URL is kept.
pub fn normalize_pdf_link(raw: &str) -> Result<String, PaperError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PaperError::NoInput);
    }

    let url = Url::parse(trimmed).map_err(|_| PaperError::InvalidLink)?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(PaperError::InvalidLink);
    }

    let is_arxiv = url
        .host_str()
        .is_some_and(|host| ARXIV_HOSTS.contains(&host));
    if is_arxiv && let Some(id) = arxiv_id(url.path()) {
        return Ok(format!("https://arxiv.org/pdf/{}.pdf", id));
    }

    Ok(url.to_string())
}

fn arxiv_id(path: &str) -> Option<String> {
    ARXIV_PATH
        .captures(path)
        .and_then(|caps| caps.name("id"))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_compile_arxiv_path_pattern() {
        assert!(ARXIV_PATH.is_match("/abs/2308.11417v2"));
    }

    #[test]
    fn should_keep_canonical_arxiv_pdf_link() {
        let link = normalize_pdf_link("https://arxiv.org/pdf/2308.11417.pdf").unwrap();
        assert_eq!(link, "https://arxiv.org/pdf/2308.11417.pdf");
    }

    #[test]
    fn should_rewrite_abstract_page_to_pdf() {
        let link = normalize_pdf_link("https://arxiv.org/abs/2308.11417").unwrap();
        assert_eq!(link, "https://arxiv.org/pdf/2308.11417.pdf");
    }

    #[test]
    fn should_append_extension_and_keep_version() {
        let link = normalize_pdf_link("http://www.arxiv.org/pdf/2308.11417v2").unwrap();
        assert_eq!(link, "https://arxiv.org/pdf/2308.11417v2.pdf");
    }

    #[test]
    fn should_rewrite_old_style_identifiers() {
        let link = normalize_pdf_link("https://arxiv.org/abs/hep-th/9901001").unwrap();
        assert_eq!(link, "https://arxiv.org/pdf/hep-th/9901001.pdf");
    }

    #[test]
    fn should_trim_surrounding_whitespace() {
        let link = normalize_pdf_link("  https://arxiv.org/abs/2308.11417 \n").unwrap();
        assert_eq!(link, "https://arxiv.org/pdf/2308.11417.pdf");
    }

    #[test]
    fn should_pass_through_non_arxiv_links() {
        let link = normalize_pdf_link("https://example.com/papers/attention.pdf").unwrap();
        assert_eq!(link, "https://example.com/papers/attention.pdf");
    }

    #[test]
    fn should_pass_through_unrecognized_arxiv_paths() {
        let link = normalize_pdf_link("https://arxiv.org/list/cs.CL/recent").unwrap();
        assert_eq!(link, "https://arxiv.org/list/cs.CL/recent");
    }

    #[test]
    fn should_reject_empty_input() {
        assert!(matches!(normalize_pdf_link(""), Err(PaperError::NoInput)));
        assert!(matches!(normalize_pdf_link("   "), Err(PaperError::NoInput)));
    }

    #[test]
    fn should_reject_unparsable_link() {
        assert!(matches!(
            normalize_pdf_link("arxiv 2308.11417"),
            Err(PaperError::InvalidLink)
        ));
    }

    #[test]
    fn should_reject_non_http_schemes() {
        assert!(matches!(
            normalize_pdf_link("file:///etc/passwd"),
            Err(PaperError::InvalidLink)
        ));
        assert!(matches!(
            normalize_pdf_link("ftp://arxiv.org/pdf/2308.11417.pdf"),
            Err(PaperError::InvalidLink)
        ));
    }
}
