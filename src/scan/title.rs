//! Title extraction and filename ordering helpers.

use regex::Regex;
use std::sync::LazyLock;

/// First line matching a level-1 heading marker.
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#\s+(.+)$").expect("heading regex"));

/// Leading `NN-` ordering prefix on a file stem.
static PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+-").expect("prefix regex"));

/// Extract the document title from its content.
///
/// Takes the first level-1 heading, with leading decorative symbols (emoji)
/// and surrounding whitespace stripped. Returns `None` when no usable
/// heading exists.
pub fn extract_title(content: &str) -> Option<String> {
    let raw = HEADING_RE.captures(content)?.get(1)?.as_str();

    // Emoji are neither alphanumeric nor ASCII punctuation; regular title
    // characters (including quotes and parens) survive the strip.
    let title = raw
        .trim_start_matches(|c: char| !c.is_alphanumeric() && !c.is_ascii_punctuation())
        .trim();

    (!title.is_empty()).then(|| title.to_string())
}

/// Derive a title from the file name: extension and numeric ordering
/// prefix stripped.
pub fn fallback_title(file_name: &str) -> String {
    let stem = file_name
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(file_name);
    PREFIX_RE.replace(stem, "").into_owned()
}

/// Leading numeric prefix of a file name, used for intra-category ordering.
/// Files without a prefix sort as 0.
pub fn numeric_prefix(file_name: &str) -> u64 {
    let end = file_name
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(file_name.len());
    let digits = &file_name[..end];
    if digits.is_empty() {
        0
    } else {
        digits.parse().unwrap_or(u64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_title_first_heading() {
        let content = "some preamble\n# The Title\n## Subsection\n# Another";
        assert_eq!(extract_title(content), Some("The Title".to_string()));
    }

    #[test]
    fn test_extract_title_strips_emoji() {
        assert_eq!(
            extract_title("# 🚀 Deploy Guide"),
            Some("Deploy Guide".to_string())
        );
        // Punctuation-led titles survive
        assert_eq!(
            extract_title("# \"Quoted\" Title"),
            Some("\"Quoted\" Title".to_string())
        );
    }

    #[test]
    fn test_extract_title_ignores_deeper_headings() {
        assert_eq!(extract_title("## Not a title\n### Nor this"), None);
    }

    #[test]
    fn test_extract_title_empty_after_strip() {
        assert_eq!(extract_title("# 🚀"), None);
        assert_eq!(extract_title(""), None);
    }

    #[test]
    fn test_fallback_title() {
        assert_eq!(fallback_title("01-getting-started.md"), "getting-started");
        assert_eq!(fallback_title("notes.md"), "notes");
        assert_eq!(fallback_title("noext"), "noext");
    }

    #[test]
    fn test_numeric_prefix() {
        assert_eq!(numeric_prefix("01-intro.md"), 1);
        assert_eq!(numeric_prefix("10-late.md"), 10);
        assert_eq!(numeric_prefix("intro.md"), 0);
        assert_eq!(numeric_prefix(""), 0);
    }

    #[test]
    fn test_numeric_prefix_huge_number_sorts_last() {
        assert_eq!(numeric_prefix("99999999999999999999999-x.md"), u64::MAX);
    }
}
