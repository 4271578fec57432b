//! Ranking and publishing: renders the freshest-N listing and splices it
//! into the marker-delimited section of the target file.

use crate::{config::DocsConfig, debug, store::TrackedRecord};
use anyhow::{Context, Result, bail};
use std::fs;

/// Select the freshest records.
///
/// Orders by effective mtime descending; ties break by link ascending.
pub fn rank<'a>(records: &'a [TrackedRecord], max: usize) -> Vec<&'a TrackedRecord> {
    let mut ranked: Vec<&TrackedRecord> = records.iter().collect();
    ranked.sort_by(|a, b| b.mtime.cmp(&a.mtime).then_with(|| a.link.cmp(&b.link)));
    ranked.truncate(max);
    ranked
}

/// Render the listing block: one list line per entry, title linked to the
/// document, category label appended. Zero entries render the placeholder
/// line so the section never looks ambiguously empty.
pub fn render_listing(entries: &[&TrackedRecord], empty_text: &str) -> String {
    if entries.is_empty() {
        return format!("- {empty_text}");
    }

    entries
        .iter()
        .map(|r| format!("- [**{}**]({}) - {}", r.title, r.link, r.category))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Replace the span between the begin and end marker lines with `block`.
///
/// Markers match whole lines (trailing whitespace ignored); the end marker
/// must follow the begin marker. Everything outside the span is preserved
/// byte for byte. Missing markers are an error: a malformed target cannot
/// be patched safely.
pub fn splice_section(content: &str, begin: &str, end: &str, block: &str) -> Result<String> {
    let Some((_, begin_text_end, begin_line_end)) = find_marker_line(content, begin, 0) else {
        bail!("begin marker `{begin}` not found");
    };

    let Some((end_start, _, _)) = find_marker_line(content, end, begin_line_end) else {
        bail!("end marker `{end}` not found after begin marker");
    };

    let mut result = String::with_capacity(content.len() + block.len());
    result.push_str(&content[..begin_text_end]);
    result.push_str("\n\n");
    result.push_str(block);
    result.push_str("\n\n");
    result.push_str(&content[end_start..]);
    Ok(result)
}

/// Find a line equal to `marker` (trailing whitespace ignored) at or after
/// byte offset `from`. Returns (line start, end of marker text, end of line
/// including its newline).
fn find_marker_line(content: &str, marker: &str, from: usize) -> Option<(usize, usize, usize)> {
    let mut offset = from;
    for line in content[from..].split_inclusive('\n') {
        let text = line.trim_end_matches('\n').trim_end_matches('\r');
        if text.trim_end() == marker {
            return Some((offset, offset + text.trim_end().len(), offset + line.len()));
        }
        offset += line.len();
    }
    None
}

/// Publish the ranked listing into the configured target file.
pub fn publish_listing(config: &DocsConfig, records: &[TrackedRecord]) -> Result<()> {
    let target = &config.listing.target;

    let content = fs::read_to_string(target)
        .with_context(|| format!("reading listing target {}", target.display()))?;

    let ranked = rank(records, config.listing.max);
    let block = render_listing(&ranked, &config.listing.empty_text);

    let updated = splice_section(
        &content,
        &config.listing.begin_marker,
        &config.listing.end_marker,
        &block,
    )
    .with_context(|| format!("patching listing target {}", target.display()))?;

    if updated == content {
        debug!("publish"; "{} unchanged", target.display());
        return Ok(());
    }

    fs::write(target, updated)
        .with_context(|| format!("writing listing target {}", target.display()))?;

    debug!("publish"; "listed {} of {} articles", ranked.len(), records.len());
    Ok(())
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn record(link: &str, mtime: u64) -> TrackedRecord {
        TrackedRecord {
            title: format!("Title {link}"),
            link: link.to_string(),
            category: "Java".to_string(),
            mtime,
        }
    }

    #[test]
    fn test_rank_top_n_descending() {
        let records: Vec<TrackedRecord> =
            (0..10).map(|i| record(&format!("/a/{i:02}.md"), i * 100)).collect();

        let ranked = rank(&records, 6);

        assert_eq!(ranked.len(), 6);
        assert_eq!(ranked[0].mtime, 900);
        assert_eq!(ranked[5].mtime, 400);
        assert!(ranked.windows(2).all(|w| w[0].mtime >= w[1].mtime));
    }

    #[test]
    fn test_rank_tie_break_by_link() {
        let records = vec![
            record("/b/post.md", 500),
            record("/a/post.md", 500),
            record("/c/post.md", 500),
        ];

        let ranked = rank(&records, 3);
        let links: Vec<&str> = ranked.iter().map(|r| r.link.as_str()).collect();

        assert_eq!(links, vec!["/a/post.md", "/b/post.md", "/c/post.md"]);
    }

    #[test]
    fn test_rank_fewer_records_than_max() {
        let records = vec![record("/a/x.md", 1)];
        assert_eq!(rank(&records, 6).len(), 1);
    }

    #[test]
    fn test_render_listing_lines() {
        let a = record("/java/01-a.md", 1);
        let b = record("/java/02-b.md", 2);
        let block = render_listing(&[&a, &b], "No articles yet");

        assert_eq!(
            block,
            "- [**Title /java/01-a.md**](/java/01-a.md) - Java\n\
             - [**Title /java/02-b.md**](/java/02-b.md) - Java"
        );
    }

    #[test]
    fn test_render_listing_empty_placeholder() {
        let block = render_listing(&[], "No articles yet");
        assert_eq!(block, "- No articles yet");
    }

    #[test]
    fn test_splice_replaces_span_exactly() {
        let content = "## Section A\n<old content>\n## Section B\n<rest>";
        let result = splice_section(content, "## Section A", "## Section B", "<new content>");

        assert_eq!(
            result.unwrap(),
            "## Section A\n\n<new content>\n\n## Section B\n<rest>"
        );
    }

    #[test]
    fn test_splice_preserves_surrounding_bytes() {
        let content = "intro\n\n## Begin\nstale line\nmore stale\n## End\ntrailing\ntext\n";
        let result = splice_section(content, "## Begin", "## End", "- fresh").unwrap();

        assert_eq!(result, "intro\n\n## Begin\n\n- fresh\n\n## End\ntrailing\ntext\n");
    }

    #[test]
    fn test_splice_missing_begin_marker_fails() {
        let result = splice_section("## Other\n## End\n", "## Begin", "## End", "x");
        assert!(result.is_err());
    }

    #[test]
    fn test_splice_missing_end_marker_fails() {
        let result = splice_section("## Begin\ncontent\n", "## Begin", "## End", "x");
        assert!(result.is_err());
    }

    #[test]
    fn test_splice_end_marker_must_follow_begin() {
        let result = splice_section("## End\n## Begin\n", "## Begin", "## End", "x");
        assert!(result.is_err());
    }

    #[test]
    fn test_splice_marker_trailing_whitespace_ignored() {
        let content = "## Begin  \nold\n## End\n";
        let result = splice_section(content, "## Begin", "## End", "new").unwrap();
        assert_eq!(result, "## Begin\n\nnew\n\n## End\n");
    }

    #[test]
    fn test_publish_listing_missing_target_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = DocsConfig::default();
        config.listing.target = tmp.path().join("absent.md");

        assert!(publish_listing(&config, &[]).is_err());
    }

    #[test]
    fn test_publish_listing_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("index.md");
        fs::write(&target, "# Home\n\n## Latest Articles\nstale\n## Categories\nrest\n").unwrap();

        let mut config = DocsConfig::default();
        config.listing.target = target.clone();

        let records = vec![record("/java/01-a.md", 100)];
        publish_listing(&config, &records).unwrap();

        let updated = fs::read_to_string(&target).unwrap();
        assert!(updated.contains("- [**Title /java/01-a.md**](/java/01-a.md) - Java"));
        assert!(updated.starts_with("# Home\n\n## Latest Articles\n"));
        assert!(updated.ends_with("## Categories\nrest\n"));
        assert!(!updated.contains("stale"));
    }
}
