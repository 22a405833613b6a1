//! Markdown normalization ahead of segmentation.
//!
//! Hand-written Markdown is sloppy about spacing: `#Title`, `*   item`, headings
//! glued to the paragraph above, long runs of blank lines. [`preprocess`] rewrites
//! those into the shape the segmenter expects. The transform is total and
//! idempotent: `preprocess(&preprocess(s)) == preprocess(s)` for every `s`.

use super::parser::{heading_parts, is_blank, split_lines};

/// Highest heading level whose marker spacing gets normalized.
const MAX_HEADING_MARKERS: usize = 6;

/// Normalizes raw Markdown text.
///
/// - `#Title` / `##   Title` become `# Title` / `## Title` (runs of 1 to 6 `#`).
/// - Headings are surrounded by blank lines.
/// - `*   item` becomes `* item`, keeping the indentation before the marker.
/// - Consecutive blank lines collapse into one.
/// - Leading and trailing whitespace of the whole text is trimmed.
pub fn preprocess(source: &str) -> String {
    let lines: Vec<String> = split_lines(source.trim()).map(normalize_line).collect();
    let padded = pad_headings(lines);
    collapse_blank_runs(padded).join("\n").trim().to_string()
}

fn normalize_line(line: &str) -> String {
    if is_blank(line) {
        return String::new();
    }
    if let Some(heading) = normalize_heading_marker(line) {
        return heading;
    }
    if let Some(bullet) = normalize_bullet_marker(line) {
        return bullet;
    }
    line.to_string()
}

fn normalize_heading_marker(line: &str) -> Option<String> {
    let hashes = line.bytes().take_while(|b| *b == b'#').count();
    if hashes == 0 || hashes > MAX_HEADING_MARKERS {
        return None;
    }
    let text = line[hashes..].trim_start();
    if text.is_empty() {
        return None;
    }
    Some(format!("{} {}", &line[..hashes], text))
}

// Only collapses existing spacing: inserting a space after a bare `*` would turn
// `*emphasis*` at line start into a bullet.
fn normalize_bullet_marker(line: &str) -> Option<String> {
    let leading = line
        .bytes()
        .take_while(|b| *b == b' ' || *b == b'\t')
        .count();
    let after_marker = line[leading..].strip_prefix('*')?;
    if !after_marker.starts_with(char::is_whitespace) {
        return None;
    }
    let text = after_marker.trim_start();
    if text.is_empty() {
        return None;
    }
    Some(format!("{}* {}", &line[..leading], text))
}

fn pad_headings(lines: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut iter = lines.into_iter().peekable();

    while let Some(line) = iter.next() {
        if heading_parts(&line).is_none() {
            out.push(line);
            continue;
        }
        if out.last().is_some_and(|prev| !prev.is_empty()) {
            out.push(String::new());
        }
        out.push(line);
        if iter.peek().is_some_and(|next| !next.is_empty()) {
            out.push(String::new());
        }
    }

    out
}

fn collapse_blank_runs(lines: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    for line in lines {
        if line.is_empty() && out.last().is_some_and(|prev| prev.is_empty()) {
            continue;
        }
        out.push(line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn inserts_missing_heading_space() {
        assert_eq!(preprocess("#Title"), "# Title");
        assert_eq!(preprocess("###Deep"), "### Deep");
    }

    #[test]
    fn collapses_heading_spacing() {
        assert_eq!(preprocess("##    Spaced"), "## Spaced");
    }

    #[test]
    fn leaves_overlong_heading_markers_alone() {
        assert_eq!(preprocess("#######NoSpace"), "#######NoSpace");
    }

    #[test]
    fn pads_headings_with_blank_lines() {
        assert_eq!(
            preprocess("intro\n# Title\nbody"),
            "intro\n\n# Title\n\nbody"
        );
    }

    #[test]
    fn consecutive_headings_get_one_blank_between() {
        assert_eq!(preprocess("# One\n## Two"), "# One\n\n## Two");
    }

    #[test]
    fn collapses_bullet_spacing() {
        assert_eq!(preprocess("*   item\n  *\tnested"), "* item\n  * nested");
    }

    #[test]
    fn does_not_turn_emphasis_into_bullets() {
        assert_eq!(preprocess("*emphasis* here"), "*emphasis* here");
        assert_eq!(preprocess("**bold** start"), "**bold** start");
    }

    #[test]
    fn collapses_blank_runs() {
        assert_eq!(preprocess("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(preprocess("a\n   \n\t\nb"), "a\n\nb");
    }

    #[test]
    fn trims_whole_text() {
        assert_eq!(preprocess("\n\n  hello  \n\n"), "hello");
    }

    #[test]
    fn keeps_bullet_indentation() {
        assert_eq!(preprocess("* a\n    * b"), "* a\n    * b");
    }

    #[test]
    fn strips_every_carriage_return_before_newline() {
        assert_eq!(preprocess("(\r\r\n["), "(\n[");
        assert_eq!(preprocess("a\r\n\r\n\r\nb"), "a\n\nb");
    }

    proptest! {
        #[test]
        fn preprocess_is_idempotent(source in "[#* \t\r\nab`\\[\\]()]{0,64}") {
            let once = preprocess(&source);
            let twice = preprocess(&once);
            prop_assert_eq!(once, twice);
        }
    }
}
