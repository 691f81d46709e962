//! Pure marker block substitution.
//!
//! Documents are handled as sequences of lines split on `\n`. Only whole
//! lines are compared against the sentinel lines, so a marker appearing
//! inside a longer line is ordinary content.

use crate::marker::Marker;

/// Zero-based, inclusive line range of a marker block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSpan {
    /// Line index of the START sentinel.
    pub begin: usize,
    /// Line index of the END sentinel.
    pub end: usize,
}

/// Where the new block ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// No well-formed block existed; the new one was added after the last line.
    Appended,
    /// The block at this span was replaced.
    Replaced(BlockSpan),
}

/// Result of an edit: the new document text and how it was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edited {
    pub text: String,
    pub placement: Placement,
}

/// An empty text has no lines at all.
fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        Vec::new()
    } else {
        text.split('\n').collect()
    }
}

fn find_span(marker: &Marker, lines: &[&str]) -> Option<BlockSpan> {
    let begin = lines.iter().position(|line| *line == marker.start_line())?;
    let end = lines.iter().position(|line| *line == marker.end_line())?;
    (end >= begin).then_some(BlockSpan { begin, end })
}

/// Find the block a subsequent [`replace_block`] would replace.
///
/// The first START line opens the block and the first END line closes it.
/// Returns `None` when either is missing or the first END comes before the
/// first START.
///
/// # Example
/// ```
/// use aip_blocks::{Marker, locate_block};
///
/// let marker = Marker::new("M");
/// let doc = "a\n### M_START ###\nold\n### M_END ###\nb";
///
/// let span = locate_block(&marker, doc).unwrap();
/// assert_eq!((span.begin, span.end), (1, 3));
/// ```
pub fn locate_block(marker: &Marker, document: &str) -> Option<BlockSpan> {
    find_span(marker, &split_lines(document))
}

/// Install `block` into `document`, reporting whether it was replaced or
/// appended.
///
/// With a block present, the lines from START through END are swapped for
/// the lines of `block`; everything before and after is kept verbatim. When
/// `block` ends with a line break and there are lines after the old END, the
/// block's trailing empty line is not carried over, so repeated runs never
/// grow a blank line at the seam.
///
/// Without a block (an orphaned START or END, or an END ahead of the first
/// START), every existing line is kept and `block` is appended after the last
/// one. A stray END above an otherwise well-formed block therefore keeps the
/// document from ever matching: each run appends another copy until the stray
/// line is removed by hand.
///
/// `block` is expected to carry its own sentinel lines; if it does not, the
/// next run will not find it and will append again.
pub fn edit(marker: &Marker, document: &str, block: &str) -> Edited {
    let lines = split_lines(document);
    let mut new_lines = split_lines(block);

    let (result, placement) = match find_span(marker, &lines) {
        None => {
            let mut result = lines;
            result.extend(new_lines);
            (result, Placement::Appended)
        }
        Some(span) => {
            let head = &lines[..span.begin];
            let tail = &lines[span.end + 1..];

            if !tail.is_empty() && new_lines.last() == Some(&"") {
                new_lines.pop();
            }

            let mut result = Vec::with_capacity(head.len() + new_lines.len() + tail.len());
            result.extend_from_slice(head);
            result.extend(new_lines);
            result.extend_from_slice(tail);
            (result, Placement::Replaced(span))
        }
    };

    Edited {
        text: result.join("\n"),
        placement,
    }
}

/// Install `block` into `document` and return the new text.
///
/// See [`edit`] for the exact rules.
///
/// # Example
/// ```
/// use aip_blocks::{Marker, replace_block};
///
/// let marker = Marker::default();
/// let doc = "a\n### AIPHELPER_MARKER_START ###\nold1\nold2\n### AIPHELPER_MARKER_END ###\nb";
///
/// assert_eq!(replace_block(&marker, doc, "new1\nnew2"), "a\nnew1\nnew2\nb");
/// ```
pub fn replace_block(marker: &Marker, document: &str, block: &str) -> String {
    edit(marker, document, block).text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker() -> Marker {
        Marker::new("M")
    }

    #[test]
    fn test_split_lines_empty_has_no_lines() {
        assert!(split_lines("").is_empty());
        assert_eq!(split_lines("\n"), vec!["", ""]);
        assert_eq!(split_lines("a\nb"), vec!["a", "b"]);
    }

    #[test]
    fn test_locate_none_without_end() {
        let doc = "### M_START ###\nbody";
        assert_eq!(locate_block(&marker(), doc), None);
    }

    #[test]
    fn test_locate_end_before_start_is_malformed() {
        let doc = "### M_END ###\n### M_START ###\nx\n### M_END ###";
        assert_eq!(locate_block(&marker(), doc), None);
    }

    #[test]
    fn test_edit_reports_placement() {
        let appended = edit(&marker(), "plain", "### M_START ###\n### M_END ###");
        assert_eq!(appended.placement, Placement::Appended);

        let replaced = edit(&marker(), &appended.text, "### M_START ###\n### M_END ###");
        assert_eq!(
            replaced.placement,
            Placement::Replaced(BlockSpan { begin: 1, end: 2 })
        );
        assert_eq!(replaced.text, appended.text);
    }

    #[test]
    fn test_marker_inside_longer_line_is_content() {
        let doc = "# ### M_START ###\n### M_END ###";
        assert_eq!(locate_block(&marker(), doc), None);
    }
}
