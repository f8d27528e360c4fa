//! Puts comment lines back into re-serialized configuration text.
//!
//! Format parsers drop comments, so the freshly serialized text never contains
//! them and a line diff against the original reports every comment as removed.
//! The reconciler keeps those removed lines that look like comments and drops
//! every other removed line.
//!
//! This is a textual heuristic. A comment that described a key which is now
//! gone still survives; exact whitespace and alignment are not preserved.

use similar::{ChangeTag, TextDiff};

#[cfg(test)]
#[path = "reconciler_tests.rs"]
mod tests;

/// Line prefixes, after leading whitespace, that mark a comment.
pub const COMMENT_MARKERS: &[char] = &['#', ';'];

/// How a run of lines differs between the original and the new text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Unchanged,
    Added,
    Removed,
}

/// A contiguous run of lines with the same classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffSegment {
    /// The lines of the run, each with its line terminator.
    pub text: String,
    pub kind: SegmentKind,
}

/// Line diff of `original` against `updated`, grouped into runs.
///
/// Within a changed region the removed run comes before the added run.
pub fn diff_segments(original: &str, updated: &str) -> Vec<DiffSegment> {
    let diff = TextDiff::from_lines(original, updated);

    let mut segments: Vec<DiffSegment> = Vec::new();
    for change in diff.iter_all_changes() {
        let kind = match change.tag() {
            ChangeTag::Equal => SegmentKind::Unchanged,
            ChangeTag::Insert => SegmentKind::Added,
            ChangeTag::Delete => SegmentKind::Removed,
        };
        match segments.last_mut() {
            Some(last) if last.kind == kind => last.text.push_str(change.value()),
            _ => segments.push(DiffSegment {
                text: change.value().to_string(),
                kind,
            }),
        }
    }
    segments
}

/// Builds the output text from `updated`, re-inserting comment lines from
/// `original` that the new serialization dropped.
///
/// Comment detection happens line by line inside a removed run, so a kept
/// comment never pulls removed content lines along with it.
///
/// # Examples
///
/// ```rust
/// use config_updater::reconcile;
///
/// let original = "# keep me\nport: 8080\nhost: localhost\n";
/// let updated = "port: 9090\nhost: localhost\n";
///
/// assert_eq!(
///     reconcile(original, updated),
///     "# keep me\nport: 9090\nhost: localhost\n"
/// );
/// ```
pub fn reconcile(original: &str, updated: &str) -> String {
    reconcile_with(original, updated, COMMENT_MARKERS)
}

/// [`reconcile`] with a format-specific set of comment markers.
pub fn reconcile_with(original: &str, updated: &str, markers: &[char]) -> String {
    let mut result = String::with_capacity(updated.len() + original.len() / 4);

    for segment in diff_segments(original, updated) {
        match segment.kind {
            SegmentKind::Unchanged | SegmentKind::Added => append(&mut result, &segment.text),
            SegmentKind::Removed => {
                for line in segment.text.split_inclusive('\n') {
                    if is_comment_line(line, markers) {
                        append(&mut result, line);
                    }
                }
            }
        }
    }
    result
}

/// Returns `true` when the line, ignoring leading whitespace, starts with one
/// of `markers`.
pub fn is_comment_line(line: &str, markers: &[char]) -> bool {
    line.trim_start().starts_with(markers)
}

// A retained final line may lack its terminator; never glue the next line
// onto it.
fn append(out: &mut String, text: &str) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(text);
}
