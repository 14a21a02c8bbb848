//! Directive scanners.
//!
//! Each scanner looks at the line starting at `cursor` and either declines it
//! (`None`) or consumes the whole line and reports where the next line starts.
//! With no destination the scanner only counts; with a destination slot it
//! also writes the parsed values. Scanners never read past the end of `input`.

pub mod face;
pub mod skip;
pub mod vertex;

pub use face::scan_face;
pub use skip::scan_comment_or_blank;
pub use vertex::{scan_normal, scan_position, scan_texcoord};

/// A line consumed by a scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scanned {
    /// Cursor at the start of the following line (or `input.len()`).
    pub next: usize,
    /// Components (vertex lines) or vertex groups (face lines) found on the line.
    pub width: usize,
}

fn is_line_end(b: u8) -> bool {
    b == b'\n' || b == b'\r'
}

fn is_blank(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

/// Index of the `\n`/`\r` ending the line that contains `cursor`, or `input.len()`.
pub(crate) fn line_end(input: &[u8], cursor: usize) -> usize {
    input[cursor..]
        .iter()
        .position(|&b| is_line_end(b))
        .map_or(input.len(), |p| cursor + p)
}

/// Start of the line following a line that ends at `end`.
pub(crate) fn next_line(input: &[u8], end: usize) -> usize {
    (end + 1).min(input.len())
}

/// If the line at `cursor` starts with `tag` followed by a space or tab,
/// return the index just past that separator.
pub(crate) fn match_directive(input: &[u8], cursor: usize, tag: &[u8]) -> Option<usize> {
    let rest = &input[cursor..];
    let after = rest.strip_prefix(tag)?;
    match after.first() {
        Some(&b) if is_blank(b) => Some(cursor + tag.len() + 1),
        _ => None,
    }
}

/// Non-empty tokens of `line` split on any byte accepted by `is_separator`.
pub(crate) fn tokens(line: &[u8], is_separator: fn(u8) -> bool) -> impl Iterator<Item = &[u8]> {
    line.split(move |&b| is_separator(b))
        .filter(|token| !token.is_empty())
}

/// Token bytes as text; tokens that are not UTF-8 read as empty and parse to zero.
pub(crate) fn token_str(token: &[u8]) -> &str {
    std::str::from_utf8(token).unwrap_or("")
}
