use super::{Scanned, line_end, match_directive, next_line, token_str, tokens};
use crate::config::NumberParser;

fn is_component_separator(b: u8) -> bool {
    b == b' ' || b == b'\t' || b == b','
}

/// Scan a geometric vertex line (`v x y z [w]`).
pub fn scan_position(
    input: &[u8],
    cursor: usize,
    dest: Option<&mut [f32]>,
    numbers: &NumberParser,
) -> Option<Scanned> {
    scan_vertex(input, cursor, b"v", dest, numbers)
}

/// Scan a vertex normal line (`vn x y z`).
pub fn scan_normal(
    input: &[u8],
    cursor: usize,
    dest: Option<&mut [f32]>,
    numbers: &NumberParser,
) -> Option<Scanned> {
    scan_vertex(input, cursor, b"vn", dest, numbers)
}

/// Scan a texture vertex line (`vt u [v [w]]`).
pub fn scan_texcoord(
    input: &[u8],
    cursor: usize,
    dest: Option<&mut [f32]>,
    numbers: &NumberParser,
) -> Option<Scanned> {
    scan_vertex(input, cursor, b"vt", dest, numbers)
}

/// Shared body of the three vertex scanners.
///
/// `dest` is the row for this line, already sized to the attribute width.
/// It is zeroed first, then component `i` lands in `dest[i]`; components past
/// the row width are counted but not stored.
fn scan_vertex(
    input: &[u8],
    cursor: usize,
    tag: &[u8],
    dest: Option<&mut [f32]>,
    numbers: &NumberParser,
) -> Option<Scanned> {
    let start = match_directive(input, cursor, tag)?;
    let end = line_end(input, start);
    let components = tokens(&input[start..end], is_component_separator);

    let width = match dest {
        None => components.count(),
        Some(row) => {
            row.fill(0.0);
            let mut found = 0;
            for (i, token) in components.enumerate() {
                if let Some(slot) = row.get_mut(i) {
                    *slot = (numbers.parse_float)(token_str(token));
                }
                found = i + 1;
            }
            found
        }
    };

    Some(Scanned {
        next: next_line(input, end),
        width,
    })
}
