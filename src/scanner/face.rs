use super::{Scanned, line_end, match_directive, next_line, token_str, tokens};
use crate::config::NumberParser;
use crate::types::{INDICES_PER_CORNER, IndexTriple, NORMAL_SLOT, POSITION_SLOT, TEXCOORD_SLOT};

fn is_group_separator(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

/// Scan a face line (`f v v v`, `f v/vt ...`, `f v//vn ...`, `f v/vt/vn ...`).
///
/// The reported width is the number of vertex groups on the line, so a
/// size-only scan tells the caller whether the face is a triangle. With a
/// destination row the row is zeroed, then group `i` is written to `dest[i]`
/// while it fits. Empty, negative or unparsable indices are stored as 0,
/// meaning "absent".
pub fn scan_face(
    input: &[u8],
    cursor: usize,
    dest: Option<&mut [IndexTriple]>,
    numbers: &NumberParser,
) -> Option<Scanned> {
    let start = match_directive(input, cursor, b"f")?;
    let end = line_end(input, start);
    let groups = tokens(&input[start..end], is_group_separator);

    let width = match dest {
        None => groups.count(),
        Some(row) => {
            row.fill(IndexTriple::default());
            let mut found = 0;
            for (i, group) in groups.enumerate() {
                if let Some(corner) = row.get_mut(i) {
                    *corner = parse_group(group, numbers);
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

/// Parse `v`, `v/vt`, `v//vn` or `v/vt/vn`. Slots past the third are ignored.
fn parse_group(group: &[u8], numbers: &NumberParser) -> IndexTriple {
    let mut slots = [0u32; INDICES_PER_CORNER];
    for (slot, token) in slots.iter_mut().zip(group.split(|&b| b == b'/')) {
        *slot = parse_index(token, numbers);
    }
    IndexTriple {
        position: slots[POSITION_SLOT],
        texcoord: slots[TEXCOORD_SLOT],
        normal: slots[NORMAL_SLOT],
    }
}

fn parse_index(token: &[u8], numbers: &NumberParser) -> u32 {
    if token.is_empty() {
        return 0;
    }
    u32::try_from((numbers.parse_int)(token_str(token))).unwrap_or(0)
}
