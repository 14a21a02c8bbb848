use super::{Scanned, line_end, next_line};

/// Consume a comment, blank or unrecognized line.
///
/// Always matches, so the driver makes progress on any input. The line
/// produces no data.
pub fn scan_comment_or_blank(input: &[u8], cursor: usize) -> Scanned {
    let end = line_end(input, cursor);
    Scanned {
        next: next_line(input, end),
        width: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_line() {
        let input = b"# exported\nv 0 0 0\n";
        assert_eq!(scan_comment_or_blank(input, 0).next, 11);
    }

    #[test]
    fn empty_line() {
        let input = b"\n\nv 0 0 0";
        assert_eq!(scan_comment_or_blank(input, 0).next, 1);
        assert_eq!(scan_comment_or_blank(input, 1).next, 2);
    }

    #[test]
    fn unrecognized_directive() {
        let input = b"usemtl stone\r\nf 1 2 3";
        assert_eq!(scan_comment_or_blank(input, 0).next, 13);
    }

    #[test]
    fn last_line_without_newline() {
        let input = b"o cube";
        assert_eq!(scan_comment_or_blank(input, 0).next, input.len());
    }
}
