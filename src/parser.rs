//! Two-pass OBJ driver.
//!
//! [`ObjParser::measure`] walks the input once without writing anything and
//! returns the [`BufferLayout`] the caller allocates. [`ObjParser::materialize`]
//! walks the same input again and fills that allocation. Nothing is allocated
//! by either pass.

use tracing::{debug, warn};

use crate::config::NumberParser;
use crate::layout::BufferLayout;
use crate::scanner::{scan_comment_or_blank, scan_face, scan_normal, scan_position, scan_texcoord};
use crate::types::{AttributeKind, IndexTriple, ObjCounts, VertexRecord};

/// Typed arrays filled by [`ObjParser::materialize`], borrowed from the caller buffer.
#[derive(Debug, Clone, Copy)]
pub struct ObjData<'a> {
    pub counts: ObjCounts,
    /// `positions.count * positions.width` floats.
    pub positions: &'a [f32],
    pub normals: &'a [f32],
    pub texcoords: &'a [f32],
    /// `faces.count * faces.width` corners, one index triple each.
    pub faces: &'a [IndexTriple],
}

impl<'a> ObjData<'a> {
    /// The flat array of a vertex attribute, `None` for [`AttributeKind::Face`].
    pub fn attribute(&self, kind: AttributeKind) -> Option<&'a [f32]> {
        match kind {
            AttributeKind::Position => Some(self.positions),
            AttributeKind::Normal => Some(self.normals),
            AttributeKind::TexCoord => Some(self.texcoords),
            AttributeKind::Face => None,
        }
    }

    pub fn position(&self, i: usize) -> VertexRecord {
        VertexRecord::from_row(row(self.positions, self.counts.positions.width, i))
    }

    pub fn normal(&self, i: usize) -> VertexRecord {
        VertexRecord::from_row(row(self.normals, self.counts.normals.width, i))
    }

    pub fn texcoord(&self, i: usize) -> VertexRecord {
        VertexRecord::from_row(row(self.texcoords, self.counts.texcoords.width, i))
    }

    /// The corners of face `i`.
    pub fn face(&self, i: usize) -> &'a [IndexTriple] {
        row(self.faces, self.counts.faces.width, i)
    }

    /// Face indices as raw `u32` triples `{position, texcoord, normal}`.
    pub fn face_indices(&self) -> &'a [u32] {
        bytemuck::cast_slice(self.faces)
    }
}

fn row<T>(array: &[T], width: usize, i: usize) -> &[T] {
    &array[i * width..(i + 1) * width]
}

fn row_mut<T>(array: &mut [T], width: usize, i: usize) -> Option<&mut [T]> {
    array.get_mut(i * width..(i + 1) * width)
}

/// OBJ parser with a configurable number conversion.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjParser {
    numbers: NumberParser,
}

impl ObjParser {
    pub fn new(numbers: NumberParser) -> Self {
        Self { numbers }
    }

    /// First pass: count directives and discover widths.
    ///
    /// Pure; calling it twice on the same input gives the same layout.
    pub fn measure(&self, input: &[u8]) -> BufferLayout {
        let numbers = &self.numbers;
        let mut counts = ObjCounts::default();
        let mut cursor = 0;

        while cursor < input.len() {
            cursor = if let Some(s) = scan_position(input, cursor, None, numbers) {
                counts.record(AttributeKind::Position, s.width);
                s.next
            } else if let Some(s) = scan_normal(input, cursor, None, numbers) {
                counts.record(AttributeKind::Normal, s.width);
                s.next
            } else if let Some(s) = scan_texcoord(input, cursor, None, numbers) {
                counts.record(AttributeKind::TexCoord, s.width);
                s.next
            } else if let Some(s) = scan_face(input, cursor, None, numbers) {
                counts.record(AttributeKind::Face, s.width);
                s.next
            } else {
                scan_comment_or_blank(input, cursor).next
            };
        }

        let layout = BufferLayout::new(counts);
        debug!(
            positions = counts.positions.count,
            normals = counts.normals.count,
            texcoords = counts.texcoords.count,
            faces = counts.faces.count,
            face_width = counts.faces.width,
            bytes = layout.total_bytes(),
            "Measured OBJ input"
        );
        layout
    }

    /// Second pass: fill `buffer` with the typed arrays described by `layout`.
    ///
    /// `layout` must come from [`measure`](Self::measure) on the same, unmodified
    /// input. Rows beyond the measured counts are scanned but not stored.
    ///
    /// # Panics
    ///
    /// Panics if `buffer` holds fewer than `layout.word_count()` words.
    pub fn materialize<'b>(
        &self,
        input: &[u8],
        layout: &BufferLayout,
        buffer: &'b mut [u32],
    ) -> ObjData<'b> {
        assert!(
            buffer.len() >= layout.word_count(),
            "buffer holds {} words but the layout needs {}",
            buffer.len(),
            layout.word_count()
        );

        let (positions, rest) =
            buffer.split_at_mut(layout.section(AttributeKind::Position).words().len());
        let (normals, rest) = rest.split_at_mut(layout.section(AttributeKind::Normal).words().len());
        let (texcoords, rest) =
            rest.split_at_mut(layout.section(AttributeKind::TexCoord).words().len());
        let faces = &mut rest[..layout.section(AttributeKind::Face).words().len()];

        let positions: &mut [f32] = bytemuck::cast_slice_mut(positions);
        let normals: &mut [f32] = bytemuck::cast_slice_mut(normals);
        let texcoords: &mut [f32] = bytemuck::cast_slice_mut(texcoords);
        let faces: &mut [IndexTriple] = bytemuck::cast_slice_mut(faces);

        let counts = layout.counts;
        let numbers = &self.numbers;
        let (mut p, mut n, mut t, mut f) = (0, 0, 0, 0);
        let mut cursor = 0;

        while cursor < input.len() {
            cursor = if let Some(s) = scan_position(
                input,
                cursor,
                row_mut(positions, counts.positions.width, p),
                numbers,
            ) {
                p += 1;
                s.next
            } else if let Some(s) = scan_normal(
                input,
                cursor,
                row_mut(normals, counts.normals.width, n),
                numbers,
            ) {
                n += 1;
                s.next
            } else if let Some(s) = scan_texcoord(
                input,
                cursor,
                row_mut(texcoords, counts.texcoords.width, t),
                numbers,
            ) {
                t += 1;
                s.next
            } else if let Some(s) =
                scan_face(input, cursor, row_mut(faces, counts.faces.width, f), numbers)
            {
                f += 1;
                s.next
            } else {
                scan_comment_or_blank(input, cursor).next
            };
        }

        if (p, n, t, f)
            != (
                counts.positions.count,
                counts.normals.count,
                counts.texcoords.count,
                counts.faces.count,
            )
        {
            warn!(
                positions = p,
                normals = n,
                texcoords = t,
                faces = f,
                "Fill pass disagrees with measured counts; input changed between passes"
            );
        }
        debug!(positions = p, normals = n, texcoords = t, faces = f, "Filled typed arrays");

        ObjData {
            counts,
            positions,
            normals,
            texcoords,
            faces,
        }
    }
}

/// [`ObjParser::measure`] with the default number parser.
pub fn measure(input: &[u8]) -> BufferLayout {
    ObjParser::default().measure(input)
}

/// [`ObjParser::materialize`] with the default number parser.
///
/// # Panics
///
/// Panics if `buffer` holds fewer than `layout.word_count()` words.
pub fn materialize<'b>(input: &[u8], layout: &BufferLayout, buffer: &'b mut [u32]) -> ObjData<'b> {
    ObjParser::default().materialize(input, layout, buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AttributeInfo;
    use approx::assert_relative_eq;

    const TRIANGLE: &[u8] = b"v 0.0 0.0 0.0\nv 1.0 0.0 0.0\nv 0.0 1.0 0.0\nf 1 2 3\n";

    const TEXTURED_QUAD: &[u8] = b"\
# two triangles
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0

vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 0 1
usemtl stone
f 1/1/1 2/2/1 3/3/1
f 1/1/1 3/3/1 4/4/1
";

    fn parse(input: &[u8]) -> (BufferLayout, Vec<u32>) {
        let layout = measure(input);
        let mut buffer = vec![0u32; layout.word_count()];
        materialize(input, &layout, &mut buffer);
        (layout, buffer)
    }

    #[test]
    fn measure_is_idempotent() {
        assert_eq!(measure(TEXTURED_QUAD), measure(TEXTURED_QUAD));
        assert_eq!(
            measure(TEXTURED_QUAD).total_bytes(),
            measure(TEXTURED_QUAD).total_bytes()
        );
    }

    #[test]
    fn triangle_counts() {
        let layout = measure(TRIANGLE);
        assert_eq!(layout.counts.positions, AttributeInfo { count: 3, width: 3 });
        assert_eq!(layout.counts.faces, AttributeInfo { count: 1, width: 3 });
        assert!(!layout.counts.normals.is_present());
        assert!(!layout.counts.texcoords.is_present());
        assert_eq!(layout.total_bytes(), 3 * 3 * 4 + 3 * 3 * 4);
    }

    #[test]
    fn textured_quad_fill() {
        let layout = measure(TEXTURED_QUAD);
        let mut buffer = vec![0u32; layout.word_count()];
        let data = materialize(TEXTURED_QUAD, &layout, &mut buffer);

        assert_eq!(data.counts.positions.count, 4);
        assert_eq!(data.counts.texcoords, AttributeInfo { count: 4, width: 2 });
        assert_eq!(data.counts.normals, AttributeInfo { count: 1, width: 3 });
        assert_eq!(data.counts.faces, AttributeInfo { count: 2, width: 3 });

        assert_relative_eq!(data.position(2).x(), 1.0);
        assert_relative_eq!(data.position(2).y(), 1.0);
        assert_relative_eq!(data.texcoord(3).y(), 1.0);
        assert_relative_eq!(data.normal(0).z(), 1.0);

        let second = data.face(1);
        assert_eq!(second[1].to_string(), "3/3/1");
        assert_eq!(data.face_indices()[..3], [1, 1, 1]);
    }

    #[test]
    fn buffer_order_is_fixed() {
        let (layout, buffer) = parse(TEXTURED_QUAD);
        let normals = layout.section(AttributeKind::Normal).words();
        let floats: &[f32] = bytemuck::cast_slice(&buffer[normals]);
        assert_eq!(floats, &[0.0, 0.0, 1.0]);

        let faces = layout.section(AttributeKind::Face).words();
        assert_eq!(faces.end, buffer.len());
        assert_eq!(buffer[faces.start..faces.start + 3], [1, 1, 1]);
    }

    #[test]
    fn comment_and_blank_lines_do_not_count() {
        let plain = measure(TRIANGLE);
        let noisy = measure(b"# header\n\nv 0.0 0.0 0.0\n# mid\nv 1.0 0.0 0.0\n\n\nv 0.0 1.0 0.0\ns off\nf 1 2 3");
        assert_eq!(plain.counts, noisy.counts);
    }

    #[test]
    fn crlf_input() {
        let layout = measure(b"v 1 2 3\r\nv 4 5 6\r\nf 1 2 1\r\n");
        assert_eq!(layout.counts.positions.count, 2);
        assert_eq!(layout.counts.faces.count, 1);
    }

    #[test]
    fn width_discovered_from_first_line() {
        let input = b"v 1 2 3 0.5\nv 4 5 6\n";
        let layout = measure(input);
        assert_eq!(layout.counts.positions.width, 4);

        let mut buffer = vec![0u32; layout.word_count()];
        let data = materialize(input, &layout, &mut buffer);
        assert_eq!(data.positions, &[1.0, 2.0, 3.0, 0.5, 4.0, 5.0, 6.0, 0.0]);
    }

    #[test]
    fn mixed_face_widths_use_widest() {
        let input = b"v 0 0 0\nf 1 1 1\nf 1 1 1 1\n";
        let layout = measure(input);
        assert_eq!(layout.counts.faces, AttributeInfo { count: 2, width: 4 });

        let mut buffer = vec![0u32; layout.word_count()];
        let data = materialize(input, &layout, &mut buffer);
        assert_eq!(data.face(0)[3], IndexTriple::default());
        assert_eq!(data.face(1)[3].position, 1);
    }

    #[test]
    fn empty_input() {
        let layout = measure(b"");
        assert_eq!(layout.total_bytes(), 0);
        let data = materialize(b"", &layout, &mut []);
        assert!(data.positions.is_empty());
        assert!(data.faces.is_empty());
    }

    #[test]
    fn oversized_buffer_is_accepted() {
        let layout = measure(TRIANGLE);
        let mut buffer = vec![0u32; layout.word_count() + 16];
        let data = materialize(TRIANGLE, &layout, &mut buffer);
        assert_eq!(data.positions.len(), 9);
        assert_eq!(data.faces.len(), 3);
    }

    #[test]
    #[should_panic(expected = "layout needs")]
    fn undersized_buffer_panics() {
        let layout = measure(TRIANGLE);
        let mut buffer = vec![0u32; layout.word_count() - 1];
        materialize(TRIANGLE, &layout, &mut buffer);
    }

    #[test]
    fn stale_layout_does_not_overrun() {
        let layout = measure(TRIANGLE);
        let longer = b"v 0 0 0\nv 1 0 0\nv 0 1 0\nv 9 9 9\nf 1 2 3\nf 2 3 4\n";
        let mut buffer = vec![0u32; layout.word_count()];
        let data = materialize(longer, &layout, &mut buffer);
        assert_eq!(data.positions.len(), 9);
        assert_eq!(data.face(0)[2].position, 3);
    }

    #[test]
    fn custom_number_parser() {
        let parser = ObjParser::new(NumberParser {
            parse_float: |s| crate::config::atof(s) * 2.0,
            parse_int: crate::config::atoi,
        });
        let layout = parser.measure(TRIANGLE);
        let mut buffer = vec![0u32; layout.word_count()];
        let data = parser.materialize(TRIANGLE, &layout, &mut buffer);
        assert_relative_eq!(data.position(1).x(), 2.0);
        assert_eq!(data.face(0)[2].position, 3);
    }
}
