use bytemuck::{Pod, Zeroable};
use serde::Serialize;

/// Size in bytes of every element the parser stores (`f32` components and `u32` indices).
pub const ELEMENT_SIZE: usize = 4;

/// Maximum number of components kept per vertex attribute row (x, y, z, w).
pub const MAX_COMPONENTS: usize = 4;

/// Number of indices stored per face corner: position, texcoord, normal.
pub const INDICES_PER_CORNER: usize = 3;

/// Slot of the position index inside a face corner triple.
pub const POSITION_SLOT: usize = 0;
/// Slot of the texcoord index inside a face corner triple.
pub const TEXCOORD_SLOT: usize = 1;
/// Slot of the normal index inside a face corner triple.
pub const NORMAL_SLOT: usize = 2;

/// The four typed arrays produced by the parser, in buffer order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    Position,
    Normal,
    TexCoord,
    Face,
}

impl AttributeKind {
    /// Buffer order: positions, normals, texcoords, faces.
    pub const ALL: [AttributeKind; 4] = [
        AttributeKind::Position,
        AttributeKind::Normal,
        AttributeKind::TexCoord,
        AttributeKind::Face,
    ];

    /// Elements stored per row for a row of the given width.
    pub fn elements_per_row(self, width: usize) -> usize {
        match self {
            AttributeKind::Face => width * INDICES_PER_CORNER,
            _ => width,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKind::Position => "position",
            AttributeKind::Normal => "normal",
            AttributeKind::TexCoord => "texcoord",
            AttributeKind::Face => "face",
        }
    }
}

impl std::fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row count and per-row width of one typed array.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AttributeInfo {
    pub count: usize,
    pub width: usize,
}

impl AttributeInfo {
    /// Whether at least one line of the directive appeared.
    pub fn is_present(&self) -> bool {
        self.count > 0
    }
}

/// Counts and widths of all four typed arrays, as discovered by the sizing pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ObjCounts {
    pub positions: AttributeInfo,
    pub normals: AttributeInfo,
    pub texcoords: AttributeInfo,
    pub faces: AttributeInfo,
}

impl ObjCounts {
    pub fn get(&self, kind: AttributeKind) -> AttributeInfo {
        match kind {
            AttributeKind::Position => self.positions,
            AttributeKind::Normal => self.normals,
            AttributeKind::TexCoord => self.texcoords,
            AttributeKind::Face => self.faces,
        }
    }

    fn get_mut(&mut self, kind: AttributeKind) -> &mut AttributeInfo {
        match kind {
            AttributeKind::Position => &mut self.positions,
            AttributeKind::Normal => &mut self.normals,
            AttributeKind::TexCoord => &mut self.texcoords,
            AttributeKind::Face => &mut self.faces,
        }
    }

    /// Number of 4-byte elements the typed array occupies.
    pub fn element_count(&self, kind: AttributeKind) -> usize {
        let info = self.get(kind);
        info.count * kind.elements_per_row(info.width)
    }

    /// Record one scanned line of `kind` carrying `width` components (or vertex groups).
    ///
    /// Vertex attributes keep the width of their first line, capped at
    /// [`MAX_COMPONENTS`]. Faces keep the widest line so that a single
    /// polygon trips the triangulation check.
    pub(crate) fn record(&mut self, kind: AttributeKind, width: usize) {
        let info = self.get_mut(kind);
        match kind {
            AttributeKind::Face => info.width = info.width.max(width),
            _ if info.count == 0 => info.width = width.min(MAX_COMPONENTS),
            _ => {}
        }
        info.count += 1;
    }
}

/// One vertex attribute row widened to four components.
///
/// Components beyond the row's width read as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VertexRecord(pub [f32; MAX_COMPONENTS]);

impl VertexRecord {
    /// Copy up to four components out of a typed-array row.
    pub fn from_row(row: &[f32]) -> Self {
        let mut components = [0.0; MAX_COMPONENTS];
        let n = row.len().min(MAX_COMPONENTS);
        components[..n].copy_from_slice(&row[..n]);
        Self(components)
    }

    pub fn x(&self) -> f32 {
        self.0[0]
    }

    pub fn y(&self) -> f32 {
        self.0[1]
    }

    pub fn z(&self) -> f32 {
        self.0[2]
    }

    pub fn w(&self) -> f32 {
        self.0[3]
    }
}

/// Indices of one face corner, 1-based as written in the file; 0 means absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable, Serialize)]
#[repr(C)]
pub struct IndexTriple {
    pub position: u32,
    pub texcoord: u32,
    pub normal: u32,
}

impl IndexTriple {
    /// Index for the given vertex attribute, `None` for faces.
    pub fn index_of(&self, kind: AttributeKind) -> Option<u32> {
        match kind {
            AttributeKind::Position => Some(self.position),
            AttributeKind::TexCoord => Some(self.texcoord),
            AttributeKind::Normal => Some(self.normal),
            AttributeKind::Face => None,
        }
    }
}

impl std::fmt::Display for IndexTriple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.position, self.texcoord, self.normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_widths_keep_first_line() {
        let mut counts = ObjCounts::default();
        counts.record(AttributeKind::Position, 3);
        counts.record(AttributeKind::Position, 4);
        counts.record(AttributeKind::Position, 2);
        assert_eq!(counts.positions, AttributeInfo { count: 3, width: 3 });
    }

    #[test]
    fn vertex_width_is_capped() {
        let mut counts = ObjCounts::default();
        counts.record(AttributeKind::Normal, 7);
        assert_eq!(counts.normals.width, MAX_COMPONENTS);
    }

    #[test]
    fn face_width_keeps_widest_line() {
        let mut counts = ObjCounts::default();
        counts.record(AttributeKind::Face, 3);
        counts.record(AttributeKind::Face, 4);
        counts.record(AttributeKind::Face, 3);
        assert_eq!(counts.faces, AttributeInfo { count: 3, width: 4 });
        assert_eq!(counts.element_count(AttributeKind::Face), 36);
    }

    #[test]
    fn absent_attribute() {
        let counts = ObjCounts::default();
        assert!(!counts.texcoords.is_present());
        assert_eq!(counts.element_count(AttributeKind::TexCoord), 0);
    }

    #[test]
    fn vertex_record_pads_with_zero() {
        let v = VertexRecord::from_row(&[1.0, 2.0]);
        assert_eq!(v.x(), 1.0);
        assert_eq!(v.y(), 2.0);
        assert_eq!(v.z(), 0.0);
        assert_eq!(v.w(), 0.0);
    }

    #[test]
    fn index_triple_layout_matches_slots() {
        let raw: [u32; 3] = [7, 8, 9];
        let triple: &IndexTriple = bytemuck::from_bytes(bytemuck::bytes_of(&raw));
        assert_eq!(triple.index_of(AttributeKind::Position), Some(raw[POSITION_SLOT]));
        assert_eq!(triple.index_of(AttributeKind::TexCoord), Some(raw[TEXCOORD_SLOT]));
        assert_eq!(triple.index_of(AttributeKind::Normal), Some(raw[NORMAL_SLOT]));
        assert_eq!(triple.to_string(), "7/8/9");
    }
}
