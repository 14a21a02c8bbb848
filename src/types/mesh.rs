use serde::Serialize;

use super::attribute::ELEMENT_SIZE;

/// Describes how to read an interleaved vertex buffer.
///
/// Offsets are in bytes from the start of a vertex; `None` marks an attribute
/// that is absent from the buffer. Attributes are laid out in the order
/// position, texcoord, normal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MeshDescriptor {
    pub vertex_count: usize,
    /// Size of one vertex in bytes.
    pub stride: usize,
    pub position_offset: Option<usize>,
    pub texcoord_offset: Option<usize>,
    pub normal_offset: Option<usize>,
}

impl MeshDescriptor {
    /// Number of `f32` values in one vertex.
    pub fn floats_per_vertex(&self) -> usize {
        self.stride / ELEMENT_SIZE
    }

    /// Number of `f32` values the interleaved buffer holds.
    pub fn float_count(&self) -> usize {
        self.vertex_count * self.floats_per_vertex()
    }

    /// Size of the interleaved buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.vertex_count * self.stride
    }

    /// How many of position, texcoord and normal are present (0-3).
    pub fn attribute_count(&self) -> usize {
        [self.position_offset, self.texcoord_offset, self.normal_offset]
            .iter()
            .filter(|o| o.is_some())
            .count()
    }
}

/// An assembled interleaved vertex buffer borrowed from caller storage.
#[derive(Debug, Clone, Copy)]
pub struct Mesh<'a> {
    pub descriptor: MeshDescriptor,
    pub vertices: &'a [f32],
}

impl<'a> Mesh<'a> {
    /// The interleaved vertices as raw bytes, ready for upload.
    pub fn as_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.vertices)
    }

    /// The components of vertex `i`.
    pub fn vertex(&self, i: usize) -> &'a [f32] {
        let n = self.descriptor.floats_per_vertex();
        &self.vertices[i * n..(i + 1) * n]
    }

    pub fn vertex_count(&self) -> usize {
        self.descriptor.vertex_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_descriptor() {
        let d = MeshDescriptor::default();
        assert_eq!(d.byte_size(), 0);
        assert_eq!(d.float_count(), 0);
        assert_eq!(d.attribute_count(), 0);
    }

    #[test]
    fn full_descriptor_sizes() {
        let d = MeshDescriptor {
            vertex_count: 6,
            stride: 32,
            position_offset: Some(0),
            texcoord_offset: Some(12),
            normal_offset: Some(20),
        };
        assert_eq!(d.floats_per_vertex(), 8);
        assert_eq!(d.float_count(), 48);
        assert_eq!(d.byte_size(), 192);
        assert_eq!(d.attribute_count(), 3);
    }

    #[test]
    fn mesh_vertex_access() {
        let vertices = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let mesh = Mesh {
            descriptor: MeshDescriptor {
                vertex_count: 2,
                stride: 12,
                position_offset: Some(0),
                ..Default::default()
            },
            vertices: &vertices,
        };
        assert_eq!(mesh.vertex(1), &[3.0, 4.0, 5.0]);
        assert_eq!(mesh.as_bytes().len(), 24);
    }
}
