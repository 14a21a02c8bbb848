//! Interleaved vertex buffer assembly.
//!
//! Expands the indexed typed arrays of a triangulated OBJ into one vertex per
//! face corner, interleaving the present attributes in the order position,
//! texcoord, normal.

use tracing::debug;

use crate::error::{FlatObjError, Result};
use crate::parser::ObjData;
use crate::types::{AttributeKind, ELEMENT_SIZE, Mesh, MeshDescriptor};

/// Vertex groups per face accepted by mesh assembly.
pub const TRIANGLE_WIDTH: usize = 3;

/// Interleaving order of the vertex attributes.
const INTERLEAVE_ORDER: [AttributeKind; 3] = [
    AttributeKind::Position,
    AttributeKind::TexCoord,
    AttributeKind::Normal,
];

/// Compute the descriptor of the interleaved buffer without writing anything.
///
/// `descriptor.byte_size()` is the allocation the caller needs for
/// [`build_mesh`]. Fails with [`FlatObjError::NeedsTriangulation`] unless
/// every face has exactly three vertex groups.
pub fn measure_mesh(data: &ObjData<'_>) -> Result<MeshDescriptor> {
    let faces = data.counts.faces;
    if faces.width != TRIANGLE_WIDTH {
        return Err(FlatObjError::NeedsTriangulation {
            face_width: faces.width,
        });
    }

    let mut descriptor = MeshDescriptor {
        vertex_count: faces.count * faces.width,
        ..Default::default()
    };
    for kind in INTERLEAVE_ORDER {
        let info = data.counts.get(kind);
        if !info.is_present() {
            continue;
        }
        let offset = Some(descriptor.stride);
        match kind {
            AttributeKind::Position => descriptor.position_offset = offset,
            AttributeKind::TexCoord => descriptor.texcoord_offset = offset,
            AttributeKind::Normal => descriptor.normal_offset = offset,
            AttributeKind::Face => unreachable!("faces are not interleaved"),
        }
        descriptor.stride += info.width * ELEMENT_SIZE;
    }
    Ok(descriptor)
}

/// Write the interleaved vertex buffer into `dest`.
///
/// Corners are emitted in file order. For each present attribute the row
/// named by the corner's 1-based index is copied; an index of 0 writes zeros.
/// On error nothing is written.
///
/// # Panics
///
/// Panics if `dest` holds fewer than `descriptor.float_count()` floats, or if
/// a face references a row that does not exist.
pub fn build_mesh<'d>(data: &ObjData<'_>, dest: &'d mut [f32]) -> Result<Mesh<'d>> {
    let descriptor = measure_mesh(data)?;
    let float_count = descriptor.float_count();
    assert!(
        dest.len() >= float_count,
        "mesh buffer holds {} floats but the mesh needs {float_count}",
        dest.len()
    );
    let dest = &mut dest[..float_count];

    let floats_per_vertex = descriptor.floats_per_vertex();
    if floats_per_vertex > 0 {
        let attributes = INTERLEAVE_ORDER.map(|kind| {
            let info = data.counts.get(kind);
            let array = data.attribute(kind).unwrap_or_default();
            (kind, info.width, array, info.is_present())
        });

        for (vertex, corner) in dest.chunks_exact_mut(floats_per_vertex).zip(data.faces) {
            let mut out = 0;
            for &(kind, width, array, present) in &attributes {
                if !present {
                    continue;
                }
                let slot = &mut vertex[out..out + width];
                match corner.index_of(kind).and_then(|i| i.checked_sub(1)) {
                    Some(row) => {
                        let row = row as usize;
                        slot.copy_from_slice(&array[row * width..(row + 1) * width]);
                    }
                    None => slot.fill(0.0),
                }
                out += width;
            }
        }
    }

    debug!(
        vertices = descriptor.vertex_count,
        stride = descriptor.stride,
        bytes = descriptor.byte_size(),
        "Assembled interleaved mesh"
    );

    Ok(Mesh {
        descriptor,
        vertices: dest,
    })
}
