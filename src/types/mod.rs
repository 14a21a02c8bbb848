pub mod attribute;
pub mod bounds;
pub mod mesh;

pub use attribute::{
    AttributeInfo, AttributeKind, ELEMENT_SIZE, INDICES_PER_CORNER, IndexTriple, MAX_COMPONENTS,
    NORMAL_SLOT, ObjCounts, POSITION_SLOT, TEXCOORD_SLOT, VertexRecord,
};
pub use bounds::BoundingBox;
pub use mesh::{Mesh, MeshDescriptor};
