pub mod config;
pub mod error;
pub mod inspect;
pub mod layout;
pub mod mesh;
pub mod parser;
pub mod scanner;
pub mod types;

pub use config::{InspectConfig, NumberParser};
pub use error::{FlatObjError, Result};
pub use inspect::Inspector;
pub use layout::BufferLayout;
pub use mesh::{build_mesh, measure_mesh};
pub use parser::{ObjData, ObjParser, materialize, measure};
