use std::{fmt, io};

/// All error types for flatobj.
#[derive(thiserror::Error, Debug)]
pub enum FlatObjError {
    /// Mesh assembly only accepts triangulated faces.
    #[error("Mesh needs triangulation: faces have {face_width} vertex groups, expected 3")]
    NeedsTriangulation { face_width: usize },
    #[error("Input error: {0}")]
    Input(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Failed to format report")]
    Format(#[from] fmt::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FlatObjError>;
