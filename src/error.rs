//! # Error Types
//!
//! This module defines error types used throughout the folio library.
//!
//! Failures are scoped to a single operation: a failed crop leaves the
//! committed image alone, a failed page leaves the rest of the export alone.
//! Item-model mutations never error on stale ids; they are silent no-ops.

use thiserror::Error;

use crate::document::ItemId;

/// Main error type for folio operations
#[derive(Debug, Error)]
pub enum FolioError {
    /// An operation needed an item that does not exist
    #[error("Unknown item: {0}")]
    UnknownItem(ItemId),

    /// Source bytes could not be decoded as an image
    #[error("Decode error: {0}")]
    Decode(String),

    /// Pixel buffer could not be re-encoded
    #[error("Encode error: {0}")]
    Encode(String),

    /// Crop rectangle collapsed to zero area after mapping to source pixels
    #[error("Degenerate crop: {width}x{height} source pixels")]
    DegenerateCrop { width: u32, height: u32 },

    /// Rotation is not a multiple of 90 in [0, 360)
    #[error("Invalid rotation: {0} degrees")]
    InvalidRotation(i32),

    /// A single page failed to render during export
    #[error("Page {page} failed to render: {reason}")]
    PageRender { page: u32, reason: String },

    /// Image reference missing from the image store
    #[error("Unknown image reference: {0}")]
    UnknownImage(String),

    /// Canvas file breaks the item arena's invariants
    #[error("Invalid canvas: {0}")]
    InvalidCanvas(String),

    /// Invalid configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Background worker failed before producing a result
    #[error("Task error: {0}")]
    Task(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error wrapper
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, FolioError>;
