//! Run photo operations on the blocking thread pool.
//!
//! Decoding, remapping and re-encoding a full-size photo takes long enough to
//! stall an interactive loop. These wrappers move the work onto
//! `spawn_blocking` and hand back the encoded result; the caller applies it
//! to the canvas. Dropping the future discards the result, so the canvas is
//! never touched by an abandoned job.

use super::adjust::adjust;
use super::crop::{CropRequest, crop};
use crate::error::{FolioError, Result};

/// [`adjust`] on the blocking pool.
pub async fn spawn_adjust(bytes: Vec<u8>, brightness: u16, contrast: u16) -> Result<Vec<u8>> {
    tokio::task::spawn_blocking(move || adjust(&bytes, brightness, contrast))
        .await
        .map_err(|e| FolioError::Task(format!("Adjust worker failed: {}", e)))?
}

/// [`crop`] on the blocking pool.
pub async fn spawn_crop(bytes: Vec<u8>, request: CropRequest) -> Result<Vec<u8>> {
    tokio::task::spawn_blocking(move || crop(&bytes, &request))
        .await
        .map_err(|e| FolioError::Task(format!("Crop worker failed: {}", e)))?
}
