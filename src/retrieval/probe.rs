//! Image header probing.

use crate::error::{Result, RoomgenError};
use image::ImageReader;
use std::io::Cursor;

/// Reads `(width, height)` from encoded image bytes without decoding pixels.
///
/// The format is guessed from the content, so the bytes need no file name.
pub fn probe_dimensions(bytes: &[u8]) -> Result<(u32, u32)> {
    let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    if reader.format().is_none() {
        return Err(RoomgenError::Image("Unrecognized image format".to_string()));
    }
    let (width, height) = reader.into_dimensions()?;
    if width == 0 || height == 0 {
        return Err(RoomgenError::Image(format!(
            "Degenerate image dimensions {}x{}",
            width, height
        )));
    }
    Ok((width, height))
}
