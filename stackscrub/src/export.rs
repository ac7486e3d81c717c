//! Exporting cleaned frames for log pipelines.
//!
//! Serializes parsed frames as JSON so external tooling can ingest the same
//! cleaned view the renderer prints.

use crate::errors::ExportError;
use crate::frame::Frame;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write cleaned frames as pretty-printed JSON.
///
/// Accepts any `Write` implementation, so output can go to a file, a
/// network socket, or an in-memory buffer:
///
/// ```
/// use stackscrub::{export, Frame};
///
/// let frames = vec![Frame {
///     method_name: "Submit".to_owned(),
///     line_number: 42,
///     ..Frame::default()
/// }];
///
/// let mut buffer = Vec::new();
/// export::write_json(&frames, &mut buffer).unwrap();
/// assert!(String::from_utf8(buffer).unwrap().contains("Submit"));
/// ```
pub fn write_json<W: Write>(frames: &[Frame], writer: W) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(writer, frames)?;
    Ok(())
}

/// Write cleaned frames as pretty-printed JSON to a file, creating or
/// truncating it.
pub fn write_json_file(frames: &[Frame], path: impl AsRef<Path>) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_json(frames, BufWriter::new(file))
}
