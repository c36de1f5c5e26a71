//! JSON writers for the role→URI mapping and the merged tree.

pub mod mapping;

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::errors::AppError;

pub use mapping::RoleUriMapping;

/// Writes `value` as 2-space indented JSON, replacing any existing file.
///
/// Not atomic: an interrupted write can leave a truncated file behind.
pub fn write_json_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| AppError::output(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|e| AppError::json(path, e))?;
    writer.write_all(b"\n").map_err(|e| AppError::output(path, e))?;
    writer.flush().map_err(|e| AppError::output(path, e))?;
    info!("Saved {}", path.display());
    Ok(())
}

/// Loads a mapping previously written by [`write_json_pretty`].
pub fn read_mapping(path: &Path) -> Result<RoleUriMapping, AppError> {
    let file = File::open(path).map_err(|e| AppError::input(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| AppError::json(path, e))
}
