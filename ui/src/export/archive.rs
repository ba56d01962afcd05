use std::io::{Cursor, Write};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use zip::{write::FileOptions, CompressionMethod, DateTime, ZipWriter};

use super::ExportError;

/// One file inside the export archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl ArchiveEntry {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// Zip `entries` in order. Timestamps are pinned to the zip epoch so the
/// same entries always produce the same bytes.
pub fn build_archive(entries: &[ArchiveEntry]) -> Result<Vec<u8>, ExportError> {
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for entry in entries {
        writer
            .start_file(entry.name.as_str(), options)
            .map_err(|err| ExportError::Archive(format!("{}: {err}", entry.name)))?;
        writer
            .write_all(&entry.bytes)
            .map_err(|err| ExportError::Archive(format!("{}: {err}", entry.name)))?;
    }
    let cursor = writer
        .finish()
        .map_err(|err| ExportError::Archive(err.to_string()))?;
    Ok(cursor.into_inner())
}

/// Decode a `data:image/png;base64,…` canvas snapshot and check that the
/// payload really is a PNG. Bare base64 without the data-URL prefix is
/// accepted too.
pub fn decode_png_data_url(data_url: &str) -> Result<Vec<u8>, ExportError> {
    let payload = match data_url.split_once(',') {
        Some((header, body)) if header.starts_with("data:") => {
            if !header.ends_with(";base64") {
                return Err(ExportError::Archive(format!(
                    "snapshot is not base64 encoded ({header})"
                )));
            }
            body
        }
        _ => data_url,
    };

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|err| ExportError::Archive(format!("snapshot is not valid base64: {err}")))?;
    png::Decoder::new(bytes.as_slice())
        .read_info()
        .map_err(|err| ExportError::Archive(format!("snapshot is not a PNG: {err}")))?;
    Ok(bytes)
}
