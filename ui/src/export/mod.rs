//! Export serializer: turns a session into a zip holding the JSON log plus
//! one PNG per captured canvas, then hands it to a [`DownloadSink`].
//!
//! Building the bundle only reads the session. A failed export leaves the
//! in-memory log untouched and can simply be retried.

use core::fmt;

use crate::core::timing::Clock;
use crate::experiment::{ExperimentLog, ExperimentPattern, ExperimentSession};

mod archive;
mod delivery;

pub use archive::{build_archive, decode_png_data_url, ArchiveEntry};
pub use delivery::{ClipboardSink, DownloadSink, FileDownload, SystemClipboard};

pub const ARCHIVE_MIME: &str = "application/zip";
const ANONYMOUS: &str = "anonymous";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    Serialize(String),
    Archive(String),
    Delivery(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serialize(msg) => write!(f, "could not serialise the log: {msg}"),
            Self::Archive(msg) => write!(f, "could not build the archive: {msg}"),
            Self::Delivery(msg) => write!(f, "could not deliver the export: {msg}"),
        }
    }
}

impl std::error::Error for ExportError {}

/// A ready-to-deliver archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportBundle {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub entry_names: Vec<String>,
    /// Patterns whose snapshot could not be decoded and were left out.
    pub skipped_snapshots: Vec<ExperimentPattern>,
}

/// Participant id reduced to characters safe in a file name. Letters and
/// digits from any script survive; separators, dots, whitespace and control
/// characters do not.
pub fn participant_slug(participant_id: &str) -> String {
    let slug: String = participant_id
        .trim()
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '-' | '_'))
        .collect();
    if slug.is_empty() {
        ANONYMOUS.to_string()
    } else {
        slug
    }
}

pub fn log_file_name(participant_id: &str) -> String {
    format!("log_{}.json", participant_slug(participant_id))
}

pub fn archive_file_name(participant_id: &str) -> String {
    format!("experiment_{}.zip", participant_slug(participant_id))
}

pub fn canvas_file_name(pattern: ExperimentPattern) -> String {
    format!("{}_canvas.png", pattern.id())
}

/// Serialise the session log and collect every decodable snapshot into a zip.
pub fn build_bundle<C: Clock>(session: &ExperimentSession<C>) -> Result<ExportBundle, ExportError> {
    let log = session.experiment_log();
    let mut entries = vec![log_entry(&log)?];
    let mut skipped_snapshots = Vec::new();

    for condition in session.condition_logs() {
        let Some(image) = condition.canvas_image.as_deref() else {
            continue;
        };
        match decode_png_data_url(image) {
            Ok(png) => entries.push(ArchiveEntry::new(canvas_file_name(condition.pattern), png)),
            Err(err) => {
                log::error!("Leaving {} snapshot out of the archive: {err}", condition.pattern);
                skipped_snapshots.push(condition.pattern);
            }
        }
    }

    let bytes = build_archive(&entries)?;
    Ok(ExportBundle {
        file_name: archive_file_name(&log.participant_id),
        bytes,
        entry_names: entries.into_iter().map(|entry| entry.name).collect(),
        skipped_snapshots,
    })
}

/// Archive holding only the JSON log, for a log restored from local storage
/// where the canvas snapshots are no longer available.
pub fn build_log_bundle(log: &ExperimentLog) -> Result<ExportBundle, ExportError> {
    let entries = vec![log_entry(log)?];
    Ok(ExportBundle {
        file_name: archive_file_name(&log.participant_id),
        bytes: build_archive(&entries)?,
        entry_names: entries.into_iter().map(|entry| entry.name).collect(),
        skipped_snapshots: Vec::new(),
    })
}

fn log_entry(log: &ExperimentLog) -> Result<ArchiveEntry, ExportError> {
    let json =
        serde_json::to_string_pretty(log).map_err(|err| ExportError::Serialize(err.to_string()))?;
    Ok(ArchiveEntry::new(log_file_name(&log.participant_id), json.into_bytes()))
}

/// Build the archive and deliver it. Returns a user-facing status line.
pub async fn export_log<C, S>(session: &ExperimentSession<C>, sink: &S) -> Result<String, ExportError>
where
    C: Clock,
    S: DownloadSink,
{
    let outcome = match build_bundle(session) {
        Ok(bundle) => deliver_bundle(bundle, sink).await,
        Err(err) => Err(err),
    };
    if let Err(err) = &outcome {
        log::error!("Export failed: {err}");
    }
    outcome
}

/// Second half of [`export_log`], for callers that build the bundle while
/// holding a borrow of the session and deliver it later.
pub async fn deliver_bundle<S: DownloadSink>(
    bundle: ExportBundle,
    sink: &S,
) -> Result<String, ExportError> {
    let ExportBundle {
        file_name,
        bytes,
        entry_names,
        skipped_snapshots,
    } = bundle;
    let size = bytes.len();
    let saved = sink.deliver(&file_name, ARCHIVE_MIME, bytes).await?;
    log::info!(
        "Exported {file_name} ({size} bytes, {} entries)",
        entry_names.len()
    );

    let mut message = match saved {
        Some(path) => format!("Archive saved to {path}"),
        None => format!("{file_name} download started"),
    };
    if !skipped_snapshots.is_empty() {
        message.push_str(&format!(
            " ({} canvas snapshot(s) could not be read)",
            skipped_snapshots.len()
        ));
    }
    Ok(message)
}
