//! JSON persistence for probe datasets and the measurement log.
//!
//! Datasets are whole files: fully read, fully overwritten, never
//! mutated in place. Overwrites go through a tempfile in the target
//! directory followed by a rename, so a crash mid-write leaves the
//! previous file intact. The measurement log is the one append-shaped
//! file: read, extended, rewritten.

use netmet_api::{MeasurementRecord, NmError, NmResult, ProbeRecord};
use std::path::Path;

/// Load any JSON document from a file.
///
/// A missing file is reported with [NmError::is_absent] returning true,
/// which the probe selector uses to fall back to the correction
/// datasets.
pub fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> NmResult<T> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        NmError::io_src(format!("failed to read {}", path.display()), e)
    })?;

    serde_json::from_str(&content).map_err(|e| {
        NmError::io_src(format!("failed to decode {}", path.display()), e)
    })
}

/// Overwrite a file with a JSON document, via tempfile-then-rename.
pub fn dump_json<T: serde::Serialize>(path: &Path, value: &T) -> NmResult<()> {
    use std::io::Write;

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| {
        NmError::io_src(format!("failed to create {}", dir.display()), e)
    })?;

    let encoded = serde_json::to_vec(value)
        .map_err(|e| NmError::io_src("failed to encode json", e))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| {
        NmError::io_src(format!("failed to create tempfile in {}", dir.display()), e)
    })?;
    tmp.write_all(&encoded).map_err(|e| {
        NmError::io_src(format!("failed to write {}", path.display()), e)
    })?;
    tmp.as_file().sync_data().map_err(|e| {
        NmError::io_src(format!("failed to sync {}", path.display()), e)
    })?;
    tmp.persist(path).map_err(|e| {
        NmError::io_src(
            format!("failed to persist {}", path.display()),
            e.error,
        )
    })?;

    Ok(())
}

/// Load an ordered probe dataset.
pub fn load_dataset(path: &Path) -> NmResult<Vec<ProbeRecord>> {
    load_json(path)
}

/// Overwrite an ordered probe dataset.
pub fn dump_dataset(path: &Path, records: &[ProbeRecord]) -> NmResult<()> {
    dump_json(path, &records)
}

/// Append one record to the measurement log, creating the log on
/// first use.
pub fn append_record(path: &Path, record: &MeasurementRecord) -> NmResult<()> {
    let mut log: Vec<MeasurementRecord> = match load_json(path) {
        Ok(log) => log,
        Err(err) if err.is_absent() => Vec::new(),
        Err(err) => return Err(err),
    };

    log.push(record.clone());

    dump_json(path, &log)
}
