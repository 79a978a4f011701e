use crate::errors::{AppError, AppResult};
use crate::widget::snapshot::{SnapshotFormat, WidgetSnapshot};
use std::fs;
use std::path::{Path, PathBuf};

/// Destination of snapshots written on every check-in/check-out.
pub trait SnapshotSink {
    /// Replace the published snapshot as a whole.
    fn publish(&mut self, snapshot: &WidgetSnapshot) -> AppResult<()>;
}

/// Shared JSON file read by the display surface.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotSink for FileSink {
    fn publish(&mut self, snapshot: &WidgetSnapshot) -> AppResult<()> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }

        // Write aside, then rename: readers see the old or the new file, never half of one.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, snapshot.to_json()?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Keeps every published snapshot in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub published: Vec<WidgetSnapshot>,
}

impl MemorySink {
    pub fn last(&self) -> Option<&WidgetSnapshot> {
        self.published.last()
    }
}

impl SnapshotSink for MemorySink {
    fn publish(&mut self, snapshot: &WidgetSnapshot) -> AppResult<()> {
        self.published.push(snapshot.clone());
        Ok(())
    }
}

/// Read the snapshot at `path`.
///
/// A missing file and an undecodable one are both reported as `AppError::Snapshot`.
pub fn read_snapshot(path: &Path, canonical: SnapshotFormat) -> AppResult<WidgetSnapshot> {
    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::Snapshot(format!("{}: {}", path.display(), e)))?;
    WidgetSnapshot::decode(&raw, canonical)
}
