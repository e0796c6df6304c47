use crate::result::ValidationResult;
use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// One saved QC check. Records are never modified once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    #[serde(alias = "email")]
    pub input_text: String,
    pub result: ValidationResult,
    pub timestamp: DateTime<Utc>,
}

impl HistoryRecord {
    pub fn new(input_text: &str, result: &ValidationResult) -> Self {
        Self {
            input_text: input_text.to_string(),
            result: result.clone(),
            timestamp: Utc::now(),
        }
    }
}

/// Append-only log of past results. Implementations treat every operation as
/// a whole-list replace; no concurrent writers are assumed.
pub trait HistoryStore: Send + Sync {
    fn append(&self, input_text: &str, result: &ValidationResult) -> Result<HistoryRecord>;
    /// All records in insertion order.
    fn list_all(&self) -> Result<Vec<HistoryRecord>>;
    fn clear(&self) -> Result<()>;
}

/// History kept as a single JSON array on disk.
pub struct JsonFileHistoryStore {
    path: PathBuf,
}

impl JsonFileHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<HistoryRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read history file: {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse history file: {}", self.path.display()))
    }

    /// Write through a sibling temp file so a failed write never truncates the history.
    fn store(&self, records: &[HistoryRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create history directory: {}", parent.display())
            })?;
        }

        let content = serde_json::to_string_pretty(records)?;
        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write history file: {}", tmp_path.display()))?;
        std::fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("Failed to replace history file: {}", self.path.display()))?;
        Ok(())
    }
}

impl HistoryStore for JsonFileHistoryStore {
    fn append(&self, input_text: &str, result: &ValidationResult) -> Result<HistoryRecord> {
        let mut records = self.load()?;
        let record = HistoryRecord::new(input_text, result);
        records.push(record.clone());
        self.store(&records)?;

        log::info!(
            "Saved QC result to {} ({} records)",
            self.path.display(),
            records.len()
        );
        Ok(record)
    }

    fn list_all(&self) -> Result<Vec<HistoryRecord>> {
        self.load()
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to clear history file: {}", self.path.display())
                })
            }
        }
        log::info!("Cleared QC history at {}", self.path.display());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryHistoryStore {
    records: Mutex<Vec<HistoryRecord>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for InMemoryHistoryStore {
    fn append(&self, input_text: &str, result: &ValidationResult) -> Result<HistoryRecord> {
        let record = HistoryRecord::new(input_text, result);
        self.records
            .lock()
            .map_err(|_| anyhow!("History lock poisoned"))?
            .push(record.clone());
        Ok(record)
    }

    fn list_all(&self) -> Result<Vec<HistoryRecord>> {
        Ok(self
            .records
            .lock()
            .map_err(|_| anyhow!("History lock poisoned"))?
            .clone())
    }

    fn clear(&self) -> Result<()> {
        self.records
            .lock()
            .map_err(|_| anyhow!("History lock poisoned"))?
            .clear();
        Ok(())
    }
}

/// Most recent first. Records sharing a timestamp keep reverse insertion order.
pub fn newest_first(mut records: Vec<HistoryRecord>) -> Vec<HistoryRecord> {
    records.reverse();
    records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    records
}

/// Case-insensitive substring match on the input text or the status word
/// ("valid"/"invalid"). A blank term matches everything; otherwise the term
/// is used as typed, surrounding spaces included.
pub fn search<'a>(records: &'a [HistoryRecord], term: &str) -> Vec<&'a HistoryRecord> {
    if term.trim().is_empty() {
        return records.iter().collect();
    }
    let term = term.to_lowercase();

    records
        .iter()
        .filter(|r| {
            r.input_text.to_lowercase().contains(&term) || r.result.status_word().contains(&term)
        })
        .collect()
}
