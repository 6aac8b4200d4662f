use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::LinkError;
use crate::io_atomic;

use super::types::LinkRecord;

pub fn load(path: &Path) -> Vec<LinkRecord> {
    read_records(path).0
}

// Also reports whether any stored record lacked an id, so the caller can
// persist the ids assigned here.
fn read_records(path: &Path) -> (Vec<LinkRecord>, bool) {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return (Vec::new(), false),
        Err(e) => {
            warn!(path = %path.display(), "failed to read links file: {e}");
            return (Vec::new(), false);
        }
    };
    let records: Vec<LinkRecord> = match serde_json::from_slice(&bytes) {
        Ok(records) => records,
        Err(e) => {
            warn!(path = %path.display(), "links file is not a valid link list: {e}");
            return (Vec::new(), false);
        }
    };

    let missing_ids = records.iter().any(|r| r.id.trim().is_empty());
    let total = records.len();
    let records: Vec<LinkRecord> = records
        .into_iter()
        .filter_map(LinkRecord::validated)
        .collect();
    if records.len() != total {
        warn!(
            path = %path.display(),
            dropped = total - records.len(),
            "dropped stored links without a url"
        );
    }
    (records, missing_ids)
}

pub fn save(path: &Path, records: &[LinkRecord]) -> Result<(), String> {
    let bytes = serde_json::to_vec_pretty(records).map_err(|e| e.to_string())?;
    io_atomic::write_atomic(path, &bytes).map_err(|e| e.to_string())
}

pub struct LinkStore {
    path: PathBuf,
    records: Vec<LinkRecord>,
}

impl LinkStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (records, missing_ids) = read_records(&path);
        if missing_ids {
            match save(&path, &records) {
                Ok(()) => info!(path = %path.display(), "assigned ids to stored links"),
                Err(e) => warn!(path = %path.display(), "failed to persist assigned ids: {e}"),
            }
        }
        Self { path, records }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[LinkRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&LinkRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    // The whole list is rewritten before the in-memory copy changes, so a
    // failed write leaves both in their previous state.
    fn commit(&mut self, next: Vec<LinkRecord>) -> Result<(), LinkError> {
        save(&self.path, &next).map_err(LinkError::Store)?;
        self.records = next;
        Ok(())
    }

    pub fn add(&mut self, record: LinkRecord) -> Result<LinkRecord, LinkError> {
        let record = record.validated().ok_or(LinkError::EmptyInput)?;
        let mut next = self.records.clone();
        next.push(record.clone());
        self.commit(next)?;
        info!(id = %record.id, url = %record.url, "link added");
        Ok(record)
    }

    pub fn remove(&mut self, id: &str) -> Result<Option<LinkRecord>, LinkError> {
        let Some(index) = self.position(id) else {
            return Ok(None);
        };
        let mut next = self.records.clone();
        let removed = next.remove(index);
        self.commit(next)?;
        info!(id = %removed.id, url = %removed.url, "link removed");
        Ok(Some(removed))
    }
}
