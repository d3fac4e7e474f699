use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProgressError {
    #[error("progress snapshot not found at {0}")]
    NotFound(String),
    #[error("failed to open progress snapshot {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse progress snapshot {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("failed to serialize progress snapshot to {path}: {source}")]
    Serialize {
        path: String,
        source: serde_json::Error,
    },
}

/// How well the learner knows one sign.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MasteryLevel {
    #[default]
    New,
    Learning,
    Mastered,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SignRecord {
    pub category: String,
    pub level: MasteryLevel,
    /// Unix seconds of the last practice session.
    pub last_practiced: u64,
}

/// Feedback captured while offline, held until a sync pass uploads it.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FeedbackEntry {
    pub sign_name: String,
    pub province: String,
    pub description: String,
    pub created_at: u64,
    pub synced: bool,
}

/// Per-sign mastery state plus the offline feedback queue. Persisted as a
/// single JSON snapshot file.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ProgressTracker {
    mastery: HashMap<String, SignRecord>,
    feedback_queue: Vec<FeedbackEntry>,
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upserts a sign's mastery level, refreshing its last-practiced stamp.
    pub fn update_mastery(&mut self, sign_name: &str, category: &str, level: MasteryLevel) {
        let key = sign_name.to_uppercase();
        self.mastery.insert(
            key,
            SignRecord {
                category: category.to_string(),
                level,
                last_practiced: unix_now(),
            },
        );
    }

    pub fn mastery_of(&self, sign_name: &str) -> Option<&SignRecord> {
        self.mastery.get(&sign_name.to_uppercase())
    }

    /// Signs past the New level, counted per category. Ordered map so the
    /// progress display is stable between runs.
    pub fn progress_by_category(&self) -> BTreeMap<String, u32> {
        let mut counts: BTreeMap<String, u32> = BTreeMap::new();
        for record in self.mastery.values() {
            if record.level != MasteryLevel::New {
                *counts.entry(record.category.clone()).or_insert(0) += 1;
            }
        }
        counts
    }

    pub fn queue_feedback(&mut self, sign_name: &str, province: &str, description: &str) {
        self.feedback_queue.push(FeedbackEntry {
            sign_name: sign_name.to_uppercase(),
            province: province.to_string(),
            description: description.to_string(),
            created_at: unix_now(),
            synced: false,
        });
    }

    pub fn unsynced_feedback(&self) -> Vec<&FeedbackEntry> {
        self.feedback_queue.iter().filter(|f| !f.synced).collect()
    }

    /// Marks every queued entry as uploaded.
    pub fn mark_all_synced(&mut self) {
        for entry in &mut self.feedback_queue {
            entry.synced = true;
        }
    }

    pub fn save_snapshot(&self, path: &Path) -> Result<(), ProgressError> {
        let file = File::create(path).map_err(|e| ProgressError::Io {
            path: format!("{:?}", path),
            source: e,
        })?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self).map_err(|e| ProgressError::Serialize {
            path: format!("{:?}", path),
            source: e,
        })
    }

    pub fn load_snapshot(path: &Path) -> Result<Self, ProgressError> {
        if !path.exists() {
            return Err(ProgressError::NotFound(format!("{:?}", path)));
        }
        let file = File::open(path).map_err(|e| ProgressError::Io {
            path: format!("{:?}", path),
            source: e,
        })?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| ProgressError::Parse {
            path: format!("{:?}", path),
            source: e,
        })
    }

    /// Loads the snapshot if one exists, otherwise starts fresh. First-run
    /// convenience for the CLI.
    pub fn load_or_default(path: &Path) -> Result<Self, ProgressError> {
        match Self::load_snapshot(path) {
            Ok(tracker) => Ok(tracker),
            Err(ProgressError::NotFound(_)) => Ok(Self::new()),
            Err(e) => Err(e),
        }
    }
}
