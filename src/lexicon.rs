use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LexiconError {
    #[error("failed to read lexicon file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to write lexicon file {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse lexicon file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("failed to serialize lexicon to {path}: {source}")]
    Serialize {
        path: String,
        source: serde_json::Error,
    },
}

/// Category -> GLOSS -> relative video path. BTreeMaps keep category and
/// sign iteration order stable, so anything grouping signs downstream sees
/// the same order on every run.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct SignLexicon {
    #[serde(flatten)]
    categories: BTreeMap<String, BTreeMap<String, String>>,
}

impl SignLexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the lexicon dictionary from a JSON file. A missing file yields
    /// an empty lexicon, matching first-run behavior before any signs have
    /// been recorded.
    pub fn load(path: &Path) -> Result<Self, LexiconError> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let file = File::open(path).map_err(|e| LexiconError::Read {
            path: format!("{:?}", path),
            source: e,
        })?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| LexiconError::Parse {
            path: format!("{:?}", path),
            source: e,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), LexiconError> {
        let file = File::create(path).map_err(|e| LexiconError::Write {
            path: format!("{:?}", path),
            source: e,
        })?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self).map_err(|e| LexiconError::Serialize {
            path: format!("{:?}", path),
            source: e,
        })
    }

    /// Resolves a gloss token to a local video asset path under `asset_root`.
    /// The lookup is flattened across categories in order; the path is only
    /// returned when the asset file actually exists on disk, so a stale
    /// dictionary entry reads as a missing sign rather than a broken player.
    pub fn resolve(&self, gloss: &str, asset_root: &Path) -> Option<PathBuf> {
        let gloss = gloss.to_uppercase();
        for signs in self.categories.values() {
            if let Some(rel_path) = signs.get(&gloss) {
                let local = asset_root.join(rel_path);
                if local.exists() {
                    return Some(local);
                }
                // Dictionary knows the sign but the asset is not local yet.
                return None;
            }
        }
        None
    }

    /// True when the gloss appears in any category, whether or not its
    /// asset is present locally.
    pub fn contains(&self, gloss: &str) -> bool {
        let gloss = gloss.to_uppercase();
        self.categories.values().any(|signs| signs.contains_key(&gloss))
    }

    /// Registers a sign video under a category and persists the dictionary.
    pub fn add_local_sign(
        &mut self,
        gloss: &str,
        category: &str,
        relative_path: &str,
        dict_path: &Path,
    ) -> Result<(), LexiconError> {
        self.categories
            .entry(category.to_string())
            .or_default()
            .insert(gloss.to_uppercase(), relative_path.to_string());
        self.save(dict_path)
    }

    /// Categories in stable (sorted) order, with their sign counts.
    pub fn category_summary(&self) -> Vec<(String, usize)> {
        self.categories
            .iter()
            .map(|(name, signs)| (name.clone(), signs.len()))
            .collect()
    }
}
