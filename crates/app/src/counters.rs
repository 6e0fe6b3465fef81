//! Category counters persisted as a flat JSON object.
//!
//! Loaded at startup and written back on exit; nothing in the capture flow
//! reads or bumps them.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const COUNTERS_FILE: &str = "category_counters.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryCounters(BTreeMap<String, i64>);

impl CategoryCounters {
    /// Missing or corrupt files yield an empty map; errors are logged only.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match Self::read(path) {
            Ok(counters) => {
                log::info!("Loaded {} counters from {}", counters.len(), path.display());
                counters
            }
            Err(e) => {
                log::warn!("Error loading counters: {e:#}");
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string(&self.0).context("serialize counters")?;
        std::fs::write(path, json).with_context(|| format!("write {}", path.display()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
