//! JSON file store for saved scenarios
//!
//! The file is a plain array of scenarios in insertion order. Writes go to a
//! temp file first and are renamed into place.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use super::SavedScenario;
use crate::error::{GrowthError, GrowthResult};
use crate::params::CalculationParams;

/// File name of the store inside the data directory
pub const SCENARIOS_FILE: &str = "scenarios.json";

/// Saved scenarios backed by a JSON file
#[derive(Debug, Clone)]
pub struct ScenarioStore {
    path: PathBuf,
    scenarios: Vec<SavedScenario>,
}

impl ScenarioStore {
    /// Open the store at `path`.
    ///
    /// A missing file yields an empty store. A file that cannot be parsed is
    /// logged and also yields an empty store; it is only replaced on the
    /// next `save`.
    pub fn open<P: AsRef<Path>>(path: P) -> GrowthResult<Self> {
        let path = path.as_ref().to_path_buf();

        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No scenario file at {}, starting empty", path.display());
                return Ok(Self { path, scenarios: Vec::new() });
            }
            Err(e) => {
                return Err(GrowthError::Storage(format!(
                    "Failed to open {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let scenarios = match serde_json::from_reader(BufReader::new(file)) {
            Ok(scenarios) => scenarios,
            Err(e) => {
                log::warn!("Failed to parse saved scenarios in {}: {}", path.display(), e);
                Vec::new()
            }
        };

        Ok(Self { path, scenarios })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Scenarios in insertion order
    pub fn scenarios(&self) -> &[SavedScenario] {
        &self.scenarios
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&SavedScenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    /// Add a scenario stamped with the current time
    pub fn add(&mut self, name: &str, params: CalculationParams) -> &SavedScenario {
        self.add_at(name, params, Utc::now())
    }

    /// Add a scenario with an explicit creation time.
    ///
    /// A blank name becomes "Scenario N" where N is one past the current
    /// count. The id is the creation millisecond, moved forward until it is
    /// unique within the store.
    pub fn add_at(
        &mut self,
        name: &str,
        params: CalculationParams,
        created_at: DateTime<Utc>,
    ) -> &SavedScenario {
        let name = match name.trim() {
            "" => format!("Scenario {}", self.scenarios.len() + 1),
            n => n.to_string(),
        };

        let mut millis = created_at.timestamp_millis();
        while self.get(&millis.to_string()).is_some() {
            millis += 1;
        }

        log::info!("Saving scenario '{}' ({})", name, millis);
        self.scenarios.push(SavedScenario {
            id: millis.to_string(),
            name,
            params,
            created_at,
        });

        let last = self.scenarios.len() - 1;
        &self.scenarios[last]
    }

    /// Remove a scenario by id, returning it
    pub fn delete(&mut self, id: &str) -> GrowthResult<SavedScenario> {
        let idx = self
            .scenarios
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| GrowthError::ScenarioNotFound(id.to_string()))?;

        let removed = self.scenarios.remove(idx);
        log::info!("Deleted scenario '{}' ({})", removed.name, removed.id);
        Ok(removed)
    }

    /// Write the store to disk atomically
    pub fn save(&self) -> GrowthResult<()> {
        write_json_atomic(&self.path, &self.scenarios)
    }
}

fn write_json_atomic<T: serde::Serialize>(path: &Path, data: &T) -> GrowthResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                GrowthError::Storage(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let temp_path = path.with_extension("json.tmp");
    let file = File::create(&temp_path)
        .map_err(|e| GrowthError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        GrowthError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).unwrap()
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = ScenarioStore::open(dir.path().join(SCENARIOS_FILE)).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_blank_names_get_defaults() {
        let dir = TempDir::new().unwrap();
        let mut store = ScenarioStore::open(dir.path().join(SCENARIOS_FILE)).unwrap();

        store.add_at("Aggressive Growth", CalculationParams::default(), at(1_000));
        let second = store.add_at("   ", CalculationParams::default(), at(2_000));
        assert_eq!(second.name, "Scenario 2");
        assert_eq!(second.id, "2000");
    }

    #[test]
    fn test_ids_unique_within_same_millisecond() {
        let dir = TempDir::new().unwrap();
        let mut store = ScenarioStore::open(dir.path().join(SCENARIOS_FILE)).unwrap();

        store.add_at("a", CalculationParams::default(), at(5_000));
        store.add_at("b", CalculationParams::default(), at(5_000));
        store.add_at("c", CalculationParams::default(), at(5_000));

        let ids: Vec<&str> = store.scenarios().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["5000", "5001", "5002"]);
    }

    #[test]
    fn test_save_and_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join(SCENARIOS_FILE);
        let mut store = ScenarioStore::open(&path).unwrap();

        let params = CalculationParams::new(2_000.0, 100.0, 6.0, 2.0, 15, 4);
        store.add_at("Quarterly", params, at(1_700_000_000_123));
        store.save().unwrap();

        let reopened = ScenarioStore::open(&path).unwrap();
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.scenarios()[0].params, params);
        assert_eq!(reopened.scenarios()[0].created_at, at(1_700_000_000_123));
        assert!(!path.with_extension("json.tmp").exists());

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"createdAt\": 1700000000123"));
        assert!(raw.contains("\"compoundFrequency\": 4"));
    }

    #[test]
    fn test_delete() {
        let dir = TempDir::new().unwrap();
        let mut store = ScenarioStore::open(dir.path().join(SCENARIOS_FILE)).unwrap();
        store.add_at("keep", CalculationParams::default(), at(1));
        store.add_at("drop", CalculationParams::default(), at(2));

        let removed = store.delete("2").unwrap();
        assert_eq!(removed.name, "drop");
        assert_eq!(store.len(), 1);
        assert!(matches!(store.delete("2"), Err(GrowthError::ScenarioNotFound(_))));
    }

    #[test]
    fn test_corrupt_file_opens_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SCENARIOS_FILE);
        fs::write(&path, "{not json").unwrap();

        let store = ScenarioStore::open(&path).unwrap();
        assert!(store.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "{not json");
    }

    #[test]
    fn test_reads_browser_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SCENARIOS_FILE);
        fs::write(
            &path,
            r#"[{"id":"1700000000000","name":"My Strategy","createdAt":1700000000000,
                "params":{"initialPrincipal":10000,"monthlyContribution":500,"interestRate":7,
                          "inflationRate":2.5,"years":20,"compoundFrequency":12}}]"#,
        )
        .unwrap();

        let store = ScenarioStore::open(&path).unwrap();
        let scenario = store.get("1700000000000").unwrap();
        assert_eq!(scenario.name, "My Strategy");
        assert_eq!(scenario.params, CalculationParams::default());
    }
}
