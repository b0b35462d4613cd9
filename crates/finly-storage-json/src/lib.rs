//! finly-storage-json
//!
//! Filesystem JSON persistence for the finance store. One snapshot file holds
//! the record tables; every committed session rewrites it through a temp file
//! and rename, so a crash mid-write never leaves a torn store behind.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::Mutex,
};

use finly_config::Config;
use finly_core::{
    store::{FinanceStore, StoreSession, Tables},
    CoreError,
};
use finly_domain::{Budget, Goal, Transaction};
use serde::{Deserialize, Serialize};

const STORE_FILE: &str = "finance.json";
const TMP_SUFFIX: &str = "tmp";

/// Filesystem-backed store. A mutex serializes sessions; each session runs
/// against a staged copy of the tables and is persisted before it becomes
/// visible to other callers.
pub struct JsonFinanceStore {
    path: PathBuf,
    tables: Mutex<Tables>,
}

impl JsonFinanceStore {
    pub fn new(data_dir: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&data_dir)?;
        let path = data_dir.join(STORE_FILE);
        let tables = if path.exists() {
            load_tables(&path)?
        } else {
            Tables::default()
        };
        Ok(Self {
            path,
            tables: Mutex::new(tables),
        })
    }

    /// Opens the store under the configured (or default) data root.
    pub fn with_config(config: &Config) -> Result<Self, CoreError> {
        Self::new(config.resolve_data_root())
    }

    pub fn store_path(&self) -> &Path {
        &self.path
    }
}

impl FinanceStore for JsonFinanceStore {
    fn transact<R>(
        &self,
        op: impl FnOnce(&mut dyn StoreSession) -> Result<R, CoreError>,
    ) -> Result<R, CoreError> {
        let mut guard = self
            .tables
            .lock()
            .map_err(|_| CoreError::Conflict("finance store mutex poisoned".into()))?;
        let mut staged = guard.clone();
        let result = op(&mut staged)?;
        // Durable commit first; only then does the session become visible.
        persist_tables(&self.path, &staged)?;
        *guard = staged;
        Ok(result)
    }
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    budgets: &'a [Budget],
    goals: &'a [Goal],
    transactions: &'a [Transaction],
}

#[derive(Deserialize)]
struct Snapshot {
    #[serde(default)]
    budgets: Vec<Budget>,
    #[serde(default)]
    goals: Vec<Goal>,
    #[serde(default)]
    transactions: Vec<Transaction>,
}

fn load_tables(path: &Path) -> Result<Tables, CoreError> {
    let data = fs::read_to_string(path)?;
    let snapshot: Snapshot =
        serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))?;
    Ok(Tables::from_parts(
        snapshot.budgets,
        snapshot.goals,
        snapshot.transactions,
    ))
}

fn persist_tables(path: &Path, tables: &Tables) -> Result<(), CoreError> {
    let snapshot = SnapshotRef {
        budgets: &tables.budgets,
        goals: &tables.goals,
        transactions: &tables.transactions,
    };
    let json =
        serde_json::to_string_pretty(&snapshot).map_err(|err| CoreError::Serde(err.to_string()))?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
