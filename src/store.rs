// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::models::{Budget, Goal, RecurringTemplate, Settings, Transaction};

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Billfold", "billfold"));

/// Fixed logical keys. Each key maps to one JSON file; writes to different
/// keys are independent and non-atomic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Transactions,
    Budgets,
    Goals,
    Recurring,
    Settings,
}

impl Key {
    pub const ALL: [Key; 5] = [
        Key::Transactions,
        Key::Budgets,
        Key::Goals,
        Key::Recurring,
        Key::Settings,
    ];

    fn file_name(self) -> &'static str {
        match self {
            Key::Transactions => "transactions.json",
            Key::Budgets => "budgets.json",
            Key::Goals => "goals.json",
            Key::Recurring => "recurring.json",
            Key::Settings => "settings.json",
        }
    }
}

pub fn data_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    Ok(proj.data_dir().to_path_buf())
}

/// Directory-backed JSON store. A read that fails for any reason yields the
/// collection default so one corrupted file never takes the program down.
pub struct Store {
    root: PathBuf,
}

impl Store {
    pub fn open(root: impl Into<PathBuf>) -> Result<Store> {
        let root = root.into();
        fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create data dir {}", root.display()))?;
        Ok(Store { root })
    }

    pub fn open_default() -> Result<Store> {
        Store::open(data_dir()?)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, key: Key) -> PathBuf {
        self.root.join(key.file_name())
    }

    pub fn load<T: DeserializeOwned + Default>(&self, key: Key) -> T {
        let path = self.path(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return T::default(),
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "unreadable store file, starting empty");
                return T::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "malformed store file, starting empty");
                T::default()
            }
        }
    }

    /// Writes go through a temp file and rename so a failed save leaves the
    /// previous content intact.
    pub fn save<T: Serialize>(&self, key: Key, value: &T) -> Result<()> {
        let path = self.path(key);
        let tmp = path.with_extension("json.tmp");
        let body = serde_json::to_vec_pretty(value)?;
        fs::write(&tmp, body).with_context(|| format!("Write {}", tmp.display()))?;
        fs::rename(&tmp, &path).with_context(|| format!("Replace {}", path.display()))?;
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        for key in Key::ALL {
            let path = self.path(key);
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(e).with_context(|| format!("Remove {}", path.display()));
                }
            }
        }
        Ok(())
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.load(Key::Transactions)
    }

    pub fn save_transactions(&self, transactions: &[Transaction]) -> Result<()> {
        self.save(Key::Transactions, &transactions)
    }

    pub fn budgets(&self) -> Vec<Budget> {
        self.load(Key::Budgets)
    }

    pub fn save_budgets(&self, budgets: &[Budget]) -> Result<()> {
        self.save(Key::Budgets, &budgets)
    }

    pub fn goals(&self) -> Vec<Goal> {
        self.load(Key::Goals)
    }

    pub fn save_goals(&self, goals: &[Goal]) -> Result<()> {
        self.save(Key::Goals, &goals)
    }

    pub fn templates(&self) -> Vec<RecurringTemplate> {
        self.load(Key::Recurring)
    }

    pub fn save_templates(&self, templates: &[RecurringTemplate]) -> Result<()> {
        self.save(Key::Recurring, &templates)
    }

    pub fn settings(&self) -> Settings {
        self.load(Key::Settings)
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        self.save(Key::Settings, settings)
    }
}
