use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use log::{debug, warn};
use serde_json::Value;

use crate::model::form;
use crate::model::storage::{self, Kind, Label};

const STORE_PATH: &str = "~/.config/credbook/accounts.json";

// The whole account list lives in memory and is rewritten to disk on every change
pub struct Store {
    path: PathBuf,
    accounts: Vec<form::Account>,
}

impl Store {
    pub fn open_default() -> Result<Store> {
        Ok(Store::open(default_path()?))
    }

    // Anything unreadable counts as an empty list, there is no fatal path here
    pub fn open(path: PathBuf) -> Store {
        let accounts = match read_if_found(&path) {
            Ok(Some(raw)) => decode(&raw),
            Ok(None) => vec![],
            Err(e) => {
                warn!("Error reading account store, starting empty: {}", e);
                vec![]
            }
        };
        debug!("Loaded {} accounts from {:?}", accounts.len(), path);
        Store { path, accounts }
    }

    pub fn accounts(&self) -> &[form::Account] {
        &self.accounts
    }

    pub fn get(&self, id: i64) -> Option<&form::Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    pub fn add(&mut self) -> Result<i64> {
        let id = self.next_id();
        self.accounts.push(form::Account::blank(id));
        self.save()?;
        Ok(id)
    }

    pub fn remove(&mut self, id: i64) -> Result<bool> {
        let before = self.accounts.len();
        self.accounts.retain(|a| a.id != id);
        if self.accounts.len() == before {
            warn!("No account with id {} to remove", id);
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    // Replaces the stored account whole, flags included, and reports validity.
    // An invalid account is still stored, same as a half filled form.
    pub fn update(&mut self, mut account: form::Account) -> Result<bool> {
        let valid = account.validate();
        match self.accounts.iter_mut().find(|a| a.id == account.id) {
            Some(slot) => *slot = account,
            None => {
                warn!("No account with id {} to update", account.id);
                return Ok(false);
            }
        }
        self.save()?;
        Ok(valid)
    }

    // Creation timestamp, bumped past any id already taken
    fn next_id(&self) -> i64 {
        let mut id = now_millis();
        while self.accounts.iter().any(|a| a.id == id) {
            id += 1;
        }
        id
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Error ensuring path {:?} exists", parent))?;
        }
        let records: Vec<storage::Account> = self.accounts.iter().map(storage::Account::from).collect();
        let records = serde_json::to_string(&records)?;
        debug!("Saving {} accounts to {:?}", self.accounts.len(), self.path);
        std::fs::write(&self.path, records)
            .with_context(|| "Error writing account store")
    }
}

fn read_if_found(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(&path) {
        Ok(c) => Ok(Some(c)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

// Anything that doesn't look like an account list yields an empty one
fn decode(raw: &str) -> Vec<form::Account> {
    let parsed: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            warn!("Error de-serialising account store, starting empty: {}", e);
            return vec![];
        }
    };
    let entries = match parsed {
        Value::Array(entries) => entries,
        _ => {
            warn!("Account store is not a list, starting empty");
            return vec![];
        }
    };
    entries.iter().filter_map(decode_entry).collect()
}

// Coerce one stored entry field by field. Entries that aren't objects are dropped.
fn decode_entry(entry: &Value) -> Option<form::Account> {
    let entry = entry.as_object()?;
    Some(form::Account {
        id: entry.get("id").and_then(Value::as_i64).unwrap_or_else(now_millis),
        labels: decode_labels(entry.get("labels")),
        kind: entry
            .get("type")
            .and_then(Value::as_str)
            .and_then(Kind::from_tag)
            .unwrap_or(Kind::Local),
        login: entry.get("login").and_then(Value::as_str).unwrap_or("").to_owned(),
        password: entry.get("password").and_then(Value::as_str).map(str::to_owned),
        labels_text: entry.get("labelsText").and_then(Value::as_str).map(str::to_owned),
        errors: form::FieldErrors::default(),
    })
}

fn decode_labels(labels: Option<&Value>) -> Vec<Label> {
    match labels {
        // Early stores kept the raw label line instead of a list
        Some(Value::String(line)) => form::parse_labels(line),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| Label {
                text: item.get("text").and_then(Value::as_str).unwrap_or("").trim().to_owned(),
            })
            .collect(),
        _ => vec![],
    }
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

fn default_path() -> Result<PathBuf> {
    let path = shellexpand::full(STORE_PATH)
        .with_context(|| format!("Store path {} is invalid", STORE_PATH))?;
    Ok(PathBuf::from(path.as_ref()))
}
