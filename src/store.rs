use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Fixed logical keys for everything the app persists.
pub mod keys {
    pub const PROFILE: &str = "profile";
    pub const MEAL_ANCHORS: &str = "meal-anchors";
    pub const MEDICATION_LIST: &str = "medication-list";
    pub const SURGERY_TYPE: &str = "surgery-type";
    pub const DIET_TARGETS: &str = "diet-targets";
    pub const DIET_INTAKE: &str = "diet-intake";
}

/// Key-value store backed by a single JSON file.
///
/// All patient state lives in one object mapping the fixed keys above to
/// JSON values. Everything is saved as plain JSON for easy import/export.
/// No data privacy beyond file permissions is implemented.
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Opens the store at its default location, `~/.nutricare.json`.
    ///
    /// Uses the `dirs` crate to locate the home directory across platforms,
    /// falling back to the current directory if none is found.
    pub fn open_default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Store {
            path: home.join(".nutricare.json"),
        }
    }

    /// Opens a store at an explicit path. Used by tests.
    pub fn at(path: PathBuf) -> Self {
        Store { path }
    }

    /// Reads a value for a key, deserialized into the caller's type.
    ///
    /// Returns `None` when the key is absent or its stored value does not
    /// match the expected shape (a warning is printed in that case).
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let mut entries = self.load();
        let value = entries.remove(key)?;
        match serde_json::from_value(value) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                eprintln!("Warning: Stored value for '{}' is unreadable: {}", key, e);
                None
            }
        }
    }

    /// Writes a value under a key, replacing any previous value.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        let json = match serde_json::to_value(value) {
            Ok(v) => v,
            Err(e) => {
                eprintln!("Error: Failed to serialize value for '{}': {}", key, e);
                return;
            }
        };

        let mut entries = self.load();
        entries.insert(key.to_string(), json);
        self.save(&entries);
    }

    /// Lists the keys currently present in the store.
    pub fn list(&self) -> Vec<String> {
        self.load().into_keys().collect()
    }

    /// Loads the full store contents from disk.
    ///
    /// A missing file is an empty store. If the file is corrupted it is
    /// backed up to `<file>.corrupted` and an empty store is returned.
    fn load(&self) -> BTreeMap<String, Value> {
        if !self.path.exists() {
            return BTreeMap::new();
        }

        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error: Failed to read data file: {}", e);
                eprintln!(
                    "Using empty data. Check file permissions on: {}",
                    self.path.display()
                );
                return BTreeMap::new();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(entries) => entries,
            Err(_) => {
                eprintln!("WARNING: Data file is corrupted and cannot be parsed!");
                eprintln!("File location: {}", self.path.display());

                let backup_path = self.path.with_extension("json.corrupted");
                if let Err(backup_err) = fs::copy(&self.path, &backup_path) {
                    eprintln!("Failed to create backup: {}", backup_err);
                } else {
                    eprintln!("Backup created at: {}", backup_path.display());
                }

                eprintln!("Starting with an empty data file.");
                BTreeMap::new()
            }
        }
    }

    /// Saves the full store contents to disk atomically.
    ///
    /// Writes to a temp file then renames over the target, so an interrupted
    /// save cannot corrupt the data. Sets permissions to 0600 on Unix.
    fn save(&self, entries: &BTreeMap<String, Value>) {
        let json = match serde_json::to_string_pretty(entries) {
            Ok(j) => j,
            Err(e) => {
                eprintln!("Error: Failed to serialize data: {}", e);
                return;
            }
        };

        let temp_path = self.path.with_extension("json.tmp");

        if let Err(e) = fs::write(&temp_path, &json) {
            eprintln!("Error: Failed to write temporary file: {}", e);
            return;
        }

        // Rename is atomic on POSIX systems
        if let Err(e) = fs::rename(&temp_path, &self.path) {
            eprintln!("Error: Failed to save data file: {}", e);
            let _ = fs::remove_file(&temp_path);
            return;
        }

        #[cfg(unix)]
        {
            if let Ok(metadata) = fs::metadata(&self.path) {
                let mut perms = metadata.permissions();
                perms.set_mode(0o600);
                if let Err(e) = fs::set_permissions(&self.path, perms) {
                    eprintln!("Warning: Failed to set file permissions: {}", e);
                }
            }
        }
    }
}
