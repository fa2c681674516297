//! JSON file option store

use super::{KeyRegistrations, OptionStore, RegisteredKey};
use crate::config::Sanitize;
use crate::error::{Error, Result};
use crate::sync::RwLockExt;
use log::{debug, info};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

type Options = BTreeMap<String, Value>;

/// Option store persisted as a single JSON object
///
/// The file is read on first access and cached. Every write rewrites the whole file through a
/// temp file and a rename, so a crash never leaves a half-written file behind.
///
/// # Example
///
/// ```rust,no_run
/// use optpage::{JsonFileStore, OptionStore};
/// use serde_json::json;
///
/// let store = JsonFileStore::new("~/.config/my-site/options.json");
/// store.set("option_key_3", json!(42))?;
/// # Ok::<(), optpage::Error>(())
/// ```
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    pretty: bool,
    cache: RwLock<Option<Options>>,
    registrations: KeyRegistrations,
}

impl JsonFileStore {
    /// Create a store backed by the given file
    ///
    /// Supports `~` expansion for home directory. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: expand_home(path.into()),
            pretty: true,
            cache: RwLock::new(None),
            registrations: KeyRegistrations::default(),
        }
    }

    /// Create a store at `options.json` in the system config directory for the app
    ///
    /// Falls back to the current directory when no config directory is known.
    pub fn in_config_dir(app_name: &str) -> Self {
        let dir = dirs::config_dir()
            .map(|d| d.join(app_name))
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(dir.join("options.json"))
    }

    /// Use compact JSON (no pretty printing)
    #[must_use]
    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Drop the cached contents so the next access re-reads the file
    ///
    /// Call this if the file was modified externally.
    pub fn invalidate_cache(&self) {
        *self.cache.write_recovered() = None;
    }

    fn load(&self) -> Result<Options> {
        if !self.path.exists() {
            debug!("Option file {} does not exist yet", self.path.display());
            return Ok(Options::new());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| Error::FileRead {
            path: self.path.clone(),
            source: e,
        })?;
        if content.trim().is_empty() {
            return Ok(Options::new());
        }

        let options: Options = serde_json::from_str(&content)?;
        info!(
            "Loaded {} options from {}",
            options.len(),
            self.path.display()
        );
        Ok(options)
    }

    fn write(&self, options: &Options) -> Result<()> {
        let content = if self.pretty {
            serde_json::to_string_pretty(options)?
        } else {
            serde_json::to_string(options)?
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| Error::DirectoryCreate {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let file_name = self.path.file_name().ok_or_else(|| {
            Error::Store(format!(
                "Invalid path '{}': must have a filename",
                self.path.display()
            ))
        })?;
        let mut temp_filename = file_name.to_os_string();
        temp_filename.push(".tmp");
        let temp_path = self.path.with_file_name(temp_filename);

        std::fs::write(&temp_path, &content).map_err(|e| Error::FileWrite {
            path: temp_path.clone(),
            source: e,
        })?;

        std::fs::rename(&temp_path, &self.path).map_err(|e| Error::FileWrite {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Run `f` against the loaded options, loading them first if needed
    fn with_options<T>(&self, f: impl FnOnce(&Options) -> T) -> Result<T> {
        if let Some(options) = self.cache.read_recovered().as_ref() {
            return Ok(f(options));
        }

        let mut cache = self.cache.write_recovered();
        if cache.is_none() {
            *cache = Some(self.load()?);
        }
        Ok(f(cache.get_or_insert_with(Options::new)))
    }

    /// Apply `f` to the options and persist the result
    fn update(&self, f: impl FnOnce(&mut Options)) -> Result<()> {
        let mut cache = self.cache.write_recovered();
        let mut options = match cache.take() {
            Some(options) => options,
            None => self.load()?,
        };
        f(&mut options);

        let written = self.write(&options);
        // Keep memory in line with what is on disk even if the write failed.
        *cache = if written.is_ok() { Some(options) } else { None };
        written
    }
}

impl OptionStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        self.with_options(|options| options.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        self.update(|options| {
            options.insert(key.to_string(), value);
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.update(|options| {
            options.remove(key);
        })
    }

    fn register_key(&self, group: &str, key: &str, sanitize: Sanitize) -> Result<()> {
        self.registrations.register(group, key, sanitize);
        Ok(())
    }

    fn registered_keys(&self, group: &str) -> Result<Vec<RegisteredKey>> {
        Ok(self.registrations.in_group(group))
    }

    fn backend_name(&self) -> &'static str {
        "json-file"
    }
}

fn expand_home(path: PathBuf) -> PathBuf {
    if path.starts_with("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(path.strip_prefix("~").unwrap_or(&path));
        }
    }
    path
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_roundtrip_across_instances() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("subdir/options.json");

        {
            let store = JsonFileStore::new(&path);
            store.set("option_key_3", json!(42)).unwrap();
            store.set("option_key_4", json!("hello")).unwrap();
        }

        let store = JsonFileStore::new(&path);
        assert_eq!(store.get("option_key_3").unwrap(), Some(json!(42)));
        assert_eq!(store.get("option_key_4").unwrap(), Some(json!("hello")));
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("none.json"));

        assert_eq!(store.get("anything").unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_remove_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("options.json");
        let store = JsonFileStore::new(&path).compact();

        store.set("a", json!("1")).unwrap();
        store.remove("a").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "{}");
        assert!(!dir.path().join("options.json.tmp").exists());
    }

    #[test]
    fn test_invalidate_cache_rereads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("options.json");
        let store = JsonFileStore::new(&path);
        store.set("a", json!("old")).unwrap();

        std::fs::write(&path, r#"{"a": "new"}"#).unwrap();
        assert_eq!(store.get("a").unwrap(), Some(json!("old")));

        store.invalidate_cache();
        assert_eq!(store.get("a").unwrap(), Some(json!("new")));
    }

    #[test]
    fn test_corrupted_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("options.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(store.get("a"), Err(Error::Serialize(_))));
    }
}
