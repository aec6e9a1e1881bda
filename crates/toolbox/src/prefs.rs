//! Persisted preferences over a durable key/value store.
//!
//! A [`KvStore`] holds string values under string keys. [`Preference<T>`]
//! layers a typed, observable value on top: it is loaded once at
//! construction (falling back to a default when the key is missing or the
//! stored text does not parse) and written through on every mutation.
//!
//! Storage failures never reach the caller. Read failures yield the default,
//! write failures are logged and the in-memory value stays authoritative for
//! the rest of the session.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde_json::{Map, Value};
use tracing::{debug, warn};

// ── Store backends ─────────────────────────────────────────────────

/// A durable string key/value store.
pub trait KvStore: Send + Sync {
    /// Read the raw value for `key`. `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, String>;
    /// Write `value` under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), String>;
    /// Delete `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), String>;
    /// Delete every key.
    fn clear(&self) -> Result<(), String>;
}

/// Volatile store for tests and `--no-persist` runs.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), String> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.clear();
        Ok(())
    }
}

/// Store backed by a single JSON object file (`{"key": "value", ...}`).
///
/// The file is read once when the store is opened; an unreadable or
/// malformed file opens as an empty store. Booleans and numbers are kept as
/// their JSON text; nulls and nested values are dropped per key. Every write
/// rewrites the whole file atomically (temp file + rename).
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str::<Map<String, Value>>(&json) {
                Ok(map) => scalar_entries(&path, map),
                Err(e) => {
                    warn!(path = %path.display(), "Ignoring malformed preferences file: {e}");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!(path = %path.display(), "Failed to read preferences file: {e}");
                BTreeMap::new()
            }
        };
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), String> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            std::fs::create_dir_all(dir)
                .map_err(|e| format!("Failed to create preferences dir: {e}"))?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| format!("Failed to serialize preferences: {e}"))?;
        std::fs::write(&tmp_path, json)
            .map_err(|e| format!("Failed to write temp preferences: {e}"))?;
        std::fs::rename(&tmp_path, &self.path)
            .map_err(|e| format!("Failed to rename preferences: {e}"))?;
        Ok(())
    }
}

/// Keep every scalar entry as text; drop (and report) the rest.
fn scalar_entries(path: &Path, map: Map<String, Value>) -> BTreeMap<String, String> {
    let mut entries = BTreeMap::new();
    for (key, value) in map {
        match value {
            Value::String(s) => {
                entries.insert(key, s);
            }
            Value::Bool(_) | Value::Number(_) => {
                entries.insert(key, value.to_string());
            }
            Value::Null | Value::Array(_) | Value::Object(_) => {
                warn!(path = %path.display(), key = %key, "Ignoring non-scalar preference");
            }
        }
    }
    entries
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), String> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.clear();
        self.persist(&entries)
    }
}

// ── Typed values ───────────────────────────────────────────────────

/// Conversion between a preference value and its stored text.
///
/// `decode(&v.encode())` must give back `v`.
pub trait StoredValue: Sized {
    fn encode(&self) -> String;
    /// `None` when `raw` is not a valid representation.
    fn decode(raw: &str) -> Option<Self>;
}

impl StoredValue for bool {
    fn encode(&self) -> String {
        self.to_string()
    }

    fn decode(raw: &str) -> Option<Self> {
        match raw.trim() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }
}

impl StoredValue for String {
    fn encode(&self) -> String {
        self.clone()
    }

    fn decode(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

type Subscriber<T> = Box<dyn Fn(&T) + Send + Sync>;

/// A typed value mirrored into a [`KvStore`].
pub struct Preference<T> {
    key: String,
    value: T,
    store: Arc<dyn KvStore>,
    subscribers: Vec<Subscriber<T>>,
}

impl<T: StoredValue> Preference<T> {
    /// Load `key` from `store`, falling back to `default` when the key is
    /// missing, the stored text does not parse, or the read fails.
    pub fn load(store: Arc<dyn KvStore>, key: impl Into<String>, default: T) -> Self {
        let key = key.into();
        let value = match store.get(&key) {
            Ok(Some(raw)) => match T::decode(&raw) {
                Some(v) => v,
                None => {
                    debug!(key = %key, raw = %raw, "Stored preference did not parse; using default");
                    default
                }
            },
            Ok(None) => default,
            Err(e) => {
                warn!(key = %key, "Failed to read preference: {e}");
                default
            }
        };
        Self {
            key,
            value,
            store,
            subscribers: Vec::new(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replace the value, write it through, and notify subscribers.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.write_through();
        for subscriber in &self.subscribers {
            subscriber(&self.value);
        }
    }

    /// Mutate the value in place, then behave like [`set`](Self::set).
    pub fn update(&mut self, f: impl FnOnce(&mut T)) {
        f(&mut self.value);
        self.write_through();
        for subscriber in &self.subscribers {
            subscriber(&self.value);
        }
    }

    /// Register a callback run after every mutation with the new value.
    pub fn subscribe(&mut self, f: impl Fn(&T) + Send + Sync + 'static) {
        self.subscribers.push(Box::new(f));
    }

    fn write_through(&self) {
        if let Err(e) = self.store.set(&self.key, &self.value.encode()) {
            warn!(key = %self.key, "Failed to persist preference: {e}");
        }
    }
}

impl<T: Copy> Preference<T> {
    /// Copy out the current value.
    pub fn value(&self) -> T {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Store whose every operation fails.
    struct BrokenStore;

    impl KvStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, String> {
            Err("disk on fire".into())
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), String> {
            Err("disk on fire".into())
        }
        fn remove(&self, _key: &str) -> Result<(), String> {
            Err("disk on fire".into())
        }
        fn clear(&self) -> Result<(), String> {
            Err("disk on fire".into())
        }
    }

    #[test]
    fn missing_key_loads_default() {
        let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
        let pref = Preference::load(store, "flag", true);
        assert!(pref.value());
    }

    #[test]
    fn write_then_fresh_load_reads_back() {
        let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
        let mut pref = Preference::load(store.clone(), "flag", false);
        pref.set(true);
        assert_eq!(store.get("flag").unwrap().as_deref(), Some("true"));

        let fresh = Preference::load(store, "flag", false);
        assert!(fresh.value());
    }

    #[test]
    fn corrupted_value_loads_default() {
        let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
        store.set("flag", "not-a-bool").unwrap();
        let pref = Preference::load(store, "flag", true);
        assert!(pref.value());
    }

    #[test]
    fn cleared_store_loads_default() {
        let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
        let mut pref = Preference::load(store.clone(), "flag", false);
        pref.set(true);
        store.clear().unwrap();
        assert!(!Preference::load(store, "flag", false).value());
    }

    #[test]
    fn read_failure_loads_default() {
        let pref = Preference::load(Arc::new(BrokenStore), "name", "fallback".to_string());
        assert_eq!(pref.get(), "fallback");
    }

    #[test]
    fn write_failure_keeps_in_memory_value() {
        let mut pref = Preference::load(Arc::new(BrokenStore), "flag", false);
        pref.set(true);
        assert!(pref.value());
        pref.update(|v| *v = !*v);
        assert!(!pref.value());
    }

    #[test]
    fn subscribers_see_every_mutation() {
        let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
        let mut pref = Preference::load(store, "flag", false);
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        pref.subscribe(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        pref.set(true);
        pref.update(|v| *v = false);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn bool_decoding_is_strict() {
        assert_eq!(bool::decode("true"), Some(true));
        assert_eq!(bool::decode(" false\n"), Some(false));
        assert_eq!(bool::decode("1"), None);
        assert_eq!(bool::decode("TRUE"), None);
    }

    #[test]
    fn file_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.json");

        let store = FileStore::open(&path);
        store.set("theme", "dark").unwrap();
        store.set("flag", "true").unwrap();
        assert!(path.exists());

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(reopened.get("flag").unwrap().as_deref(), Some("true"));

        reopened.remove("theme").unwrap();
        let again = FileStore::open(&path);
        assert!(again.get("theme").unwrap().is_none());
        assert_eq!(again.get("flag").unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn file_store_treats_malformed_file_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, "{not json").unwrap();

        let store: Arc<dyn KvStore> = Arc::new(FileStore::open(&path));
        assert!(store.get("flag").unwrap().is_none());
        assert!(!Preference::load(store.clone(), "flag", false).value());

        // A write replaces the corrupt file with a valid one.
        store.set("flag", "true").unwrap();
        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("flag").unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn file_store_keeps_valid_keys_beside_odd_ones() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(
            &path,
            r#"{"theme":"dark","terminal-sidebar-collapsed":true,"junk":[1,2]}"#,
        )
        .unwrap();

        let store: Arc<dyn KvStore> = Arc::new(FileStore::open(&path));
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
        assert!(Preference::load(store.clone(), "terminal-sidebar-collapsed", false).value());
        assert!(store.get("junk").unwrap().is_none());

        // A later write keeps the other usable keys.
        store.set("x", "y").unwrap();
        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(
            reopened.get("terminal-sidebar-collapsed").unwrap().as_deref(),
            Some("true")
        );
        assert_eq!(reopened.get("x").unwrap().as_deref(), Some("y"));
    }

    #[test]
    fn file_store_clear_removes_everything() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        let store = FileStore::open(&path);
        store.set("a", "1").unwrap();
        store.clear().unwrap();
        assert!(FileStore::open(&path).get("a").unwrap().is_none());
    }
}
