use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing::warn;

const PASSWORD_KEY: &str = "searchav_auth_password";
const ADULT_MODE_KEY: &str = "searchav_adult_mode";

/// Capability seam for preference persistence. An implementation is selected
/// at startup; every operation is a synchronous single-step read or write.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Store backed by a flat JSON map on disk.
pub struct DiskStore {
    path: PathBuf,
}

impl DiskStore {
    /// Open the store at the default per-user config location.
    pub fn open_default() -> Result<Self> {
        let proj = ProjectDirs::from("dev", "searchav", "searchav")
            .context("unable to determine config directory for preferences")?;
        let dir = proj.config_dir().to_path_buf();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("creating config dir: {}", dir.display()))?;
        Ok(Self {
            path: dir.join("prefs.json"),
        })
    }

    /// Open the store at an explicit file path.
    pub fn open_at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> HashMap<String, String> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("ignoring unreadable preferences file {}: {}", self.path.display(), e);
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        }
    }

    fn write_map(&self, map: &HashMap<String, String>) {
        let payload = match serde_json::to_string_pretty(map) {
            Ok(p) => p,
            Err(e) => {
                warn!("skipping preference write: {e}");
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.path, payload) {
            warn!("skipping preference write to {}: {}", self.path.display(), e);
        }
    }
}

impl KeyValueStore for DiskStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_map().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut map = self.read_map();
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map);
    }

    fn remove(&self, key: &str) {
        let mut map = self.read_map();
        if map.remove(key).is_some() {
            self.write_map(&map);
        }
    }
}

/// In-process store for tests and embedding.
#[derive(Default)]
pub struct MemoryStore {
    map: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.map.lock().unwrap().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.map.lock().unwrap().remove(key);
    }
}

/// Store for non-interactive execution contexts: every read is absent and
/// every write is silently skipped.
pub struct NoopStore;

impl KeyValueStore for NoopStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: &str) {}

    fn remove(&self, _key: &str) {}
}

/// User preferences persisted across sessions: the saved password and the
/// adult-mode flag.
#[derive(Clone)]
pub struct Preferences {
    store: Arc<dyn KeyValueStore>,
}

impl Preferences {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Disk-backed preferences at the default location, degrading to a no-op
    /// store when no per-user directory is available.
    pub fn open_default() -> Self {
        match DiskStore::open_default() {
            Ok(store) => Self::new(Arc::new(store)),
            Err(e) => {
                warn!("preferences unavailable, running without persistence: {e:#}");
                Self::new(Arc::new(NoopStore))
            }
        }
    }

    /// Stored password, if any. An empty string counts as no password.
    pub fn password(&self) -> Option<String> {
        self.store.get(PASSWORD_KEY).filter(|p| !p.is_empty())
    }

    pub fn save_password(&self, password: &str) {
        self.store.set(PASSWORD_KEY, password);
    }

    pub fn clear_password(&self) {
        self.store.remove(PASSWORD_KEY);
    }

    pub fn has_password(&self) -> bool {
        self.password().is_some()
    }

    /// Whether searches may include adult-flagged sources. Defaults to false
    /// when never set.
    pub fn adult_mode(&self) -> bool {
        self.store.get(ADULT_MODE_KEY).as_deref() == Some("1")
    }

    /// Enabling writes the flag value; disabling removes the key entirely.
    pub fn set_adult_mode(&self, enabled: bool) {
        if enabled {
            self.store.set(ADULT_MODE_KEY, "1");
        } else {
            self.store.remove(ADULT_MODE_KEY);
        }
    }
}
