use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};

const CONFIG_DIR: &str = "footdata_terminal";
const PREFS_FILE: &str = "prefs.json";

/// Minimal key-value persistence seam so user preferences survive restarts
/// and tests can swap in an in-memory store.
pub trait PrefStore {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&self, key: &str, value: &str) -> Result<()>;
}

/// JSON map under the XDG config directory. Missing or unreadable files read
/// as empty; writes go through a tmp file and rename.
pub struct FilePrefs {
    path: Option<PathBuf>,
}

impl FilePrefs {
    pub fn open() -> Self {
        Self { path: prefs_path() }
    }

    fn read_map(&self) -> HashMap<String, String> {
        let Some(path) = self.path.as_ref() else {
            return HashMap::new();
        };
        let Ok(raw) = fs::read_to_string(path) else {
            return HashMap::new();
        };
        serde_json::from_str(&raw).unwrap_or_default()
    }
}

impl PrefStore for FilePrefs {
    fn load(&self, key: &str) -> Option<String> {
        self.read_map().get(key).cloned()
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        let Some(path) = self.path.as_ref() else {
            return Ok(());
        };
        let Some(dir) = path.parent() else {
            return Ok(());
        };
        fs::create_dir_all(dir).ok();

        let mut map = self.read_map();
        map.insert(key.to_string(), value.to_string());

        let tmp = path.with_extension("json.tmp");
        let json = serde_json::to_string(&map).context("serialize prefs")?;
        fs::write(&tmp, json).context("write prefs")?;
        fs::rename(&tmp, path).context("swap prefs")?;
        Ok(())
    }
}

/// In-memory store for tests.
#[derive(Default)]
pub struct MemPrefs {
    entries: Mutex<HashMap<String, String>>,
}

impl PrefStore for MemPrefs {
    fn load(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .expect("prefs lock poisoned")
            .get(key)
            .cloned()
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .expect("prefs lock poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

fn prefs_path() -> Option<PathBuf> {
    if let Ok(base) = std::env::var("XDG_CONFIG_HOME")
        && !base.trim().is_empty()
    {
        return Some(PathBuf::from(base).join(CONFIG_DIR).join(PREFS_FILE));
    }
    let home = std::env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(
        PathBuf::from(home)
            .join(".config")
            .join(CONFIG_DIR)
            .join(PREFS_FILE),
    )
}
