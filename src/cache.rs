use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::types::MixPreset;

/// Process-local memo of finished mixes, keyed by (URL, preset). No
/// eviction and no durability across restarts; a hit whose file has since
/// disappeared counts as a miss so the UI never points at a missing path.
#[derive(Debug, Default)]
pub struct MixCache {
    inner: Mutex<HashMap<(String, MixPreset), PathBuf>>,
}

impl MixCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, url: &str, preset: MixPreset) -> Option<PathBuf> {
        let map = self.inner.lock().expect("mix cache poisoned");
        map.get(&(url.to_string(), preset))
            .filter(|path| path.is_file())
            .cloned()
    }

    pub fn store(&self, url: &str, preset: MixPreset, path: PathBuf) {
        let mut map = self.inner.lock().expect("mix cache poisoned");
        map.insert((url.to_string(), preset), path);
    }
}
