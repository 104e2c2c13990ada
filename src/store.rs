use std::fs;
use std::path::PathBuf;

use tracing::warn;

use crate::hints::HintError;

/// File-backed set of hint ids the user opted to never see again.
///
/// The file holds a JSON array of ids and is rewritten whole on every
/// addition. There is no removal API: within a session the set only grows.
pub struct DismissedHints {
    ids: Vec<String>,
    path: PathBuf,
}

impl DismissedHints {
    /// Loads the set from `path`. A missing file is an empty set; an
    /// unreadable one is logged and also treated as empty.
    pub fn load(path: PathBuf) -> Self {
        let ids = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(ids) => ids,
                Err(e) => {
                    let err = HintError::StoreCorrupt(e.to_string());
                    warn!(path = %path.display(), "{err}, starting with an empty dismissal list");
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };
        DismissedHints { ids, path }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|d| d == id)
    }

    /// Adds `id` and persists immediately. Re-adding a known id is a no-op.
    /// A failed write is logged and the id kept in memory for this session.
    pub fn insert(&mut self, id: &str) {
        if self.contains(id) {
            return;
        }
        self.ids.push(id.to_string());
        if let Err(e) = self.persist() {
            warn!(path = %self.path.display(), "could not persist dismissed hints: {e}");
        }
    }

    fn persist(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(&self.ids).expect("id list serializes");
        fs::write(&self.path, json)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_empty_set() {
        let dir = tempfile::tempdir().unwrap();
        let store = DismissedHints::load(dir.path().join("dismissed.json"));
        assert!(store.is_empty());
    }

    #[test]
    fn corrupt_file_falls_back_to_empty_set() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dismissed.json");
        fs::write(&path, "{not json").unwrap();
        let store = DismissedHints::load(path);
        assert!(store.is_empty());
    }

    #[test]
    fn dismissal_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dismissed.json");

        let mut store = DismissedHints::load(path.clone());
        store.insert("shop-categories");
        assert!(store.contains("shop-categories"));

        let reloaded = DismissedHints::load(path);
        assert!(reloaded.contains("shop-categories"));
        assert_eq!(reloaded.len(), 1);
    }

    #[test]
    fn set_only_grows() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = DismissedHints::load(dir.path().join("dismissed.json"));
        store.insert("a");
        store.insert("b");
        store.insert("a");
        assert_eq!(store.len(), 2);
        assert!(store.contains("a") && store.contains("b"));
    }
}
