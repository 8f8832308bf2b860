// In-Memory Wall Store
//
// Keeps the log in process memory. Used by tests and local dry-runs;
// provides none of the cross-process durability of the shared
// filesystem store.

use std::sync::Mutex;

use super::store::{ReadOutcome, WallStore};
use super::WallError;

/// Memory-backed store. `None` models the absent log.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    contents: Mutex<Option<String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with raw log contents.
    pub fn with_contents(text: impl Into<String>) -> Self {
        Self {
            contents: Mutex::new(Some(text.into())),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.contents.lock().unwrap_or_else(|err| err.into_inner())
    }
}

impl WallStore for InMemoryStore {
    fn read_all(&self) -> Result<ReadOutcome, WallError> {
        Ok(match &*self.lock() {
            Some(text) => ReadOutcome::Found(text.clone()),
            None => ReadOutcome::Absent,
        })
    }

    fn append(&self, message: &str) -> Result<(), WallError> {
        let mut contents = self.lock();
        let log = contents.get_or_insert_with(String::new);
        log.push_str(message);
        log.push('\n');
        Ok(())
    }

    fn delete_all(&self) -> Result<(), WallError> {
        self.lock().take();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_absent() {
        let store = InMemoryStore::new();
        assert_eq!(store.read_all().unwrap(), ReadOutcome::Absent);
    }

    #[test]
    fn append_then_delete_round() {
        let store = InMemoryStore::new();

        store.append("alpha").unwrap();
        store.append("beta").unwrap();
        assert_eq!(
            store.read_all().unwrap(),
            ReadOutcome::Found("alpha\nbeta\n".into())
        );

        store.delete_all().unwrap();
        assert_eq!(store.read_all().unwrap(), ReadOutcome::Absent);
    }

    #[test]
    fn seeded_contents_are_visible() {
        let store = InMemoryStore::with_contents("old\n");
        assert_eq!(store.read_all().unwrap(), ReadOutcome::Found("old\n".into()));
    }
}
