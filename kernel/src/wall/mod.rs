// Shared Message Wall
//
// An append-only, newline-delimited message log on storage shared
// across invocation contexts. This facade applies the caller-visible
// policy (empty-append guard, read fallback) on top of a WallStore.

pub mod memory;
pub mod shared_fs;
pub mod store;

use self::store::{ReadOutcome, WallStore};

/// Fixed text returned to readers when the log holds no messages.
pub const FALLBACK_MESSAGE: &str = "No message yet.";

/// Errors produced by wall storage.
#[derive(Debug, thiserror::Error)]
pub enum WallError {
    #[error("wall storage i/o: {0}")]
    Io(#[from] std::io::Error),
}

/// Observable lifecycle state of the log.
///
/// ABSENT -> NONEMPTY on the first successful append; any state ->
/// ABSENT on delete. Reads never change state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallState {
    Absent,
    NonEmpty,
}

/// Policy layer over a storage backend.
#[derive(Debug)]
pub struct MessageWall<S> {
    store: S,
}

impl<S: WallStore> MessageWall<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Full log contents, or the fallback text.
    ///
    /// Absence, an empty log, and storage errors all collapse to
    /// [`FALLBACK_MESSAGE`]; errors are logged before the collapse.
    /// This operation never fails observably.
    pub fn read_all(&self) -> String {
        match self.store.read_all() {
            Ok(ReadOutcome::Found(text)) if !text.is_empty() => text,
            Ok(_) => FALLBACK_MESSAGE.to_string(),
            Err(err) => {
                tracing::warn!(error = %err, "wall read failed, returning fallback");
                FALLBACK_MESSAGE.to_string()
            }
        }
    }

    /// Append one message.
    ///
    /// `None` and empty input are a no-op: no file is created, no lock
    /// is taken. Storage failures propagate; whether they surface to
    /// the caller is the handler's decision.
    pub fn append(&self, message: Option<&str>) -> Result<(), WallError> {
        match message {
            Some(msg) if !msg.is_empty() => self.store.append(msg),
            _ => Ok(()),
        }
    }

    /// Remove the log. Deleting an absent log succeeds.
    pub fn delete_all(&self) -> Result<(), WallError> {
        self.store.delete_all()
    }

    /// Current lifecycle state, as observed through one read.
    pub fn state(&self) -> WallState {
        match self.store.read_all() {
            Ok(ReadOutcome::Found(text)) if !text.is_empty() => WallState::NonEmpty,
            _ => WallState::Absent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::InMemoryStore;
    use super::*;

    fn wall() -> MessageWall<InMemoryStore> {
        MessageWall::new(InMemoryStore::new())
    }

    #[test]
    fn read_after_write_contains_message() {
        let wall = wall();

        wall.append(Some("hello")).unwrap();

        assert_eq!(wall.read_all(), "hello\n");
    }

    #[test]
    fn appends_preserve_arrival_order() {
        let wall = wall();

        wall.append(Some("first")).unwrap();
        wall.append(Some("second")).unwrap();
        wall.append(Some("third")).unwrap();

        let all = wall.read_all();
        let lines: Vec<&str> = all.lines().collect();
        assert_eq!(lines, ["first", "second", "third"]);
    }

    #[test]
    fn empty_and_absent_appends_are_noops() {
        let wall = wall();

        wall.append(Some("")).unwrap();
        wall.append(None).unwrap();

        assert_eq!(wall.state(), WallState::Absent);
        assert_eq!(wall.read_all(), FALLBACK_MESSAGE);
    }

    #[test]
    fn empty_append_leaves_existing_log_unchanged() {
        let wall = wall();

        wall.append(Some("kept")).unwrap();
        wall.append(Some("")).unwrap();

        assert_eq!(wall.read_all(), "kept\n");
    }

    #[test]
    fn read_of_absent_log_returns_fallback() {
        assert_eq!(wall().read_all(), FALLBACK_MESSAGE);
    }

    #[test]
    fn empty_log_reads_as_no_messages() {
        // An empty file is a distinct state from absence, but readers
        // see both as "no messages yet".
        let wall = MessageWall::new(InMemoryStore::with_contents(""));

        assert_eq!(wall.read_all(), FALLBACK_MESSAGE);
        assert_eq!(wall.state(), WallState::Absent);
    }

    #[test]
    fn delete_is_idempotent_on_absent_log() {
        let wall = wall();

        wall.delete_all().unwrap();
        wall.delete_all().unwrap();

        assert_eq!(wall.state(), WallState::Absent);
    }

    #[test]
    fn delete_then_read_returns_fallback() {
        let wall = wall();

        wall.append(Some("gone soon")).unwrap();
        wall.delete_all().unwrap();

        assert_eq!(wall.read_all(), FALLBACK_MESSAGE);
    }

    #[test]
    fn lifecycle_walk() {
        let wall = wall();
        assert_eq!(wall.state(), WallState::Absent);

        wall.append(Some("hello")).unwrap();
        assert_eq!(wall.state(), WallState::NonEmpty);
        assert_eq!(wall.read_all(), "hello\n");

        wall.append(Some("world")).unwrap();
        assert_eq!(wall.read_all(), "hello\nworld\n");

        wall.delete_all().unwrap();
        assert_eq!(wall.state(), WallState::Absent);
        assert_eq!(wall.read_all(), FALLBACK_MESSAGE);
    }
}
