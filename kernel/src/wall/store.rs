// Wall Storage Abstraction
//
// Defines the durability contract for the shared message log.
// Implementations may persist to a shared filesystem mount, object
// storage, or memory.
//
// This module defines *interfaces only*.

use super::WallError;

/// Outcome of reading the full log.
///
/// Absence is a valid state distinct from an empty file. The store
/// reports them separately; collapsing both to "no messages yet" is
/// the facade's policy, not this layer's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// The log exists; full contents as one string.
    Found(String),
    /// The log has not been created yet, or was deleted.
    Absent,
}

/// Storage backend for the shared message log.
///
/// Properties required from implementations:
/// - Append-only between deletes
/// - Insertion order preserved
/// - Whole-message atomicity: no reader observes a partial append, and
///   concurrent appends never interleave within a line
/// - Safe for uncoordinated callers sharing no memory
///
/// Implementations MUST NOT:
/// - Reorder messages
/// - Split one append across multiple visible writes
/// - Fail a delete of an absent log
pub trait WallStore: Send + Sync {
    /// Read the entire log.
    ///
    /// Readers must exclude concurrent writers for the duration of the
    /// read; concurrent readers may proceed together.
    fn read_all(&self) -> Result<ReadOutcome, WallError>;

    /// Append one non-empty message, terminated with a newline.
    ///
    /// Writers must hold exclusive access for the whole write. The log
    /// is created on first append.
    fn append(&self, message: &str) -> Result<(), WallError>;

    /// Remove the log entirely.
    fn delete_all(&self) -> Result<(), WallError>;
}
