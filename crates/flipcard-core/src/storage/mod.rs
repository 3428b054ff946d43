//! Document storage abstraction and the fixed logical layout on the card.

mod memory;

use alloc::{string::String, vec::Vec};
use core::fmt::Write as _;

pub use memory::{MemoryStore, MemoryStoreError};

/// Top-level directory holding all flipcard content.
pub const CONTENT_DIR: &str = "FLIPCARD";
/// Card index: card list, category names, and total count.
pub const INDEX_PATH: &str = "FLIPCARD/INDEX.JSN";
/// Language configuration.
pub const CONFIG_PATH: &str = "FLIPCARD/CONFIG.JSN";
/// Per-card descriptor file name inside each card folder.
pub const CARD_FILE: &str = "CARD.JSN";

/// Path of the card descriptor for `folder`.
pub fn card_path(folder: &str) -> String {
    let mut path = String::with_capacity(CONTENT_DIR.len() + folder.len() + CARD_FILE.len() + 2);
    let _ = write!(path, "{CONTENT_DIR}/{folder}/{CARD_FILE}");
    path
}

/// Blocking whole-document reader/writer backed by removable storage.
///
/// Paths are `/`-separated and relative to the volume root.
pub trait DocumentStore {
    type Error: core::fmt::Debug;

    fn read(&mut self, path: &str) -> Result<Vec<u8>, Self::Error>;

    /// Replace the document at `path` with `bytes`.
    fn write(&mut self, path: &str, bytes: &[u8]) -> Result<(), Self::Error>;
}

impl<T: DocumentStore + ?Sized> DocumentStore for &mut T {
    type Error = T::Error;

    fn read(&mut self, path: &str) -> Result<Vec<u8>, Self::Error> {
        (**self).read(path)
    }

    fn write(&mut self, path: &str, bytes: &[u8]) -> Result<(), Self::Error> {
        (**self).write(path, bytes)
    }
}
