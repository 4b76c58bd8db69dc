//! Local registry of claimed numbers
//!
//! A single JSON file holding the ordered list of numbers the user has
//! claimed. Single-process, sequential-use; every mutation is a full
//! read-modify-write of the file.

mod registry;

pub use registry::{RegistryStore, StoreError, DB_FILE_NAME};
