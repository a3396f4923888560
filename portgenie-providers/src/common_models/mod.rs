//! Records shared between the storage, pinning and contract providers.

pub mod credential;
pub mod ipfs_file;
pub mod macros;
