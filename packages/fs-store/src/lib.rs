//! Filesystem backing for Bailey.
//!
//! Each key maps one-to-one onto a path beneath a root directory. Leaves are
//! regular files holding the stored bytes verbatim; containers are plain
//! directories. There are no sidecar metadata files.

pub mod local_disk;

pub use local_disk::FsBacking;
