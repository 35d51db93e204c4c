//! Test support.

pub(crate) mod helpers;

pub(crate) use memory::MemoryStore;
