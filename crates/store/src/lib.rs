//! Persistence backends for LeaveLedger.
//!
//! The core defines the store traits; this crate provides backends. The
//! in-memory backend mirrors the production document store's semantics
//! (unordered reads, last-write-wins updates) and backs the integration
//! tests.

pub mod memory;

pub use memory::MemoryStore;
