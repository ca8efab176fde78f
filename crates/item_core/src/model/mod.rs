//! Domain model for the item store.
//!
//! # Invariants
//! - Every persisted item is identified by a store-assigned `ItemId`.
//! - There is no delete; records only get created and overwritten.

pub mod item;
