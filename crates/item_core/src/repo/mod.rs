//! Repository layer for item persistence.
//!
//! # Responsibility
//! - Define the item data access contract.
//! - Keep SQL text, bind order and row mapping inside this module.
//!
//! # Invariants
//! - Item SQL is rendered from one column mapping table.
//! - Store failures are returned as `RepoError::Db`, never swallowed.

pub mod item_repo;

mod filter;
mod mapping;
