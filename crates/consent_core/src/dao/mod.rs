//! Entity DAOs built on the SQL execution template.
//!
//! # Responsibility
//! - Pair entity SQL text with its binders and row mappers.
//! - Translate template faults into operation-specific `ConsentError`s.
//!
//! # Invariants
//! - Raw `DataAccessError`s never cross a DAO method boundary unwrapped.
//! - Each DAO call runs exactly one statement.

pub mod purpose_dao;
