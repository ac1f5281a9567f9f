//! Domain model for consent data-access.
//!
//! # Responsibility
//! - Define the value types persisted by the DAO layer.
//!
//! # Invariants
//! - Model values are immutable once constructed; persistence returns fresh
//!   instances instead of patching caller-owned values.

pub mod purpose;
