//! Domain Layer
//!
//! The orchestrator's vocabulary, free of I/O.
//!
//! ## Structure
//!
//! - `entities/` - Accounts, transactions, contract interfaces, results
//! - `value_objects/` - Immutable value types (AccountId, NearToken, keys, hashes)
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system or network directly
//! 2. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod value_objects;
