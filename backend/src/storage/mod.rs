//! # Storage Module
//!
//! Handles all data persistence operations for the tuition tracker.
//!
//! This module abstracts away the specific storage implementation details and
//! provides a consistent interface for persisting and retrieving data. The
//! implementation can be swapped out without affecting the domain logic or
//! the REST layer.
//!
//! ## Key Responsibilities
//!
//! - **Data Persistence**: Saving students and payment records to disk
//! - **Data Retrieval**: Loading stored data back into memory
//! - **Connection Management**: Handling database connections and lifecycle
//! - **Uniqueness Enforcement**: The payments table's composite primary key
//!   guarantees one record per student per billing period
//!
//! ## Current Implementation
//!
//! - **Primary Storage**: SQLite database accessed through SQLx
//! - **Repository Pattern**: Clean separation between domain and data access
//! - **Async Operations**: Non-blocking database operations

pub mod connection;
pub mod repositories;
pub mod traits;

// Re-export the main types that other modules need
pub use connection::DbConnection;
pub use repositories::{PaymentRepository, StudentRepository};
pub use traits::{PaymentStorage, StudentStorage};
