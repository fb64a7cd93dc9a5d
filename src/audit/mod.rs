//! Audit logging system for Bookkeeper
//!
//! Records every create, update and delete of a category, expense or budget
//! limit, with before/after values, in an append-only JSONL log.
//!
//! - `AuditEntry`: one operation on one record
//! - `AuditLogger`: appends entries to the log file and reads them back
//! - `generate_diff`: a short summary of which fields changed
//!
//! Storage is the only writer; see `Storage::log_create` and friends.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
