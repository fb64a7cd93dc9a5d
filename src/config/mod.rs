//! Configuration module for Bookkeeper
//!
//! - Platform path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::BookkeeperPaths;
pub use settings::Settings;
