//! Bookkeeper - personal expense tracking
//!
//! This library records expenses filed under a tree of categories and tracks
//! spending against day, week and month limits. The category tree is edited as
//! indented text; replacing it keeps every expense attached to the category of
//! the same name, or moves it to "Not stated" when that name is gone.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (categories, expenses, budget limits, money)
//! - `storage`: JSON record store with transactions
//! - `audit`: Audit logging system
//! - `services`: Business logic layer (tree reconciliation, expenses, budgets)
//! - `controller`: Intent handlers that return display-ready snapshots
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the binary
//!
//! # Example
//!
//! ```rust,no_run
//! use bookkeeper::config::{paths::BookkeeperPaths, settings::Settings};
//! use bookkeeper::controller::Controller;
//! use bookkeeper::services::SystemClock;
//! use bookkeeper::storage::Storage;
//!
//! # fn main() -> Result<(), bookkeeper::BookkeeperError> {
//! let paths = BookkeeperPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::open(paths)?;
//! let controller = Controller::new(&storage, &settings, &SystemClock);
//!
//! controller.on_category_commit("Food\n\tGroceries\nRent")?;
//! let snapshot = controller.refresh()?;
//! println!("{}", snapshot.category_tree);
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod controller;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{BookkeeperError, BookkeeperResult, ValidationError};
