//! # LibQuality Dashboard Library
//!
//! `libquality` is a desktop dashboard for comparing the quality of open
//! source libraries available on GitHub. It talks to the LibQuality backend,
//! which serves cached per-repository issue metrics, and visualizes them.
//!
//! ## Features
//!
//! - Search repositories by their "owner/repository" identifier
//! - Persist the list of searched repositories across sessions
//! - Per-repository detail view with headline issue statistics
//! - Time-series chart of open-issue counts
//! - Clear-cache action that wipes all persisted state
//!
//! ## Example
//!
//! ```no_run
//! use libquality::app::{App, AppWrapper};
//! use std::sync::{Arc, Mutex};
//! use eframe::NativeOptions;
//!
//! // Create a new application instance
//! let app = Arc::new(Mutex::new(App::default()));
//! let app_wrapper = AppWrapper { app };
//!
//! // Run the application with eframe
//! eframe::run_native(
//!     "LibQuality",
//!     NativeOptions::default(),
//!     Box::new(|_cc| Ok(Box::new(app_wrapper))),
//! ).unwrap();
//! ```

pub mod api;
pub mod app;
pub mod history;
pub mod plotting;
pub mod store;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use app::App as LibQualityApp;
pub use types::{IssueSnapshot, RepositoryBundle, RepositoryDetail, RepositorySummary};
