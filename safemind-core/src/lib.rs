//! # safemind-core
//!
//! Core library for safemind - a parent-facing dashboard over a child's
//! search activity.
//!
//! This library provides:
//! - Domain types for upstream search records
//! - The risk analytics engine (normalize, window, classify, aggregate, drill down)
//! - Record sources scoped to one parent and child
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Architecture
//!
//! Data flows one way:
//! - **Source:** a [`RecordSource`] fetches the owner's raw [`SearchRecord`]s
//! - **Engine:** [`RiskEngine`] turns them into an [`AggregateSnapshot`]
//! - **Drill-down:** a clicked bucket becomes a [`DrillDown`] and resolves
//!   back to the exact records it counted
//!
//! Nothing is cached or mutated; every filter change recomputes from the
//! raw records.
//!
//! ## Example
//!
//! ```rust,no_run
//! use safemind_core::analytics::{RiskEngine, TimeWindow};
//! use safemind_core::{Config, JsonFileSource, OwnerScope, RecordSource};
//!
//! let config = Config::load().expect("failed to load config");
//! let source = JsonFileSource::new("records.json");
//! let records = source
//!     .fetch(&OwnerScope::new("parent-1").with_child("Maya"))
//!     .expect("failed to read records");
//!
//! let engine = RiskEngine::local().with_config(&config.analytics);
//! let snapshot = engine.snapshot(&records, &TimeWindow::last_week());
//! println!("{} harmful searches", snapshot.harmful_ratio.harmful);
//! ```

// Re-export commonly used items at the crate root
pub use analytics::{AggregateSnapshot, DrillDown, RiskCategory, RiskEngine, TimeWindow};
pub use config::Config;
pub use error::{Error, Result};
pub use source::{JsonFileSource, OwnerScope, RecordSource};
pub use types::*;

// Public modules
pub mod analytics;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod source;
pub mod types;
