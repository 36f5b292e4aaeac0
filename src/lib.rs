//! Travel bucket-list destinations: an authoritative in-memory collection that
//! is written to a storage slot after every mutation.
//!
//! # Examples
//!
//! Planner over in-memory slots:
//! ```
//! use bucketlist::{
//!     config::PlannerConfig,
//!     destination::{DestinationDraft, DestinationPatch},
//!     persist::memory::MemorySlots,
//!     planner::Planner,
//! };
//!
//! let slots = MemorySlots::new();
//! let mut planner = Planner::hydrate(slots.clone(), PlannerConfig::default());
//! let (id, _change) = planner
//!     .create(DestinationDraft::at(48.8566, 2.3522).titled("Paris"))
//!     .expect("create");
//! planner
//!     .update(&id, &DestinationPatch::completion(true))
//!     .expect("update");
//!
//! assert_eq!(planner.progress().completed, 1);
//! assert!(slots.get("bucketList").is_some());
//! ```
//!
//! Runtime usage with a SQLite slot:
//! ```no_run
//! use bucketlist::{
//!     config::{PlannerConfig, RuntimeConfig},
//!     destination::DestinationDraft,
//!     persist::sqlite::SqliteSlots,
//!     planner::Planner,
//!     runtime::handle::spawn_planner,
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let slots = SqliteSlots::open("bucketlist.db").expect("open sqlite");
//! let planner = Planner::hydrate(slots, PlannerConfig::default());
//! let handle = spawn_planner(planner, RuntimeConfig::default());
//! let _id = handle
//!     .create(DestinationDraft::at(35.6762, 139.6503).titled("Tokyo"))
//!     .await
//!     .expect("create");
//! handle.shutdown().await.expect("shutdown");
//! # }
//! ```

/// Planner and runtime settings.
pub mod config;
/// Core in-memory store, index helpers and derived progress.
pub mod core;
/// Destination records and patches.
pub mod destination;
/// JSON export and import.
pub mod interchange;
/// Applied-change model.
pub mod op;
/// Storage slot abstraction, in-memory and SQLite implementations.
pub mod persist;
/// Store plus persistence plus views.
pub mod planner;
/// Single-writer runtime handle and events.
pub mod runtime;
/// Share message, platform links and fallback cascade.
pub mod share;
/// Shared primitive types.
pub mod types;
/// View projections and intents.
pub mod view;
