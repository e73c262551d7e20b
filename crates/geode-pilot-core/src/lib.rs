//! geode-pilot-core: State synchronisation for geode-pilot
//!
//! This crate keeps the operator console's view of a Geode cluster in step
//! with the data-browser backend. It knows nothing about terminals: every
//! component reports through the [`view::Renderer`] trait, so the same logic
//! drives the TUI and the tests.
//!
//! # Modules
//!
//! - [`console`] - Composition root wiring commands, background fetches and completions
//! - [`monitor`] - Periodic cluster status polling
//! - [`catalog`] - Region catalog and the region choice control
//! - [`viewer`] - Paged region contents with stale-reply suppression
//! - [`provisioner`] - Region create and delete workflow
//! - [`session`] - Shared selection state (current region, page window)
//! - [`view`] - View-models and the `Renderer` sink
//! - [`types`] - Core domain types (ClusterStatus, RegionSummary, DataPage, etc.)
//! - [`indicators`] - Health and connection indicators
//! - [`formatting`] - Value previews, labels and timestamps
//! - [`selection`] - Generic selection logic for list-based UI components
//! - [`async_state`] - Async component state management (loading, error, refresh)
//! - [`sequence`] - Request tickets for ordering replies
//! - [`periodic`] - Cancellable fixed-period tasks
//! - [`errors`] - Error type and user-facing messages
//! - [`constants`] - Shared constants (page size, refresh intervals)

pub mod async_state;
pub mod catalog;
pub mod console;
pub mod constants;
pub mod errors;
pub mod formatting;
pub mod indicators;
pub mod monitor;
pub mod periodic;
pub mod provisioner;
pub mod selection;
pub mod sequence;
pub mod session;
pub mod types;
pub mod view;
pub mod viewer;

#[cfg(test)]
mod testing;

// Re-export commonly used items at crate root
pub use async_state::*;
pub use catalog::RegionCatalog;
pub use console::{Command, Completion, Console, ConsoleConfig, Tab};
pub use errors::*;
pub use formatting::*;
pub use indicators::*;
pub use monitor::ClusterStatusMonitor;
pub use provisioner::{ProvisionState, RegionProvisioner};
pub use selection::*;
pub use session::{SelectionStatus, Session};
pub use types::*;
pub use viewer::RegionDataViewer;

// View-models are not re-exported at root; use geode_pilot_core::view::* explicitly
