//! src/controller/actions.rs
//! ============================================================================
//! # Actions: Centralized Browser Commands
//!
//! The `Action` enum is the single interface the event loop processes:
//! every navigation event the UI can raise, plus internal housekeeping.

/// A high-level command for the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Breadcrumb click: keep path segments `[0, index]` and re-list.
    NavigateTo(usize),
    /// Entry click: descend into a directory or download a file.
    Activate(String),
    /// Delete the named entry in the current directory.
    Delete(String),
    /// Re-list the current directory.
    Refresh,
    /// Periodic tick driving toast lifecycles.
    Tick,
    /// Leave the event loop.
    Quit,
}
