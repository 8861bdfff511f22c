//! src/controller/navigator.rs
//! ============================================================================
//! # Navigator: Navigation State Machine over the Remote Store
//!
//! Owns the breadcrumb [`PathStack`] and the current listing. Listing is
//! split into an intent half (stamp a [`ListingRequest`] carrying the next
//! epoch) and an apply half ([`Navigator::apply_listing`]), so listing
//! results that arrive after a newer navigation are discarded instead of
//! overwriting the newer path's entries. Last navigation wins.

use tracing::debug;

use crate::error::AppError;
use crate::model::path_stack::PathStack;
use crate::remote::entry::FileEntry;

/// A stamped listing intent. The epoch decides whether the eventual result
/// is still current when it arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRequest {
    pub epoch: u64,
    pub rel: String,
}

/// What activating an entry means for the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Activation {
    /// The entry was a directory: the stack descended, list this next.
    Descend(ListingRequest),
    /// The entry was a file: hand this path to the download flow. The
    /// stack is untouched.
    Download { rel: String },
}

/// Whether an arriving listing result was still the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingApplied {
    Current,
    Stale,
}

#[derive(Debug, Default)]
pub struct Navigator {
    path: PathStack,
    entries: Vec<FileEntry>,
    listing_epoch: u64,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(&self) -> &PathStack {
        &self.path
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    /// Stamps a listing intent for the current path, superseding any intent
    /// still in flight.
    pub fn begin_refresh(&mut self) -> ListingRequest {
        self.listing_epoch += 1;
        ListingRequest {
            epoch: self.listing_epoch,
            rel: self.path.joined(),
        }
    }

    /// Breadcrumb jump: keep segments `[0, index]` and re-list. An
    /// out-of-range index panics (see [`PathStack::truncate_to`]).
    pub fn navigate_to(&mut self, index: usize) -> ListingRequest {
        self.path.truncate_to(index);
        self.begin_refresh()
    }

    /// Resolves a clicked entry name against the current listing. A name
    /// that is no longer listed means the caller's view and this state have
    /// diverged; nothing is mutated and no request is produced.
    pub fn activate(&mut self, name: &str) -> Result<Activation, AppError> {
        let Some(index) = self.entries.iter().position(|e| e.name == name) else {
            return Err(AppError::LookupInconsistency {
                name: name.to_string(),
            });
        };

        if self.entries[index].is_dir {
            self.path.push(name);
            Ok(Activation::Descend(self.begin_refresh()))
        } else {
            Ok(Activation::Download {
                rel: self.path.joined_with(name),
            })
        }
    }

    /// Target path for deleting `name` inside the current directory.
    pub fn request_delete(&self, name: &str) -> String {
        self.path.joined_with(name)
    }

    /// Applies a settled listing result. A result stamped with anything but
    /// the latest epoch was superseded by a newer navigation and is
    /// discarded outright, errors included. A current failure propagates and
    /// leaves the entries unchanged; a current success replaces them
    /// wholesale.
    pub fn apply_listing(
        &mut self,
        epoch: u64,
        result: Result<Vec<FileEntry>, AppError>,
    ) -> Result<ListingApplied, AppError> {
        if epoch != self.listing_epoch {
            debug!(
                "discarding stale listing result (epoch {epoch}, current {})",
                self.listing_epoch
            );
            return Ok(ListingApplied::Stale);
        }
        self.entries = result?;
        Ok(ListingApplied::Current)
    }
}
