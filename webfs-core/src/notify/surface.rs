//! src/notify/surface.rs
//! ============================================================================
//! # ToastSurface: Rendering Half of the Notification System
//!
//! The manager decides lifecycle transitions; the surface owns whatever the
//! toasts are drawn on, including the shared container that exists exactly
//! while at least one toast is live.

use crate::notify::toast::{ToastId, ToastMessage};

pub trait ToastSurface {
    /// True when the surface has no fade transition to wait for. Drivers
    /// then complete `FadingOut -> Removed` themselves instead of waiting
    /// for a transition-finished signal that will never come.
    const INSTANT_TRANSITIONS: bool = false;

    /// Called before the first live toast is inserted.
    fn ensure_container(&mut self);

    /// Insert a toast's rendered markup.
    fn insert(&mut self, id: ToastId, message: &ToastMessage, markup: &str);

    /// Drop the toast's opacity to zero; the element stays put until the
    /// transition finishes.
    fn begin_fade(&mut self, id: ToastId);

    /// Remove the toast's element.
    fn remove(&mut self, id: ToastId);

    /// Called exactly when the last live toast has been removed.
    fn release_container(&mut self);
}

/// Surface for the line-oriented driver: toasts land on stderr and fades
/// complete immediately.
#[derive(Debug, Default)]
pub struct PlainSurface;

impl ToastSurface for PlainSurface {
    const INSTANT_TRANSITIONS: bool = true;

    fn ensure_container(&mut self) {}

    fn insert(&mut self, _id: ToastId, message: &ToastMessage, _markup: &str) {
        eprintln!("[{}] {}", message.kind.slug(), message.text);
    }

    fn begin_fade(&mut self, _id: ToastId) {}

    fn remove(&mut self, _id: ToastId) {}

    fn release_container(&mut self) {}
}

/// Surface that draws nothing. Useful for exercising the lifecycle in
/// tests that only care about manager state.
#[derive(Debug, Default)]
pub struct NullSurface;

impl ToastSurface for NullSurface {
    const INSTANT_TRANSITIONS: bool = true;

    fn ensure_container(&mut self) {}
    fn insert(&mut self, _id: ToastId, _message: &ToastMessage, _markup: &str) {}
    fn begin_fade(&mut self, _id: ToastId) {}
    fn remove(&mut self, _id: ToastId) {}
    fn release_container(&mut self) {}
}
