//! src/notify/manager.rs
//! ============================================================================
//! # NotificationManager: Queued, Self-Expiring Toast Lifecycle
//!
//! Drives each toast through `Created -> Displayed -> FadingOut -> Removed`
//! over an injected [`ToastSurface`]. Transitions are triggered by explicit
//! signals (a frame tick, elapsed duration, the transition-finished signal),
//! so the whole machine runs against synthetic `Instant`s in tests.
//!
//! The shared container is created when the first toast goes live and
//! released exactly when the last one is removed. Toasts are independent;
//! any number may be live concurrently.

use std::time::{Duration, Instant};

use reqwest::header::HeaderMap;
use tracing::{debug, warn};

use crate::net::request::RequestClient;
use crate::notify::surface::ToastSurface;
use crate::notify::toast::{ToastId, ToastMessage, ToastPhase};

/// Delay between queuing a toast and inserting its content, leaving the
/// entry animation a frame to apply before content lands.
pub const ENTRY_DELAY: Duration = Duration::from_millis(50);

/// Markup used when no template URL is configured or the fetch fails.
const FALLBACK_TEMPLATE: &str = r#"<div class="toast toast-{kind}">{text}</div>"#;

#[derive(Debug)]
struct ToastSlot {
    id: ToastId,
    message: ToastMessage,
    phase: ToastPhase,
    queued_at: Instant,
    shown_at: Option<Instant>,
}

pub struct NotificationManager<S: ToastSurface> {
    surface: S,
    toasts: Vec<ToastSlot>,
    entry_delay: Duration,
    template: Option<String>,
    template_source: Option<(RequestClient, String)>,
}

impl<S: ToastSurface> NotificationManager<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            toasts: Vec::new(),
            entry_delay: ENTRY_DELAY,
            template: None,
            template_source: None,
        }
    }

    pub fn with_entry_delay(mut self, delay: Duration) -> Self {
        self.entry_delay = delay;
        self
    }

    /// Fetch the toast markup once from `url` instead of using the built-in
    /// template. The content is treated opaquely.
    pub fn with_template_source(mut self, http: RequestClient, url: impl Into<String>) -> Self {
        self.template_source = Some((http, url.into()));
        self
    }

    /// Resolves the markup template if a source is configured. Any failure
    /// falls back to the built-in markup; toasts must keep working.
    pub async fn prefetch_template(&mut self) {
        if self.template.is_some() {
            return;
        }
        let Some((http, url)) = self.template_source.clone() else {
            return;
        };
        self.template = Some(match http.request(&url, None, &HeaderMap::new()).await {
            Ok(result) if result.ok => result.text,
            Ok(result) => {
                warn!("toast template fetch returned HTTP {}", result.status);
                FALLBACK_TEMPLATE.to_string()
            }
            Err(err) => {
                warn!("toast template fetch failed: {err}");
                FALLBACK_TEMPLATE.to_string()
            }
        });
    }

    /// Queue a toast. The container exists from the first queued toast
    /// onward.
    pub fn push(&mut self, message: ToastMessage) -> ToastId {
        if self.toasts.is_empty() {
            self.surface.ensure_container();
        }
        let id = ToastId::fresh();
        debug!("toast queued: [{}] {}", message.kind.slug(), message.text);
        self.toasts.push(ToastSlot {
            id,
            message,
            phase: ToastPhase::Created,
            queued_at: Instant::now(),
            shown_at: None,
        });
        id
    }

    /// Frame tick: queued toasts whose entry delay has elapsed get their
    /// content inserted and start counting down.
    pub fn on_frame(&mut self, now: Instant) {
        let template = self
            .template
            .clone()
            .unwrap_or_else(|| FALLBACK_TEMPLATE.to_string());
        for slot in &mut self.toasts {
            if slot.phase == ToastPhase::Created
                && now.saturating_duration_since(slot.queued_at) >= self.entry_delay
            {
                slot.phase = ToastPhase::Displayed;
                slot.shown_at = Some(now);
                let markup = render_markup(&template, &slot.message);
                self.surface.insert(slot.id, &slot.message, &markup);
            }
        }
    }

    /// Duration check: displayed toasts past their duration start fading.
    /// The element is NOT removed here; removal waits for
    /// [`NotificationManager::on_transition_end`]. Returns the ids that
    /// started fading so instant-transition drivers can complete them.
    pub fn poll(&mut self, now: Instant) -> Vec<ToastId> {
        let mut fading: Vec<ToastId> = Vec::new();
        for slot in &mut self.toasts {
            if slot.phase == ToastPhase::Displayed
                && slot
                    .shown_at
                    .is_some_and(|shown| now.saturating_duration_since(shown) >= slot.message.duration)
            {
                slot.phase = ToastPhase::FadingOut;
                self.surface.begin_fade(slot.id);
                fading.push(slot.id);
            }
        }
        fading
    }

    /// Transition-finished signal for a fading toast: remove it, and tear
    /// the container down with the last one. Signals for unknown or
    /// non-fading ids are ignored.
    pub fn on_transition_end(&mut self, id: ToastId) {
        let Some(index) = self
            .toasts
            .iter()
            .position(|slot| slot.id == id && slot.phase == ToastPhase::FadingOut)
        else {
            return;
        };
        self.toasts[index].phase = ToastPhase::Removed;
        self.surface.remove(id);
        self.toasts.remove(index);
        if self.toasts.is_empty() {
            self.surface.release_container();
        }
    }

    pub fn live_count(&self) -> usize {
        self.toasts.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ToastMessage, ToastPhase)> {
        self.toasts.iter().map(|slot| (&slot.message, slot.phase))
    }
}

fn render_markup(template: &str, message: &ToastMessage) -> String {
    template
        .replace("{kind}", message.kind.slug())
        .replace("{text}", &message.text)
}
