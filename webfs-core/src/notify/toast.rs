//! src/notify/toast.rs
//! ============================================================================
//! # Toast: Transient On-Page Message
//!
//! Message payload and lifecycle vocabulary for the notification system.
//! Phase transitions are driven by [`NotificationManager`], never here.
//!
//! [`NotificationManager`]: crate::notify::manager::NotificationManager

use std::time::Duration;

use uuid::Uuid;

use crate::error::AppError;

const INFO_TTL: Duration = Duration::from_millis(3000);
const SUCCESS_TTL: Duration = Duration::from_millis(2000);
const WARNING_TTL: Duration = Duration::from_millis(5000);
const ERROR_TTL: Duration = Duration::from_millis(6000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastKind {
    pub fn slug(self) -> &'static str {
        match self {
            ToastKind::Info => "info",
            ToastKind::Success => "success",
            ToastKind::Warning => "warning",
            ToastKind::Error => "error",
        }
    }
}

/// Lifecycle phase of a single toast:
/// `Created -> Displayed -> FadingOut -> Removed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    /// Queued; content not yet inserted so the entry animation can apply.
    Created,
    /// Visible, counting down its duration.
    Displayed,
    /// Opacity dropped to zero; waiting for the transition-finished signal.
    FadingOut,
    /// Gone from the surface.
    Removed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToastId(Uuid);

impl ToastId {
    pub(crate) fn fresh() -> Self {
        Self(Uuid::new_v4())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToastMessage {
    pub text: String,
    pub kind: ToastKind,
    /// How long the toast stays in `Displayed` before fading.
    pub duration: Duration,
}

impl ToastMessage {
    pub fn new(text: impl Into<String>, kind: ToastKind, duration: Duration) -> Self {
        Self {
            text: text.into(),
            kind,
            duration,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, ToastKind::Info, INFO_TTL)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, ToastKind::Success, SUCCESS_TTL)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(text, ToastKind::Warning, WARNING_TTL)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, ToastKind::Error, ERROR_TTL)
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// The single user-visible message for a recovered component failure.
    /// Protocol-level refusals are warnings; transport and payload
    /// breakage are errors.
    pub fn from_error(err: &AppError) -> Self {
        match err {
            AppError::Unauthorized { .. } => {
                Self::warning("file not deleted: missing or invalid authorization")
            }
            AppError::DeletionRejected { raw, .. } => {
                Self::warning(format!("file not deleted: {raw}"))
            }
            AppError::ListingFailed { .. } => Self::warning("could not list directory"),
            AppError::LookupInconsistency { name } => {
                Self::warning(format!("{name:?} is no longer in the listing"))
            }
            other => Self::error(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_mapping_levels() {
        let unauthorized = ToastMessage::from_error(&AppError::Unauthorized {
            path: "./a.txt".to_string(),
        });
        assert_eq!(unauthorized.kind, ToastKind::Warning);

        let rejected = ToastMessage::from_error(&AppError::DeletionRejected {
            code: 40,
            raw: "{\"code\":40}".to_string(),
        });
        assert_eq!(rejected.kind, ToastKind::Warning);
        assert!(rejected.text.contains("{\"code\":40}"));

        let transport = ToastMessage::from_error(&AppError::Task("boom".to_string()));
        assert_eq!(transport.kind, ToastKind::Error);
    }

    #[test]
    fn custom_duration_overrides_default() {
        let toast = ToastMessage::info("hi").with_duration(Duration::from_millis(100));
        assert_eq!(toast.duration, Duration::from_millis(100));
    }
}
