//! User-facing notices (the storefront's toast messages).

use tracing::{error, warn};

use crate::cart_actor::CartError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// A message meant for the shopper, with the failure that caused it.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
    pub cause: Option<CartError>,
}

impl Notice {
    pub fn warning(message: impl Into<String>, cause: CartError) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            cause: Some(cause),
        }
    }

    pub fn error(message: impl Into<String>, cause: CartError) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            cause: Some(cause),
        }
    }
}

/// Fire-and-forget sink for notices.
pub trait Notifier: Send + Sync + 'static {
    fn notify(&self, notice: Notice);
}

/// Writes notices to the log instead of a UI.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        let cause = notice.cause.as_ref().map(ToString::to_string).unwrap_or_default();
        match notice.severity {
            Severity::Warning => warn!(%cause, "{}", notice.message),
            Severity::Error => error!(%cause, "{}", notice.message),
        }
    }
}
