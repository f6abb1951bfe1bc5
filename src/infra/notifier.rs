use tracing::{info, warn};
use crate::domain::{
    models::notification::{Notification, ToastVariant},
    ports::Notifier,
};

/// Toasts for a headless deployment end up in the service log.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.variant {
            ToastVariant::Default => info!(title = %notification.title, "{}", notification.description),
            ToastVariant::Warning | ToastVariant::Destructive => {
                warn!(title = %notification.title, variant = ?notification.variant, "{}", notification.description)
            }
        }
    }
}
