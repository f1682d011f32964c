#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotifyKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotifyKind,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NotifyKind::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NotifyKind::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Fire-and-forget display of a one-shot message. No queuing contract.
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the log, for headless use of the controllers.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotifyKind::Success => {
                tracing::info!(title = %notification.title, "{}", notification.message);
            }
            NotifyKind::Error => {
                tracing::error!(title = %notification.title, "{}", notification.message);
            }
        }
    }
}
