pub mod api;
pub mod edit;
pub mod list;
pub mod notify;
pub mod session;
pub mod store;

#[cfg(test)]
mod testing;

pub use api::HttpStore;
pub use edit::{EditOutcome, TaskEditor};
pub use list::{Mode, TaskList};
pub use notify::{LogNotifier, Notification, Notifier, NotifyKind};
pub use session::Session;
pub use store::TaskStore;
