//! Transient messages shown in the top-right corner
//!
//! Used for problems the user should know about but that don't stop the
//! app, such as an invalid configuration file.

mod notification_render;
mod notification_state;

pub use notification_render::render_notification;
pub use notification_state::{NotificationState, NotificationType};
