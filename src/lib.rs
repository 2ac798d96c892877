//! Discord plumbing for Gas Town notifications: event → embed formatting and
//! a persistent rig → channel registry.

pub mod channels;
pub mod config;
pub mod discord;
pub mod error;
pub mod events;
pub mod formatter;
pub mod logging;
pub mod notifier;

pub use channels::{ChannelRegistry, channel_slug};
pub use config::Config;
pub use discord::ChatPlatform;
pub use error::{AppError, AppResult};
pub use events::{Attributes, Event, EventKind};
pub use formatter::{DisplayField, DisplayPayload, NotificationFormatter, format_event};
pub use notifier::RigNotifier;
