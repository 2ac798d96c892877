//! Rig → Discord channel registry.

mod registry;
mod slug;
mod store;

pub use registry::ChannelRegistry;
pub use slug::{CHANNEL_PREFIX, channel_slug};
pub use store::{MappingFile, Mappings};
