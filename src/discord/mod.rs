mod embeds;
mod platform;

pub use platform::ChatPlatform;
