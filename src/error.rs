use std::path::PathBuf;

use serenity::model::id::ChannelId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Mapping file {path:?} could not be accessed: {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Mapping file {path:?} is corrupt: {source}")]
    CorruptMappings {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to create channel {name:?} for rig {rig:?}: {source}")]
    RemoteCreate {
        rig: String,
        name: String,
        #[source]
        source: Box<serenity::Error>,
    },

    #[error("Failed to delete channel {channel_id} of rig {rig:?}: {source}")]
    RemoteDelete {
        rig: String,
        channel_id: ChannelId,
        #[source]
        source: Box<serenity::Error>,
    },

    #[error("Discord error: {0}")]
    Discord(Box<serenity::Error>),
}

impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::Discord(Box::new(err))
    }
}

pub type AppResult<T> = Result<T, AppError>;
