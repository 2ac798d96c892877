use std::env;
use std::path::PathBuf;

use serenity::model::id::GuildId;

use crate::error::AppError;

pub const DEFAULT_MAPPINGS_FILE: &str = "channel_mappings.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub guild_id: GuildId,
    pub mappings_file: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let discord_token = env::var("DISCORD_TOKEN")
            .map_err(|_| AppError::Config("DISCORD_TOKEN must be set".into()))?;

        let guild_id = env::var("DISCORD_GUILD_ID")
            .map_err(|_| AppError::Config("DISCORD_GUILD_ID must be set".into()))
            .and_then(|v| parse_guild_id(&v))?;

        Ok(Self {
            discord_token,
            guild_id,
            mappings_file: mappings_file_from_env(),
        })
    }
}

/// Path of the rig mapping file, the only setting the registry reads on its own.
pub fn mappings_file_from_env() -> PathBuf {
    env::var("CHANNEL_MAPPINGS_FILE")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MAPPINGS_FILE))
}

fn parse_guild_id(raw: &str) -> Result<GuildId, AppError> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|id| *id != 0)
        .map(GuildId::new)
        .ok_or_else(|| AppError::Config(format!("DISCORD_GUILD_ID is not a valid id: {raw:?}")))
}
