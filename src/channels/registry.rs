use std::path::{Path, PathBuf};

use serenity::builder::CreateMessage;
use serenity::model::id::{ChannelId, GuildId};
use tracing::{debug, info, warn};

use super::slug::channel_slug;
use super::store::{MappingFile, Mappings};
use crate::discord::ChatPlatform;
use crate::error::{AppError, AppResult};

/// Rig → channel mapping for one guild, persisted write-through to a JSON file.
///
/// Cached ids are trusted as-is: a channel deleted directly in Discord keeps
/// its stale mapping until [`ChannelRegistry::delete`] is called.
///
/// Mutations take `&mut self` and nothing is locked internally; share a
/// registry between tasks only behind a single lock (see
/// [`crate::notifier::RigNotifier`]).
pub struct ChannelRegistry<P> {
    platform: P,
    guild_id: GuildId,
    store: MappingFile,
    mappings: Mappings,
}

impl<P: ChatPlatform> ChannelRegistry<P> {
    /// Loads the mapping file. A missing file gives an empty registry; a
    /// corrupt one is an error.
    pub async fn load(
        platform: P,
        guild_id: GuildId,
        mappings_file: impl Into<PathBuf>,
    ) -> AppResult<Self> {
        let store = MappingFile::new(mappings_file);
        let mappings = store.load().await?;

        info!(
            guild_id = %guild_id,
            path = %store.path().display(),
            rigs = mappings.len(),
            "🗂️ Channel registry loaded"
        );

        Ok(Self {
            platform,
            guild_id,
            store,
            mappings,
        })
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn guild_id(&self) -> GuildId {
        self.guild_id
    }

    pub fn mappings_file(&self) -> &Path {
        self.store.path()
    }

    /// Returns the rig's channel, creating it in the guild the first time.
    pub async fn get_or_create(&mut self, rig_name: &str) -> AppResult<ChannelId> {
        if let Some(channel_id) = self.mappings.get(rig_name) {
            debug!(rig = rig_name, channel_id = %channel_id, "🗂️ Using cached channel");
            return Ok(*channel_id);
        }

        let name = channel_slug(rig_name);
        let topic = format!("Notifications from Gas Town rig: {rig_name}");

        let channel_id = self
            .platform
            .create_text_channel(self.guild_id, &name, &topic)
            .await
            .map_err(|e| AppError::RemoteCreate {
                rig: rig_name.to_string(),
                name: name.clone(),
                source: Box::new(e),
            })?;

        info!(rig = rig_name, channel = %name, channel_id = %channel_id, "🗂️ Created rig channel");

        // Kept in memory even if the save below fails: the channel exists remotely.
        self.mappings.insert(rig_name.to_string(), channel_id);
        self.store.save(&self.mappings).await?;

        let intro = CreateMessage::new().content(format!(
            "🚂 **Gas Town Rig Channel Created**\nThis channel receives notifications from the `{rig_name}` rig."
        ));
        if let Err(e) = self.platform.send_message(channel_id, intro).await {
            warn!(rig = rig_name, channel_id = %channel_id, error = %e, "🗂️ ⚠️ Could not post channel introduction");
        }

        Ok(channel_id)
    }

    pub fn channel_id(&self, rig_name: &str) -> Option<ChannelId> {
        self.mappings.get(rig_name).copied()
    }

    /// Snapshot of the current mappings; later changes aren't reflected.
    pub fn list_mappings(&self) -> Mappings {
        self.mappings.clone()
    }

    /// Deletes the rig's channel and forgets it. Returns `false` when the rig
    /// has no channel.
    pub async fn delete(&mut self, rig_name: &str) -> AppResult<bool> {
        let Some(channel_id) = self.channel_id(rig_name) else {
            return Ok(false);
        };

        self.platform
            .delete_channel(channel_id)
            .await
            .map_err(|e| AppError::RemoteDelete {
                rig: rig_name.to_string(),
                channel_id,
                source: Box::new(e),
            })?;

        self.mappings.remove(rig_name);
        self.store.save(&self.mappings).await?;

        info!(rig = rig_name, channel_id = %channel_id, "🗂️ Deleted rig channel");

        Ok(true)
    }
}
