//! The three Discord capabilities the registry and notifier rely on.

use std::sync::Arc;

use async_trait::async_trait;
use serenity::builder::{CreateChannel, CreateMessage};
use serenity::http::Http;
use serenity::model::channel::ChannelType;
use serenity::model::id::{ChannelId, GuildId};

#[async_trait]
/// A chat platform able to create/delete text channels and post into them.
pub trait ChatPlatform: Send + Sync {
    async fn create_text_channel(
        &self,
        guild_id: GuildId,
        name: &str,
        topic: &str,
    ) -> serenity::Result<ChannelId>;

    async fn delete_channel(&self, channel_id: ChannelId) -> serenity::Result<()>;

    async fn send_message(&self, channel_id: ChannelId, msg: CreateMessage)
    -> serenity::Result<()>;
}

#[async_trait]
impl ChatPlatform for Http {
    async fn create_text_channel(
        &self,
        guild_id: GuildId,
        name: &str,
        topic: &str,
    ) -> serenity::Result<ChannelId> {
        let builder = CreateChannel::new(name)
            .kind(ChannelType::Text)
            .topic(topic);
        guild_id
            .create_channel(self, builder)
            .await
            .map(|channel| channel.id)
    }

    async fn delete_channel(&self, channel_id: ChannelId) -> serenity::Result<()> {
        channel_id.delete(self).await.map(|_| ())
    }

    async fn send_message(
        &self,
        channel_id: ChannelId,
        msg: CreateMessage,
    ) -> serenity::Result<()> {
        channel_id.send_message(self, msg).await.map(|_| ())
    }
}

#[async_trait]
impl<P: ChatPlatform + ?Sized> ChatPlatform for Arc<P> {
    async fn create_text_channel(
        &self,
        guild_id: GuildId,
        name: &str,
        topic: &str,
    ) -> serenity::Result<ChannelId> {
        (**self).create_text_channel(guild_id, name, topic).await
    }

    async fn delete_channel(&self, channel_id: ChannelId) -> serenity::Result<()> {
        (**self).delete_channel(channel_id).await
    }

    async fn send_message(
        &self,
        channel_id: ChannelId,
        msg: CreateMessage,
    ) -> serenity::Result<()> {
        (**self).send_message(channel_id, msg).await
    }
}
