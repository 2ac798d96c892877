//! Routes formatted events to their rig channel.

use serenity::builder::CreateMessage;
use serenity::model::id::ChannelId;
use tokio::sync::Mutex;
use tracing::{debug, error};

use crate::channels::ChannelRegistry;
use crate::discord::ChatPlatform;
use crate::error::AppResult;
use crate::events::{Attributes, Event};
use crate::formatter::{Clock, DisplayPayload, NotificationFormatter, SystemClock};

/// Formats events, resolves (or creates) the rig channel and posts the embed.
///
/// Every registry access goes through one lock, so concurrent notifications
/// for a rig nobody has seen yet still create a single channel.
pub struct RigNotifier<P, C = SystemClock> {
    formatter: NotificationFormatter<C>,
    platform: P,
    registry: Mutex<ChannelRegistry<P>>,
}

impl<P, C> RigNotifier<P, C>
where
    P: ChatPlatform + Clone,
    C: Clock,
{
    pub fn new(registry: ChannelRegistry<P>, formatter: NotificationFormatter<C>) -> Self {
        Self {
            formatter,
            platform: registry.platform().clone(),
            registry: Mutex::new(registry),
        }
    }

    pub fn formatter(&self) -> &NotificationFormatter<C> {
        &self.formatter
    }

    /// The guarded registry, for listing or deleting rig channels.
    pub fn registry(&self) -> &Mutex<ChannelRegistry<P>> {
        &self.registry
    }

    pub async fn notify(&self, rig_name: &str, event: &Event) -> AppResult<ChannelId> {
        let payload = self.formatter.format_event(event);
        self.deliver(rig_name, &payload).await
    }

    /// Same as [`RigNotifier::notify`] for a kind string and raw attributes.
    pub async fn notify_raw(
        &self,
        rig_name: &str,
        kind: &str,
        attrs: &Attributes,
    ) -> AppResult<ChannelId> {
        let payload = self.formatter.format(kind, attrs);
        self.deliver(rig_name, &payload).await
    }

    /// Posts plain text prefixed with the rig name.
    pub async fn notify_text(&self, rig_name: &str, text: &str) -> AppResult<ChannelId> {
        let channel_id = self.channel_for(rig_name).await?;
        let msg = CreateMessage::new().content(format!("[{rig_name}] {text}"));
        self.send(rig_name, channel_id, msg).await
    }

    async fn deliver(&self, rig_name: &str, payload: &DisplayPayload) -> AppResult<ChannelId> {
        let channel_id = self.channel_for(rig_name).await?;
        debug!(rig = rig_name, title = payload.title(), "📨 Dispatching notification");
        self.send(rig_name, channel_id, payload.to_message()).await
    }

    async fn channel_for(&self, rig_name: &str) -> AppResult<ChannelId> {
        self.registry.lock().await.get_or_create(rig_name).await
    }

    async fn send(
        &self,
        rig_name: &str,
        channel_id: ChannelId,
        msg: CreateMessage,
    ) -> AppResult<ChannelId> {
        if let Err(e) = self.platform.send_message(channel_id, msg).await {
            error!(rig = rig_name, channel_id = %channel_id, error = %e, "📨 ❌ Failed to send notification");
            return Err(e.into());
        }
        Ok(channel_id)
    }
}
