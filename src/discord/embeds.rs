use serenity::builder::{CreateEmbed, CreateEmbedFooter, CreateMessage};

use crate::formatter::DisplayPayload;

impl DisplayPayload {
    pub fn to_embed(&self) -> CreateEmbed {
        let mut embed = CreateEmbed::new()
            .title(self.title())
            .color(self.color())
            .timestamp(self.timestamp());

        // Discord rejects empty descriptions.
        if !self.description().is_empty() {
            embed = embed.description(self.description());
        }

        if !self.fields().is_empty() {
            embed = embed.fields(
                self.fields()
                    .iter()
                    .map(|f| (f.name.clone(), f.value.clone(), f.inline)),
            );
        }

        if let Some(footer) = self.footer() {
            embed = embed.footer(CreateEmbedFooter::new(footer));
        }

        embed
    }

    pub fn to_message(&self) -> CreateMessage {
        CreateMessage::new().embed(self.to_embed())
    }
}
