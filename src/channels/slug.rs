pub const CHANNEL_PREFIX: &str = "gt-";

/// Discord's maximum channel name length.
const CHANNEL_NAME_LIMIT: usize = 100;

/// Derives the Discord channel name of a rig: lowercase, every run of
/// non-alphanumeric characters collapsed into one `-`, prefixed with `gt-`.
pub fn channel_slug(rig_name: &str) -> String {
    let mut body = String::with_capacity(rig_name.len());
    let mut pending_separator = false;

    for c in rig_name.chars() {
        if c.is_alphanumeric() {
            if pending_separator && !body.is_empty() {
                body.push('-');
            }
            pending_separator = false;
            body.extend(c.to_lowercase());
        } else {
            pending_separator = true;
        }
    }

    if body.is_empty() {
        body.push_str("rig");
    }

    let mut slug = format!("{CHANNEL_PREFIX}{body}");
    if let Some((idx, _)) = slug.char_indices().nth(CHANNEL_NAME_LIMIT) {
        slug.truncate(idx);
        while slug.ends_with('-') {
            slug.pop();
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_collapses_separators() {
        assert_eq!(channel_slug("My Project"), "gt-my-project");
        assert_eq!(channel_slug("discord_bot"), "gt-discord-bot");
        assert_eq!(channel_slug("Gas  Town -- HQ"), "gt-gas-town-hq");
    }

    #[test]
    fn trims_leading_and_trailing_separators() {
        assert_eq!(channel_slug("  _gastown_ "), "gt-gastown");
        assert_eq!(channel_slug("v2.0!"), "gt-v2-0");
    }

    #[test]
    fn falls_back_when_nothing_is_left() {
        assert_eq!(channel_slug(""), "gt-rig");
        assert_eq!(channel_slug("___"), "gt-rig");
    }

    #[test]
    fn keeps_unicode_letters() {
        assert_eq!(channel_slug("Équipe Été"), "gt-équipe-été");
    }

    #[test]
    fn caps_length() {
        let slug = channel_slug(&"a".repeat(300));
        assert_eq!(slug.chars().count(), CHANNEL_NAME_LIMIT);
        assert!(slug.starts_with(CHANNEL_PREFIX));
    }
}
