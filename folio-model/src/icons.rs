use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Icon glyphs a social link can render with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialIcon {
    Github,
    Linkedin,
    Twitter,
    Youtube,
    Instagram,
    Mail,
    MessageSquare,
    Link,
}

impl SocialIcon {
    pub const ALL: [SocialIcon; 8] = [
        SocialIcon::Github,
        SocialIcon::Linkedin,
        SocialIcon::Twitter,
        SocialIcon::Youtube,
        SocialIcon::Instagram,
        SocialIcon::Mail,
        SocialIcon::MessageSquare,
        SocialIcon::Link,
    ];

    pub fn key(self) -> &'static str {
        match self {
            SocialIcon::Github => "github",
            SocialIcon::Linkedin => "linkedin",
            SocialIcon::Twitter => "twitter",
            SocialIcon::Youtube => "youtube",
            SocialIcon::Instagram => "instagram",
            SocialIcon::Mail => "mail",
            SocialIcon::MessageSquare => "messagesquare",
            SocialIcon::Link => "link",
        }
    }

    /// Case-insensitive lookup; `None` for keys with no glyph.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_ascii_lowercase();
        SocialIcon::ALL.into_iter().find(|icon| icon.key() == key)
    }
}

impl fmt::Display for SocialIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SocialIcon {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SocialIcon::from_key(s).ok_or_else(|| ValidationError::UnknownIcon(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(SocialIcon::from_key("GitHub"), Some(SocialIcon::Github));
        assert_eq!(
            SocialIcon::from_key("MessageSquare"),
            Some(SocialIcon::MessageSquare)
        );
    }

    #[test]
    fn unknown_keys_have_no_icon() {
        assert_eq!(SocialIcon::from_key("mastodon"), None);
        assert!("mastodon".parse::<SocialIcon>().is_err());
    }
}
