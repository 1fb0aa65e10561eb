use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Display language of the public site.
///
/// Every bilingual column pair is stored as `<field>_es` / `<field>_en`; the
/// language tag selects which one is exposed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Es,
    En,
}

impl Lang {
    pub const ALL: [Lang; 2] = [Lang::Es, Lang::En];

    pub fn as_str(self) -> &'static str {
        match self {
            Lang::Es => "es",
            Lang::En => "en",
        }
    }

    /// Selects the variant of a bilingual pair.
    pub fn pick<'a, T: ?Sized>(self, es: &'a T, en: &'a T) -> &'a T {
        match self {
            Lang::Es => es,
            Lang::En => en,
        }
    }

    /// Lenient parse used for cookies and query strings; anything unknown
    /// falls back to the default language.
    pub fn from_tag_or_default(tag: Option<&str>) -> Self {
        tag.and_then(|raw| raw.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lang {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "es" => Ok(Lang::Es),
            "en" => Ok(Lang::En),
            other => Err(ValidationError::UnknownLang(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pick_returns_matching_variant() {
        assert_eq!(Lang::Es.pick("hola", "hello"), "hola");
        assert_eq!(Lang::En.pick("hola", "hello"), "hello");
    }

    #[test]
    fn unknown_tags_fall_back_to_spanish() {
        assert_eq!(Lang::from_tag_or_default(Some("fr")), Lang::Es);
        assert_eq!(Lang::from_tag_or_default(None), Lang::Es);
        assert_eq!(Lang::from_tag_or_default(Some("EN")), Lang::En);
    }

    #[test]
    fn strict_parse_rejects_unknown_tags() {
        assert!(matches!(
            "de".parse::<Lang>(),
            Err(ValidationError::UnknownLang(tag)) if tag == "de"
        ));
    }
}
