//! Language and internationalization types

use serde::{Deserialize, Serialize};

/// Language used for locally generated user-facing messages
///
/// Messages returned by the backend are shown as-is; this only selects the
/// wording of client-side fallbacks and validation notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[default]
    #[serde(rename = "id")]
    Indonesian,
}

impl Language {
    /// Get language code (ISO 639-1)
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Indonesian => "id",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "id" | "indonesian" | "bahasa" => Ok(Language::Indonesian),
            _ => Err(format!("Unsupported language: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_serde() {
        assert_eq!("EN".parse::<Language>().unwrap(), Language::English);
        assert_eq!("bahasa".parse::<Language>().unwrap(), Language::Indonesian);
        assert!("fr".parse::<Language>().is_err());

        assert_eq!(serde_json::to_string(&Language::Indonesian).unwrap(), "\"id\"");
        let lang: Language = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(lang, Language::English);
    }
}
