//! Language type: the closed set of languages this assistant understands.
//!
//! The source hint is one of Auto-Detect, English or Hindi; the target is
//! always Odia. Serde names match the strings the persisted history uses,
//! so history written by earlier builds deserializes unchanged.

use serde::{Deserialize, Serialize};

/// A supported language, as a closed variant rather than a free-form string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    /// Let the service identify whether the input is English or Hindi.
    #[serde(rename = "Auto-Detect")]
    AutoDetect,
    English,
    Hindi,
    Odia,
}

impl Language {
    /// Display name, identical to the serialized form.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AutoDetect => "Auto-Detect",
            Self::English => "English",
            Self::Hindi => "Hindi",
            Self::Odia => "Odia",
        }
    }

    /// The three hints a user can select for the source side.
    pub fn source_hints() -> [Language; 3] {
        [Self::AutoDetect, Self::English, Self::Hindi]
    }

    /// Parse a user-entered hint name. Accepts the display names
    /// case-insensitively plus the short forms used by the terminal front end.
    pub fn parse_hint(value: &str) -> Option<Language> {
        match value.trim().to_lowercase().as_str() {
            "auto" | "auto-detect" | "autodetect" => Some(Self::AutoDetect),
            "en" | "english" => Some(Self::English),
            "hi" | "hindi" => Some(Self::Hindi),
            _ => None,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Name Tests ====================

    #[test]
    fn test_names_match_display() {
        assert_eq!(Language::AutoDetect.name(), "Auto-Detect");
        assert_eq!(Language::English.name(), "English");
        assert_eq!(Language::Hindi.name(), "Hindi");
        assert_eq!(Language::Odia.name(), "Odia");
        assert_eq!(Language::Hindi.to_string(), "Hindi");
    }

    // ==================== Serde Tests ====================

    #[test]
    fn test_serializes_to_display_strings() {
        assert_eq!(
            serde_json::to_string(&Language::AutoDetect).unwrap(),
            "\"Auto-Detect\""
        );
        assert_eq!(
            serde_json::to_string(&Language::Odia).unwrap(),
            "\"Odia\""
        );
    }

    #[test]
    fn test_deserializes_legacy_history_values() {
        let lang: Language = serde_json::from_str("\"Auto-Detect\"").unwrap();
        assert_eq!(lang, Language::AutoDetect);
        let lang: Language = serde_json::from_str("\"Hindi\"").unwrap();
        assert_eq!(lang, Language::Hindi);
    }

    #[test]
    fn test_rejects_unknown_values() {
        assert!(serde_json::from_str::<Language>("\"Klingon\"").is_err());
    }

    // ==================== Hint Parsing Tests ====================

    #[test]
    fn test_parse_hint_variants() {
        assert_eq!(Language::parse_hint("auto"), Some(Language::AutoDetect));
        assert_eq!(Language::parse_hint("Auto-Detect"), Some(Language::AutoDetect));
        assert_eq!(Language::parse_hint("en"), Some(Language::English));
        assert_eq!(Language::parse_hint("English"), Some(Language::English));
        assert_eq!(Language::parse_hint(" hindi "), Some(Language::Hindi));
        assert_eq!(Language::parse_hint("odia"), None);
        assert_eq!(Language::parse_hint(""), None);
    }

    #[test]
    fn test_source_hints_exclude_target() {
        let hints = Language::source_hints();
        assert_eq!(hints.len(), 3);
        assert!(!hints.contains(&Language::Odia));
    }
}
