use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;
use unic_langid::LanguageIdentifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SupportedLanguage {
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "en")]
    English,
}

impl SupportedLanguage {
    /// Get all supported languages
    pub fn all() -> &'static [SupportedLanguage] {
        &[SupportedLanguage::French, SupportedLanguage::English]
    }

    /// Get the default language (French)
    pub fn default() -> Self {
        SupportedLanguage::French
    }

    /// Get the language code as a string
    pub fn code(&self) -> &'static str {
        match self {
            SupportedLanguage::French => "fr",
            SupportedLanguage::English => "en",
        }
    }

    /// Get the language identifier for Fluent
    pub fn lang_id(&self) -> LanguageIdentifier {
        match self {
            SupportedLanguage::French => "fr".parse().unwrap(),
            SupportedLanguage::English => "en-US".parse().unwrap(),
        }
    }

    /// Get the human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            SupportedLanguage::French => "Français",
            SupportedLanguage::English => "English",
        }
    }

    /// Parse from Accept-Language header
    pub fn from_accept_language(accept_language: &str) -> Self {
        for lang_part in accept_language.split(',') {
            let lang = lang_part.trim().split(';').next().unwrap_or("");
            let lang = lang.to_lowercase();

            if lang.starts_with("fr") {
                return SupportedLanguage::French;
            } else if lang.starts_with("en") {
                return SupportedLanguage::English;
            }
        }

        // Default to French if no supported language is found
        Self::default()
    }
}

impl Display for SupportedLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for SupportedLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fr" | "french" | "français" | "francais" => Ok(SupportedLanguage::French),
            "en" | "english" | "en-us" => Ok(SupportedLanguage::English),
            _ => Err(format!("Unsupported language: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accept_language_picks_the_first_supported_tag() {
        assert_eq!(
            SupportedLanguage::from_accept_language("fr-TN,fr;q=0.9,en;q=0.8"),
            SupportedLanguage::French
        );
        assert_eq!(
            SupportedLanguage::from_accept_language("en-GB,en;q=0.9"),
            SupportedLanguage::English
        );
        assert_eq!(
            SupportedLanguage::from_accept_language("de-DE,ar;q=0.8"),
            SupportedLanguage::French
        );
    }

    #[test]
    fn parse_accepts_codes_and_names() {
        assert_eq!("fr".parse::<SupportedLanguage>(), Ok(SupportedLanguage::French));
        assert_eq!("English".parse::<SupportedLanguage>(), Ok(SupportedLanguage::English));
        assert!("tr".parse::<SupportedLanguage>().is_err());
    }
}
