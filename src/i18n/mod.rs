pub mod helpers;
pub mod language;
pub mod localizer;

pub use helpers::I18n;
pub use language::SupportedLanguage;
pub use localizer::Localizer;

use anyhow::Result;
use std::collections::HashMap;

/// Initialize the i18n system with all supported locales
pub fn init_i18n() -> Result<Localizer> {
    Localizer::load()
}

/// Extract a dictionary of key-value pairs for client-side usage
pub fn extract_translations_for_client(
    localizer: &Localizer,
    language: SupportedLanguage,
    keys: &[&str],
) -> HashMap<String, String> {
    let mut translations = HashMap::new();

    for key in keys {
        if localizer.has_message(language, key) {
            translations.insert(key.to_string(), localizer.text(language, key));
        }
    }

    translations
}
