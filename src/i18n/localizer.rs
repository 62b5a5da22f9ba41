use anyhow::{anyhow, Context, Result};
use fluent_bundle::{concurrent::FluentBundle, FluentArgs, FluentResource};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::i18n::language::SupportedLanguage;

pub type Bundle = FluentBundle<FluentResource>;

// Shipped translations, used when a locale directory is absent on disk.
const EMBEDDED_FR: &str = include_str!("../../locales/fr/common.ftl");
const EMBEDDED_EN: &str = include_str!("../../locales/en/common.ftl");

/// Loads Fluent resources and resolves localized messages.
pub struct Localizer {
    bundles: HashMap<SupportedLanguage, Bundle>,
    default_language: SupportedLanguage,
}

impl Localizer {
    /// Load every supported locale, preferring `.ftl` files under
    /// `locales/<code>/` and falling back to the embedded resources.
    pub fn load() -> Result<Self> {
        let mut bundles = HashMap::new();
        for language in SupportedLanguage::all() {
            bundles.insert(*language, load_locale(*language)?);
        }
        Ok(Self {
            bundles,
            default_language: SupportedLanguage::default(),
        })
    }

    /// Resolve a message for a specific language, falling back to the
    /// default language's bundle when the requested one is unavailable.
    pub fn message(
        &self,
        language: SupportedLanguage,
        key: &str,
        args: Option<&FluentArgs>,
    ) -> Result<String> {
        let bundle = self
            .bundles
            .get(&language)
            .or_else(|| self.bundles.get(&self.default_language))
            .ok_or_else(|| anyhow!("No bundle available for language: {}", language))?;

        let message = bundle
            .get_message(key)
            .ok_or_else(|| anyhow!("Message not found: {}", key))?;
        let pattern = message
            .value()
            .ok_or_else(|| anyhow!("Message has no value: {}", key))?;

        let mut errors = Vec::new();
        let formatted = bundle.format_pattern(pattern, args, &mut errors);
        if !errors.is_empty() {
            tracing::warn!("Fluent formatting errors for key '{}': {:?}", key, errors);
        }

        Ok(formatted.into_owned())
    }

    /// Resolve a message, degrading to the key itself so user-facing
    /// strings never go missing entirely.
    pub fn text(&self, language: SupportedLanguage, key: &str) -> String {
        self.message(language, key, None)
            .unwrap_or_else(|_| key.to_string())
    }

    pub fn text_with_args(
        &self,
        language: SupportedLanguage,
        key: &str,
        args: &FluentArgs,
    ) -> String {
        self.message(language, key, Some(args))
            .unwrap_or_else(|_| key.to_string())
    }

    pub fn has_message(&self, language: SupportedLanguage, key: &str) -> bool {
        self.bundles
            .get(&language)
            .map(|bundle| bundle.has_message(key))
            .unwrap_or(false)
    }

    pub fn default_language(&self) -> SupportedLanguage {
        self.default_language
    }
}

fn load_locale(language: SupportedLanguage) -> Result<Bundle> {
    let mut bundle = FluentBundle::new_concurrent(vec![language.lang_id()]);
    let locale_dir = format!("locales/{}", language.code());

    let mut loaded_files = 0;
    if Path::new(&locale_dir).is_dir() {
        let paths = fs::read_dir(&locale_dir)
            .with_context(|| format!("Failed to read locale directory: {}", locale_dir))?;
        for path in paths {
            let path = path?.path();
            if path.extension().and_then(|s| s.to_str()) == Some("ftl") {
                let content = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read file: {:?}", path))?;
                add_resource(&mut bundle, content, &format!("{:?}", path))?;
                loaded_files += 1;
            }
        }
    }

    if loaded_files == 0 {
        let embedded = match language {
            SupportedLanguage::French => EMBEDDED_FR,
            SupportedLanguage::English => EMBEDDED_EN,
        };
        add_resource(&mut bundle, embedded.to_string(), "embedded")?;
        tracing::info!("Using embedded translations for locale {}", language.code());
    } else {
        tracing::info!("Loaded {} FTL files for locale {}", loaded_files, language.code());
    }

    Ok(bundle)
}

fn add_resource(bundle: &mut Bundle, content: String, source: &str) -> Result<()> {
    let resource = FluentResource::try_new(content)
        .map_err(|(_, errors)| anyhow!("Failed to parse FTL resource {source}: {errors:?}"))?;
    bundle
        .add_resource(resource)
        .map_err(|errors| anyhow!("Failed to add resource to bundle: {errors:?}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_resources_resolve_in_both_languages() {
        let localizer = Localizer::load().unwrap();
        let fr = localizer.text(SupportedLanguage::French, "app-name");
        let en = localizer.text(SupportedLanguage::English, "app-name");
        assert_eq!(fr, "EcoLink");
        assert_eq!(en, "EcoLink");
        assert_ne!(
            localizer.text(SupportedLanguage::French, "problem-created"),
            localizer.text(SupportedLanguage::English, "problem-created")
        );
    }

    #[test]
    fn missing_key_degrades_to_the_key() {
        let localizer = Localizer::load().unwrap();
        assert_eq!(
            localizer.text(SupportedLanguage::French, "no-such-key"),
            "no-such-key"
        );
    }
}
