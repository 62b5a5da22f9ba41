use axum::{extract::Request, http::HeaderMap, middleware::Next, response::Response};

use crate::i18n::SupportedLanguage;

/// Language detection middleware that extracts language preference from headers
pub async fn language_middleware(mut request: Request, next: Next) -> Response {
    let language = detect_language_from_headers(request.headers());

    // Add the detected language to request extensions
    request.extensions_mut().insert(language);

    next.run(request).await
}

/// Detect language from various HTTP headers
fn detect_language_from_headers(headers: &HeaderMap) -> SupportedLanguage {
    // Priority order for language detection:
    // 1. X-Language header (explicit language setting)
    // 2. Accept-Language header (browser preference)

    if let Some(lang_header) = headers.get("X-Language") {
        if let Ok(lang_str) = lang_header.to_str() {
            if let Ok(language) = lang_str.parse::<SupportedLanguage>() {
                return language;
            }
        }
    }

    if let Some(accept_language) = headers.get("Accept-Language") {
        if let Ok(accept_language_str) = accept_language.to_str() {
            return SupportedLanguage::from_accept_language(accept_language_str);
        }
    }

    // Default to French
    SupportedLanguage::default()
}

/// Extension trait for extracting language from request
pub trait LanguageExtractor {
    fn get_language(&self) -> SupportedLanguage;
}

impl LanguageExtractor for Request {
    fn get_language(&self) -> SupportedLanguage {
        self.extensions()
            .get::<SupportedLanguage>()
            .copied()
            .unwrap_or(SupportedLanguage::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn explicit_header_wins_over_accept_language() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Language", HeaderValue::from_static("en"));
        headers.insert("Accept-Language", HeaderValue::from_static("fr-TN,fr;q=0.9"));
        assert_eq!(detect_language_from_headers(&headers), SupportedLanguage::English);
    }

    #[test]
    fn missing_headers_default_to_french() {
        assert_eq!(detect_language_from_headers(&HeaderMap::new()), SupportedLanguage::French);
    }
}
