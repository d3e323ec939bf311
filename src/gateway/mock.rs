//! Offline mock translation backend.
//!
//! Preserves the placeholder semantics of the original demo service: a fixed
//! artificial delay, then a first case-insensitive substring substitution for
//! a handful of known phrases per language pair.  Text for a pair without a
//! phrase table passes through unchanged.

use std::time::Duration;

use async_trait::async_trait;

use super::{GatewayError, TranslationGateway, TranslationRequest, TranslationResponse};

/// Default artificial latency, matching the original demo.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(600);

/// Phrase substitutions for one language pair, plus the suffix appended when
/// no phrase matches.
struct PhraseTable {
    source: &'static str,
    target: &'static str,
    phrases: &'static [(&'static str, &'static str)],
    fallback_suffix: &'static str,
}

const PHRASE_TABLES: &[PhraseTable] = &[
    PhraseTable {
        source: "en-US",
        target: "es-ES",
        phrases: &[
            ("hello", "hola"),
            ("thank you", "gracias"),
            ("goodbye", "adiós"),
            ("help", "ayuda"),
        ],
        fallback_suffix: " (en Español)",
    },
    PhraseTable {
        source: "es-ES",
        target: "en-US",
        phrases: &[
            ("hola", "hello"),
            ("gracias", "thank you"),
            ("adiós", "goodbye"),
            ("ayuda", "help"),
        ],
        fallback_suffix: " (in English)",
    },
    PhraseTable {
        source: "en-US",
        target: "fr-FR",
        phrases: &[("hello", "bonjour"), ("thank you", "merci")],
        fallback_suffix: " (en Français)",
    },
];

// ---------------------------------------------------------------------------
// MockGateway
// ---------------------------------------------------------------------------

/// The placeholder translation backend.
pub struct MockGateway {
    delay: Duration,
}

impl MockGateway {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Apply the phrase table for the request's language pair.
    fn render(request: &TranslationRequest) -> String {
        let table = PHRASE_TABLES.iter().find(|t| {
            t.source == request.source_language && t.target == request.target_language
        });
        let Some(table) = table else {
            // No table for this pair — pass the text through.
            return request.text.clone();
        };

        for (phrase, replacement) in table.phrases {
            if let Some(replaced) = replace_first_ignore_case(&request.text, phrase, replacement) {
                return replaced;
            }
        }
        format!("{}{}", request.text, table.fallback_suffix)
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

#[async_trait]
impl TranslationGateway for MockGateway {
    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResponse, GatewayError> {
        tokio::time::sleep(self.delay).await;

        if request.source_language == request.target_language {
            return Ok(TranslationResponse::passthrough(request));
        }

        Ok(TranslationResponse {
            translated_text: Self::render(request),
            source_language: request.source_language.clone(),
            target_language: request.target_language.clone(),
        })
    }
}

/// Replace the first case-insensitive occurrence of `needle` in `haystack`.
/// Returns `None` when `needle` does not occur.
fn replace_first_ignore_case(haystack: &str, needle: &str, replacement: &str) -> Option<String> {
    let (start, end) = find_ignore_case(haystack, needle)?;
    let mut out = String::with_capacity(haystack.len() + replacement.len());
    out.push_str(&haystack[..start]);
    out.push_str(replacement);
    out.push_str(&haystack[end..]);
    Some(out)
}

/// Byte range of the first case-insensitive occurrence of `needle`.
fn find_ignore_case(haystack: &str, needle: &str) -> Option<(usize, usize)> {
    if needle.is_empty() {
        return None;
    }
    for (start, _) in haystack.char_indices() {
        let mut end = start;
        let mut hay = haystack[start..].chars();
        let mut matched = true;
        for nc in needle.chars() {
            match hay.next() {
                Some(hc) if hc.to_lowercase().eq(nc.to_lowercase()) => end += hc.len_utf8(),
                _ => {
                    matched = false;
                    break;
                }
            }
        }
        if matched {
            return Some((start, end));
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> MockGateway {
        MockGateway::new(Duration::ZERO)
    }

    fn request(text: &str, source: &str, target: &str) -> TranslationRequest {
        TranslationRequest {
            text: text.into(),
            source_language: source.into(),
            target_language: target.into(),
        }
    }

    #[tokio::test]
    async fn same_language_is_identity() {
        let resp = gateway()
            .translate(&request("hello there", "en-US", "en-US"))
            .await
            .unwrap();
        assert_eq!(resp.translated_text, "hello there");
    }

    #[tokio::test]
    async fn english_to_spanish_replaces_hello() {
        let resp = gateway()
            .translate(&request("hello there", "en-US", "es-ES"))
            .await
            .unwrap();
        assert_eq!(resp.translated_text, "hola there");
    }

    #[tokio::test]
    async fn spanish_to_english_replaces_gracias_case_insensitively() {
        let resp = gateway()
            .translate(&request("Gracias amigo", "es-ES", "en-US"))
            .await
            .unwrap();
        assert_eq!(resp.translated_text, "thank you amigo");
    }

    #[tokio::test]
    async fn accented_phrase_matches() {
        let resp = gateway()
            .translate(&request("Adiós amigo", "es-ES", "en-US"))
            .await
            .unwrap();
        assert_eq!(resp.translated_text, "goodbye amigo");
    }

    #[tokio::test]
    async fn english_to_french_replaces_hello() {
        let resp = gateway()
            .translate(&request("Hello Marie", "en-US", "fr-FR"))
            .await
            .unwrap();
        assert_eq!(resp.translated_text, "bonjour Marie");
    }

    #[tokio::test]
    async fn unmatched_text_gets_language_suffix() {
        let resp = gateway()
            .translate(&request("good morning", "en-US", "es-ES"))
            .await
            .unwrap();
        assert_eq!(resp.translated_text, "good morning (en Español)");
    }

    #[tokio::test]
    async fn pair_without_table_passes_through() {
        let resp = gateway()
            .translate(&request("hello", "de-DE", "ja-JP"))
            .await
            .unwrap();
        assert_eq!(resp.translated_text, "hello");
    }

    #[tokio::test]
    async fn response_echoes_language_pair() {
        let resp = gateway()
            .translate(&request("hello", "en-US", "es-ES"))
            .await
            .unwrap();
        assert_eq!(resp.source_language, "en-US");
        assert_eq!(resp.target_language, "es-ES");
    }

    // --- replace_first_ignore_case ---

    #[test]
    fn replace_only_touches_first_occurrence() {
        assert_eq!(
            replace_first_ignore_case("hello hello", "hello", "hola"),
            Some("hola hello".into())
        );
    }

    #[test]
    fn replace_none_when_absent() {
        assert_eq!(replace_first_ignore_case("bonjour", "hello", "hola"), None);
    }

    #[test]
    fn replace_handles_mid_string_match() {
        assert_eq!(
            replace_first_ignore_case("I said HELLO there", "hello", "hola"),
            Some("I said hola there".into())
        );
    }
}
