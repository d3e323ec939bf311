//! Fixed language table shared by capture, playback and the gateway.
//!
//! Language codes are opaque locale tags (e.g. `"en-US"`).  The table maps
//! each supported code to a human-readable display name; anything outside
//! the table displays as the raw code.

/// A supported language: locale tag plus display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// Locale tag, e.g. `"en-US"`.
    pub code: &'static str,
    /// Human-readable name, e.g. `"English"`.
    pub name: &'static str,
}

/// Locale used when a display name cannot be resolved to a code.
pub const DEFAULT_LOCALE: &str = "en-US";

/// All languages offered by the application, in display order.
pub const LANGUAGES: &[Language] = &[
    Language { code: "en-US", name: "English" },
    Language { code: "es-ES", name: "Spanish" },
    Language { code: "fr-FR", name: "French" },
    Language { code: "de-DE", name: "German" },
    Language { code: "zh-CN", name: "Chinese" },
    Language { code: "ja-JP", name: "Japanese" },
    Language { code: "ar-SA", name: "Arabic" },
    Language { code: "ru-RU", name: "Russian" },
];

/// Display name for `code`, falling back to the raw code when unknown.
pub fn display_name(code: &str) -> &str {
    LANGUAGES
        .iter()
        .find(|l| l.code == code)
        .map(|l| l.name)
        .unwrap_or(code)
}

/// Resolve a display name (case-insensitive) back to its locale tag.
pub fn code_for_name(name: &str) -> Option<&'static str> {
    LANGUAGES
        .iter()
        .find(|l| l.name.eq_ignore_ascii_case(name))
        .map(|l| l.code)
}

/// Resolve `language` — either a locale tag or a display name — to the
/// locale tag used for speech synthesis.  Unknown inputs use
/// [`DEFAULT_LOCALE`] rather than erroring.
pub fn locale_for(language: &str) -> &str {
    if let Some(l) = LANGUAGES.iter().find(|l| l.code == language) {
        return l.code;
    }
    code_for_name(language).unwrap_or(DEFAULT_LOCALE)
}

/// Returns `true` when `code` appears in the language table.
pub fn is_supported(code: &str) -> bool {
    LANGUAGES.iter().any(|l| l.code == code)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_known_code() {
        assert_eq!(display_name("es-ES"), "Spanish");
        assert_eq!(display_name("ja-JP"), "Japanese");
    }

    #[test]
    fn display_name_unknown_code_falls_back_to_code() {
        assert_eq!(display_name("xx-XX"), "xx-XX");
    }

    #[test]
    fn code_for_name_is_case_insensitive() {
        assert_eq!(code_for_name("spanish"), Some("es-ES"));
        assert_eq!(code_for_name("FRENCH"), Some("fr-FR"));
    }

    #[test]
    fn code_for_name_unknown_is_none() {
        assert_eq!(code_for_name("Klingon"), None);
    }

    #[test]
    fn locale_for_accepts_codes_and_names() {
        assert_eq!(locale_for("de-DE"), "de-DE");
        assert_eq!(locale_for("German"), "de-DE");
    }

    #[test]
    fn locale_for_unknown_uses_default() {
        assert_eq!(locale_for("Klingon"), DEFAULT_LOCALE);
    }

    #[test]
    fn every_code_is_supported_and_round_trips() {
        for lang in LANGUAGES {
            assert!(is_supported(lang.code));
            assert_eq!(code_for_name(lang.name), Some(lang.code));
        }
    }
}
