//! Overlay language.

use serde::{Deserialize, Serialize};

/// Environment variable that forces the overlay language.
pub const LANGUAGE_ENV: &str = "DISPLAY_HW_LANG";

/// Language used for overlay text and pattern names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    /// Simplified Chinese.
    Zh,
    /// English.
    #[default]
    En,
}

impl Language {
    /// The other language.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Zh => Self::En,
            Self::En => Self::Zh,
        }
    }

    /// Parses a short code such as `zh`, `zh_CN.UTF-8` or `en`.
    ///
    /// `en` is checked first, so `en_CN` is English.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.to_ascii_lowercase();
        if code.contains("en") {
            Some(Self::En)
        } else if is_chinese(&code) {
            Some(Self::Zh)
        } else {
            None
        }
    }

    /// Picks a language from [`LANGUAGE_ENV`], then `LANG`, else English.
    ///
    /// `lookup` reads an environment variable; pass `|k| std::env::var(k).ok()`
    /// in production.
    pub fn detect<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(lang) = lookup(LANGUAGE_ENV).as_deref().and_then(Self::from_code) {
            return lang;
        }
        match lookup("LANG") {
            Some(locale) if is_chinese(&locale.to_ascii_lowercase()) => Self::Zh,
            _ => Self::En,
        }
    }

    /// Detects from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::detect(|key| std::env::var(key).ok())
    }
}

fn is_chinese(code: &str) -> bool {
    code.contains("zh") || code.contains("cn")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_string())
        }
    }

    #[test]
    fn test_override_wins() {
        let lang = Language::detect(env(&[(LANGUAGE_ENV, "en"), ("LANG", "zh_CN.UTF-8")]));
        assert_eq!(lang, Language::En);
    }

    #[test]
    fn test_override_checks_english_first() {
        assert_eq!(Language::detect(env(&[(LANGUAGE_ENV, "en_CN")])), Language::En);
        assert_eq!(Language::detect(env(&[(LANGUAGE_ENV, "zh")])), Language::Zh);
        // unrecognized override falls through to LANG
        let lang = Language::detect(env(&[(LANGUAGE_ENV, "fr"), ("LANG", "zh_CN.UTF-8")]));
        assert_eq!(lang, Language::Zh);
    }

    #[test]
    fn test_lang_only_matches_chinese() {
        assert_eq!(Language::detect(env(&[("LANG", "en_CN.UTF-8")])), Language::Zh);
        assert_eq!(Language::detect(env(&[("LANG", "en_US.UTF-8")])), Language::En);
    }

    #[test]
    fn test_lang_fallback() {
        assert_eq!(Language::detect(env(&[("LANG", "zh_CN.UTF-8")])), Language::Zh);
        assert_eq!(Language::detect(env(&[("LANG", "de_DE.UTF-8")])), Language::En);
        assert_eq!(Language::detect(env(&[])), Language::En);
    }

    #[test]
    fn test_toggle() {
        assert_eq!(Language::Zh.toggled(), Language::En);
        assert_eq!(Language::En.toggled().toggled(), Language::En);
    }
}
