//! Site-wide configuration shared by every page and redirect.

/// Application name, public base URL and the supported languages
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub app_name: String,
    /// Prefix of every redirect, without trailing slash. Empty for relative URLs.
    pub base_url: String,
    pub langs: Vec<String>,
    pub default_lang: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            app_name: "Quantum".to_string(),
            base_url: String::new(),
            langs: vec!["en".to_string(), "ru".to_string(), "am".to_string()],
            default_lang: "en".to_string(),
        }
    }
}

impl SiteConfig {
    pub fn new(
        app_name: impl Into<String>,
        base_url: impl Into<String>,
        langs: Vec<String>,
        default_lang: Option<String>,
    ) -> Self {
        let langs = if langs.is_empty() {
            Self::default().langs
        } else {
            langs
        };
        let default_lang = default_lang
            .filter(|lang| langs.contains(lang))
            .unwrap_or_else(|| langs[0].clone());

        Self {
            app_name: app_name.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            langs,
            default_lang,
        }
    }

    /// `lang` if supported, otherwise the default language
    pub fn resolve_lang<'a>(&'a self, lang: &'a str) -> &'a str {
        if self.langs.iter().any(|l| l == lang) {
            lang
        } else {
            &self.default_lang
        }
    }

    /// `{base_url}/{lang}{path}`; `path` is empty or starts with `/`
    pub fn url(&self, lang: &str, path: &str) -> String {
        format!("{}/{}{}", self.base_url, lang, path)
    }

    /// Page title: `"{label} | {app_name}"`
    pub fn title(&self, label: &str) -> String {
        format!("{} | {}", label, self.app_name)
    }
}
