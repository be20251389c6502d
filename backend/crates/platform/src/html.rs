//! HTML helpers for server-rendered pages.

/// Escape HTML special characters, quotes included.
///
/// Every value interpolated into a page goes through this, including
/// translated strings and flash messages.
pub fn escape(s: &str) -> String {
    html_escape::encode_quoted_attribute(s).into_owned()
}

/// Full HTML document around an already-rendered `body`.
///
/// `title` is escaped here; `body` is trusted markup.
pub fn document(lang: &str, title: &str, body_class: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/materialize/1.0.0/css/materialize.min.css">
</head>
<body class="{body_class}">
{body}
</body>
</html>"#,
        lang = escape(lang),
        title = escape(title),
        body_class = escape(body_class),
    )
}

/// `<a>` list switching the current page to each configured language.
///
/// `href_for` receives a language code and returns the target URL.
pub fn lang_switcher(langs: &[String], current: &str, href_for: impl Fn(&str) -> String) -> String {
    let items: Vec<String> = langs
        .iter()
        .map(|lang| {
            let class = if lang == current { " class=\"active\"" } else { "" };
            format!(
                r#"<li{class}><a href="{href}">{label}</a></li>"#,
                href = escape(&href_for(lang)),
                label = escape(&lang.to_uppercase()),
            )
        })
        .collect();

    format!(r#"<ul class="lang-switcher">{}</ul>"#, items.concat())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        let escaped = escape(r#"<script>alert("x") & 'y'</script>"#);
        assert!(escaped.starts_with("&lt;script&gt;"));
        assert!(escaped.contains("&amp;"));
        assert!(!escaped.contains('"'));
        assert!(!escaped.contains('\''));
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_document_escapes_title() {
        let page = document("en", "<Sign in>", "teal", "<main></main>");
        assert!(page.contains("<title>&lt;Sign in&gt;</title>"));
        assert!(page.contains(r#"<html lang="en">"#));
        assert!(page.contains("<main></main>"));
    }

    #[test]
    fn test_lang_switcher_marks_current() {
        let langs = vec!["en".to_string(), "ru".to_string()];
        let html = lang_switcher(&langs, "ru", |l| format!("/{l}/signin"));
        assert!(html.contains(r#"<li><a href="/en/signin">EN</a></li>"#));
        assert!(html.contains(r#"<li class="active"><a href="/ru/signin">RU</a></li>"#));
    }
}
