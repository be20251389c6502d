//! Server-rendered auth pages
//!
//! Every interpolated value is escaped; form field names match
//! [`crate::presentation::dto`].

use platform::html::{document, escape, lang_switcher};
use platform::i18n::Translator;
use platform::site::SiteConfig;

use crate::presentation::flash::Flash;

/// Everything a page needs besides its own form
pub struct PageContext<'a> {
    pub site: &'a SiteConfig,
    pub translator: &'a Translator,
    pub lang: &'a str,
    /// Path after the language segment, used by the language switcher
    pub path: &'a str,
    pub title: String,
    pub flash: Option<Flash>,
}

impl PageContext<'_> {
    /// Escaped translation
    fn t(&self, key: &str) -> String {
        escape(&self.translator.t(self.lang, key))
    }

    fn url(&self, path: &str) -> String {
        escape(&self.site.url(self.lang, path))
    }
}

fn layout(ctx: &PageContext<'_>, content: &str) -> String {
    let switcher = lang_switcher(&ctx.site.langs, ctx.lang, |lang| {
        ctx.site.url(lang, ctx.path)
    });

    let flash = ctx
        .flash
        .as_ref()
        .map(|flash| {
            format!(
                r#"<div class="card-panel flash flash-{kind}">{message}</div>"#,
                kind = flash.kind,
                message = escape(&flash.message),
            )
        })
        .unwrap_or_default();

    let body = format!(
        r#"<nav class="teal"><div class="nav-wrapper container">
<a class="brand-logo" href="{home}">{app}</a>
{switcher}
</div></nav>
<main class="container auth-page">
{flash}
<div class="card"><div class="card-content">{content}</div></div>
</main>"#,
        home = ctx.url(""),
        app = escape(&ctx.site.app_name),
    );

    document(ctx.lang, &ctx.title, "auth", &body)
}

fn input(name: &str, kind: &str, label: &str, value: &str) -> String {
    format!(
        r#"<div class="input-field"><input id="{name}" name="{name}" type="{kind}" value="{value}"><label for="{name}">{label}</label></div>"#,
        value = escape(value),
    )
}

fn hidden(name: &str, value: &str) -> String {
    format!(
        r#"<input type="hidden" name="{name}" value="{value}">"#,
        value = escape(value)
    )
}

fn submit(label: &str) -> String {
    format!(r#"<button class="btn waves-effect" type="submit">{label}</button>"#)
}

pub fn signin_page(ctx: &PageContext<'_>) -> String {
    let content = format!(
        r#"<h4>{title}</h4>
<form method="post" action="{action}">
{email}
{password}
<p><label><input type="checkbox" name="remember" value="1"><span>{remember}</span></label></p>
{submit}
</form>
<p><a href="{signup}">{signup_label}</a> | <a href="{forget}">{forget_label}</a></p>"#,
        title = ctx.t("common.signin"),
        action = ctx.url("/signin"),
        email = input("email", "email", &ctx.t("common.email"), ""),
        password = input("password", "password", &ctx.t("common.password"), ""),
        remember = ctx.t("common.remember_me"),
        submit = submit(&ctx.t("common.signin")),
        signup = ctx.url("/signup"),
        signup_label = ctx.t("common.signup"),
        forget = ctx.url("/forget"),
        forget_label = ctx.t("common.forget_password"),
    );
    layout(ctx, &content)
}

pub fn signup_page(ctx: &PageContext<'_>) -> String {
    let content = format!(
        r#"<h4>{title}</h4>
<form method="post" action="{action}">
{email}
{password}
{firstname}
{lastname}
{submit}
</form>
<p><a href="{signin}">{signin_label}</a></p>"#,
        title = ctx.t("common.signup"),
        action = ctx.url("/signup"),
        email = input("email", "email", &ctx.t("common.email"), ""),
        password = input("password", "password", &ctx.t("common.password"), ""),
        firstname = input("firstname", "text", &ctx.t("common.firstname"), ""),
        lastname = input("lastname", "text", &ctx.t("common.lastname"), ""),
        submit = submit(&ctx.t("common.signup")),
        signin = ctx.url("/signin"),
        signin_label = ctx.t("common.signin"),
    );
    layout(ctx, &content)
}

pub fn forget_page(ctx: &PageContext<'_>) -> String {
    let content = format!(
        r#"<h4>{title}</h4>
<form method="post" action="{action}">
{email}
{submit}
</form>"#,
        title = ctx.t("common.forget_password"),
        action = ctx.url("/forget"),
        email = input("email", "email", &ctx.t("common.email"), ""),
        submit = submit(&ctx.t("common.send")),
    );
    layout(ctx, &content)
}

pub fn reset_page(ctx: &PageContext<'_>, reset_token: &str) -> String {
    let content = format!(
        r#"<h4>{title}</h4>
<form method="post" action="{action}">
{token}
{password}
{submit}
</form>"#,
        title = ctx.t("common.reset_password"),
        action = ctx.url("/reset"),
        token = hidden("reset_token", reset_token),
        password = input("password", "password", &ctx.t("common.new_password"), ""),
        submit = submit(&ctx.t("common.save")),
    );
    layout(ctx, &content)
}

pub fn verify_page(ctx: &PageContext<'_>, code: &str) -> String {
    let content = format!(
        r#"<h4>{title}</h4>
<form method="post" action="{action}">
{code_field}
{otp}
{submit}
</form>
<p><a href="{resend}">{resend_label}</a></p>"#,
        title = ctx.t("common.2sv"),
        action = ctx.url(&format!("/verify/{code}")),
        code_field = hidden("code", code),
        otp = input("otp", "text", &ctx.t("common.otp"), ""),
        submit = submit(&ctx.t("common.verify")),
        resend = ctx.url(&format!("/resend/{code}")),
        resend_label = ctx.t("common.resend_code"),
    );
    layout(ctx, &content)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(flash: Option<Flash>, f: impl Fn(&PageContext<'_>) -> String) -> String {
        let site = SiteConfig::default();
        let translator = Translator::embedded("en").unwrap();
        let ctx = PageContext {
            site: &site,
            translator: &translator,
            lang: "ru",
            path: "/signin",
            title: site.title(&translator.t("ru", "common.signin")),
            flash,
        };
        f(&ctx)
    }

    #[test]
    fn test_signin_page() {
        let page = render(None, signin_page);
        assert!(page.contains("<title>Вход | Quantum</title>"));
        assert!(page.contains(r#"action="/ru/signin""#));
        assert!(page.contains(r#"name="remember""#));
        assert!(page.contains(r#"<a href="/am/signin">AM</a>"#));
        assert!(!page.contains("flash-"));
    }

    #[test]
    fn test_flash_is_escaped() {
        let page = render(Some(Flash::error("<b>bad</b>")), signin_page);
        assert!(page.contains("flash-error"));
        assert!(page.contains("&lt;b&gt;bad&lt;/b&gt;"));
    }

    #[test]
    fn test_verify_page_carries_code() {
        let page = render(None, |ctx| verify_page(ctx, "abc_123"));
        assert!(page.contains(r#"action="/ru/verify/abc_123""#));
        assert!(page.contains(r#"name="code" value="abc_123""#));
        assert!(page.contains(r#"href="/ru/resend/abc_123""#));
    }
}
