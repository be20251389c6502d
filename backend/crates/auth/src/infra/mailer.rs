//! Mailer Implementations
//!
//! `TracingMailer` writes rendered mails to the log (development and
//! deployments without SMTP); `MemoryMailer` keeps them for assertions.

use std::sync::Arc;

use platform::i18n::Translator;
use platform::site::SiteConfig;
use tokio::sync::RwLock;

use crate::domain::mail::{MailKind, MailMessage, Mailer};
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// Rendered mail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedMail {
    pub subject: String,
    pub body: String,
}

/// Render `message` in its language, with links under the site base URL
pub fn compose(message: &MailMessage, site: &SiteConfig, translator: &Translator) -> ComposedMail {
    let lang = site.resolve_lang(&message.lang);
    let t = |key: &str| translator.t(lang, key);

    let greeting = if message.name.is_empty() {
        format!("{},", t("common.mail_greeting"))
    } else {
        format!("{} {},", t("common.mail_greeting"), message.name)
    };

    let (subject_key, text) = match &message.kind {
        MailKind::Activation { token } => (
            "common.activate_mail_subject",
            format!(
                "{}\n{}",
                t("common.activate_mail_body"),
                site.url(lang, &format!("/activate/{token}"))
            ),
        ),
        MailKind::PasswordReset { token } => (
            "common.reset_mail_subject",
            format!(
                "{}\n{}",
                t("common.reset_mail_body"),
                site.url(lang, &format!("/reset/{token}"))
            ),
        ),
        MailKind::OneTimeCode { otp } => (
            "common.otp_mail_subject",
            format!("{}: {otp}\n{}", t("common.otp_mail_body"), t("common.otp_mail_ttl")),
        ),
    };

    ComposedMail {
        subject: format!("{} | {}", t(subject_key), site.app_name),
        body: format!("{greeting}\n\n{text}\n"),
    }
}

/// Logs every mail instead of delivering it
#[derive(Clone)]
pub struct TracingMailer {
    site: Arc<SiteConfig>,
    translator: Arc<Translator>,
}

impl TracingMailer {
    pub fn new(site: Arc<SiteConfig>, translator: Arc<Translator>) -> Self {
        Self { site, translator }
    }
}

impl Mailer for TracingMailer {
    async fn send(&self, message: MailMessage) -> AuthResult<()> {
        let mail = compose(&message, &self.site, &self.translator);

        tracing::info!(to = %message.to, subject = %mail.subject, "Mail sent");
        tracing::debug!(to = %message.to, body = %mail.body, "Mail body");
        Ok(())
    }
}

/// Captures sent mails
#[derive(Clone, Default)]
pub struct MemoryMailer {
    outbox: Arc<RwLock<Vec<MailMessage>>>,
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn messages(&self) -> Vec<MailMessage> {
        self.outbox.read().await.clone()
    }

    /// Most recent mail sent to `to`
    pub async fn last_to(&self, to: &str) -> Option<MailMessage> {
        let to = Email::new(to).ok()?;
        self.outbox
            .read()
            .await
            .iter()
            .rev()
            .find(|m| m.to == to)
            .cloned()
    }
}

impl Mailer for MemoryMailer {
    async fn send(&self, message: MailMessage) -> AuthResult<()> {
        self.outbox.write().await.push(message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(kind: MailKind) -> MailMessage {
        MailMessage {
            to: Email::new("ada@example.com").unwrap(),
            name: "Ada".to_string(),
            lang: "en".to_string(),
            kind,
        }
    }

    fn site() -> SiteConfig {
        SiteConfig::new(
            "Quantum",
            "https://example.com",
            vec!["en".to_string(), "ru".to_string()],
            None,
        )
    }

    #[test]
    fn test_compose_activation_link() {
        let translator = Translator::embedded("en").unwrap();
        let mail = compose(
            &message(MailKind::Activation {
                token: "abc".to_string(),
            }),
            &site(),
            &translator,
        );

        assert_eq!(mail.subject, "Activate your account | Quantum");
        assert!(mail.body.starts_with("Hello Ada,"));
        assert!(mail.body.contains("https://example.com/en/activate/abc"));
    }

    #[test]
    fn test_compose_uses_message_language() {
        let translator = Translator::embedded("en").unwrap();
        let mut msg = message(MailKind::OneTimeCode { otp: 123456 });
        msg.lang = "ru".to_string();

        let mail = compose(&msg, &site(), &translator);
        assert!(mail.subject.starts_with("Ваш код подтверждения"));
        assert!(mail.body.contains("123456"));
    }

    #[tokio::test]
    async fn test_memory_mailer_keeps_order() {
        let mailer = MemoryMailer::new();
        mailer
            .send(message(MailKind::OneTimeCode { otp: 111111 }))
            .await
            .unwrap();
        mailer
            .send(message(MailKind::OneTimeCode { otp: 222222 }))
            .await
            .unwrap();

        assert_eq!(mailer.messages().await.len(), 2);
        assert_eq!(
            mailer.last_to("ADA@example.com").await.unwrap().kind,
            MailKind::OneTimeCode { otp: 222222 }
        );
        assert!(mailer.last_to("bob@example.com").await.is_none());
    }
}
