//! Use case tests against the in-memory store and mailer.

use std::sync::Arc;

use crate::application::{
    ActivateUseCase, CheckSessionUseCase, OtpUseCase, PasswordResetUseCase, SignInInput,
    SignInOutcome, SignInUseCase, SignOutUseCase, SignUpInput, SignUpUseCase,
};
use crate::domain::mail::MailKind;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::AuthError;
use crate::infra::{MemoryAuthRepository, MemoryMailer};
use crate::AuthConfig;

const EMAIL: &str = "ada@example.com";
const PASSWORD: &str = "TestPassword123!";

struct Fixture {
    repo: Arc<MemoryAuthRepository>,
    mailer: Arc<MemoryMailer>,
    config: Arc<AuthConfig>,
}

impl Fixture {
    fn new() -> Self {
        Self::with_config(AuthConfig::development())
    }

    fn with_two_step() -> Self {
        Self::with_config(AuthConfig {
            two_step_verification: true,
            ..AuthConfig::development()
        })
    }

    fn with_config(config: AuthConfig) -> Self {
        Self {
            repo: Arc::new(MemoryAuthRepository::new()),
            mailer: Arc::new(MemoryMailer::new()),
            config: Arc::new(config),
        }
    }

    fn sign_up_use_case(&self) -> SignUpUseCase<MemoryAuthRepository, MemoryMailer> {
        SignUpUseCase::new(self.repo.clone(), self.mailer.clone(), self.config.clone())
    }

    fn sign_in_use_case(
        &self,
    ) -> SignInUseCase<MemoryAuthRepository, MemoryAuthRepository, MemoryMailer> {
        SignInUseCase::new(
            self.repo.clone(),
            self.repo.clone(),
            self.mailer.clone(),
            self.config.clone(),
        )
    }

    fn otp_use_case(&self) -> OtpUseCase<MemoryAuthRepository, MemoryAuthRepository, MemoryMailer> {
        OtpUseCase::new(
            self.repo.clone(),
            self.repo.clone(),
            self.mailer.clone(),
            self.config.clone(),
        )
    }

    fn reset_use_case(
        &self,
    ) -> PasswordResetUseCase<MemoryAuthRepository, MemoryAuthRepository, MemoryMailer> {
        PasswordResetUseCase::new(
            self.repo.clone(),
            self.repo.clone(),
            self.mailer.clone(),
            self.config.clone(),
        )
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<(), AuthError> {
        self.sign_up_use_case()
            .execute(SignUpInput {
                email: email.to_string(),
                password: password.to_string(),
                first_name: " Ada ".to_string(),
                last_name: "Lovelace".to_string(),
                lang: "en".to_string(),
            })
            .await
            .map(|_| ())
    }

    /// Signed-up and activated account
    async fn active_user(&self) {
        self.sign_up(EMAIL, PASSWORD).await.unwrap();
        let token = self.activation_token().await;
        ActivateUseCase::new(self.repo.clone())
            .execute(&token)
            .await
            .unwrap();
    }

    async fn activation_token(&self) -> String {
        match self.mailer.last_to(EMAIL).await.map(|m| m.kind) {
            Some(MailKind::Activation { token }) => token,
            other => panic!("expected activation mail, got {other:?}"),
        }
    }

    async fn mailed_otp(&self) -> u32 {
        match self.mailer.last_to(EMAIL).await.map(|m| m.kind) {
            Some(MailKind::OneTimeCode { otp }) => otp,
            other => panic!("expected one-time code mail, got {other:?}"),
        }
    }

    async fn sign_in(&self, password: &str, remember_me: bool) -> Result<SignInOutcome, AuthError> {
        self.sign_in_use_case()
            .execute(SignInInput {
                email: EMAIL.to_string(),
                password: password.to_string(),
                remember_me,
                lang: "en".to_string(),
            })
            .await
    }
}

fn wrong_otp(otp: u32) -> String {
    if otp == 999_999 { 100_000 } else { otp + 1 }.to_string()
}

// ============================================================================
// Sign Up / Activation
// ============================================================================

#[tokio::test]
async fn test_sign_up_creates_inactive_user_and_mails_activation() {
    let fx = Fixture::new();
    fx.sign_up(EMAIL, PASSWORD).await.unwrap();

    let user = fx
        .repo
        .find_by_email(&Email::new(EMAIL).unwrap())
        .await
        .unwrap()
        .unwrap();
    assert!(!user.is_active());
    assert_eq!(user.first_name, "Ada");

    let mail = fx.mailer.last_to(EMAIL).await.unwrap();
    assert_eq!(mail.name, "Ada Lovelace");
    assert!(matches!(mail.kind, MailKind::Activation { .. }));

    // Activation is required before signing in
    assert!(matches!(
        fx.sign_in(PASSWORD, false).await,
        Err(AuthError::InactiveAccount)
    ));
}

#[tokio::test]
async fn test_sign_up_rejections() {
    let fx = Fixture::new();
    fx.sign_up(EMAIL, PASSWORD).await.unwrap();

    assert!(matches!(
        fx.sign_up("ADA@example.com", PASSWORD).await,
        Err(AuthError::EmailTaken)
    ));
    assert!(matches!(
        fx.sign_up("not-an-email", PASSWORD).await,
        Err(AuthError::InvalidEmail)
    ));
    assert!(matches!(
        fx.sign_up("bob@example.com", "password123").await,
        Err(AuthError::WeakPassword(_))
    ));
    assert_eq!(fx.mailer.messages().await.len(), 1);
}

#[tokio::test]
async fn test_activation_token_is_single_use() {
    let fx = Fixture::new();
    fx.sign_up(EMAIL, PASSWORD).await.unwrap();
    let token = fx.activation_token().await;

    let activate = ActivateUseCase::new(fx.repo.clone());
    activate.execute(&token).await.unwrap();

    assert!(matches!(
        activate.execute(&token).await,
        Err(AuthError::InvalidToken)
    ));
    assert!(matches!(
        activate.execute("unknown").await,
        Err(AuthError::InvalidToken)
    ));
}

// ============================================================================
// Sign In / Sessions
// ============================================================================

#[tokio::test]
async fn test_sign_in_opens_session() {
    let fx = Fixture::new();
    fx.active_user().await;

    let outcome = fx.sign_in(PASSWORD, true).await.unwrap();
    let SignInOutcome::Authenticated {
        session_token,
        remember_me,
    } = outcome
    else {
        panic!("expected a session, got {outcome:?}");
    };
    assert!(remember_me);
    assert_eq!(fx.repo.session_count().await, 1);

    let check = CheckSessionUseCase::new(fx.repo.clone(), fx.config.clone());
    assert!(check.is_valid(&session_token).await);
    assert!(!check.is_valid("forged.token").await);

    SignOutUseCase::new(fx.repo.clone(), fx.config.clone())
        .execute(&session_token)
        .await
        .unwrap();
    assert!(!check.is_valid(&session_token).await);
    assert_eq!(fx.repo.session_count().await, 0);
}

#[tokio::test]
async fn test_bad_credentials_are_indistinguishable() {
    let fx = Fixture::new();
    fx.active_user().await;

    assert!(matches!(
        fx.sign_in("WrongPassword123!", false).await,
        Err(AuthError::InvalidCredentials)
    ));

    let unknown = fx
        .sign_in_use_case()
        .execute(SignInInput {
            email: "nobody@example.com".to_string(),
            password: PASSWORD.to_string(),
            remember_me: false,
            lang: "en".to_string(),
        })
        .await;
    assert!(matches!(unknown, Err(AuthError::InvalidCredentials)));
    assert_eq!(fx.repo.session_count().await, 0);
}

// ============================================================================
// Two-step Verification
// ============================================================================

#[tokio::test]
async fn test_two_step_sign_in() {
    let fx = Fixture::with_two_step();
    fx.active_user().await;

    let SignInOutcome::OtpRequired { code } = fx.sign_in(PASSWORD, true).await.unwrap() else {
        panic!("expected a one-time code step");
    };
    assert_eq!(fx.repo.session_count().await, 0);

    let otp = fx.mailed_otp().await;
    assert!((100_000..1_000_000).contains(&otp));

    let otp_use_case = fx.otp_use_case();
    assert!(matches!(
        otp_use_case.verify(&wrong_otp(otp), &code).await,
        Err(AuthError::InvalidOtp)
    ));
    assert!(matches!(
        otp_use_case.verify("abc", &code).await,
        Err(AuthError::InvalidOtp)
    ));

    let verified = otp_use_case.verify(&otp.to_string(), &code).await.unwrap();
    assert!(verified.remember_me);
    assert_eq!(fx.repo.session_count().await, 1);

    // The code is consumed
    assert!(matches!(
        otp_use_case.verify(&otp.to_string(), &code).await,
        Err(AuthError::InvalidOtp)
    ));
}

#[tokio::test]
async fn test_resend_replaces_pending_code() {
    let fx = Fixture::with_two_step();
    fx.active_user().await;

    let SignInOutcome::OtpRequired { code } = fx.sign_in(PASSWORD, false).await.unwrap() else {
        panic!("expected a one-time code step");
    };
    let otp_use_case = fx.otp_use_case();

    let new_code = otp_use_case.resend(&code, "ru").await.unwrap();
    assert_ne!(new_code, code);
    assert_eq!(fx.mailer.last_to(EMAIL).await.unwrap().lang, "ru");

    let otp = fx.mailed_otp().await;
    assert!(matches!(
        otp_use_case.verify(&otp.to_string(), &code).await,
        Err(AuthError::InvalidOtp)
    ));
    let verified = otp_use_case.verify(&otp.to_string(), &new_code).await.unwrap();
    assert!(!verified.remember_me);

    assert!(matches!(
        otp_use_case.resend("unknown", "en").await,
        Err(AuthError::InvalidOtp)
    ));
}

// ============================================================================
// Password Reset
// ============================================================================

#[tokio::test]
async fn test_forget_unknown_email_is_silent() {
    let fx = Fixture::new();
    let reset = fx.reset_use_case();

    assert_eq!(reset.forget("nobody@example.com", "en").await.unwrap(), None);
    assert_eq!(reset.forget("garbage", "en").await.unwrap(), None);
    assert!(fx.mailer.messages().await.is_empty());
}

#[tokio::test]
async fn test_reset_changes_password_and_revokes_sessions() {
    let fx = Fixture::new();
    fx.active_user().await;
    fx.sign_in(PASSWORD, false).await.unwrap();
    fx.sign_in(PASSWORD, true).await.unwrap();
    assert_eq!(fx.repo.session_count().await, 2);

    let reset = fx.reset_use_case();
    let token = reset.forget(EMAIL, "en").await.unwrap().unwrap();
    assert!(matches!(
        fx.mailer.last_to(EMAIL).await.unwrap().kind,
        MailKind::PasswordReset { token: ref mailed } if *mailed == token
    ));

    assert!(matches!(
        reset.reset(&token, "weak".to_string()).await,
        Err(AuthError::WeakPassword(_))
    ));

    reset
        .reset(&token, "BrandNewPass456!".to_string())
        .await
        .unwrap();
    assert_eq!(fx.repo.session_count().await, 0);

    assert!(matches!(
        fx.sign_in(PASSWORD, false).await,
        Err(AuthError::InvalidCredentials)
    ));
    assert!(fx.sign_in("BrandNewPass456!", false).await.is_ok());

    assert!(matches!(
        reset.reset(&token, "AnotherPass789!".to_string()).await,
        Err(AuthError::InvalidToken)
    ));
    assert!(matches!(
        reset.reset("", "AnotherPass789!".to_string()).await,
        Err(AuthError::InvalidToken)
    ));
}
