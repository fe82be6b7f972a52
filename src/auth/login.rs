//! Two-step phone-OTP login state machine.
//!
//! PhoneEntry → OtpEntry → authenticated. Collaborator failures never escape
//! as `Err`: they land in the user-visible error message and the flow stays
//! interactive, so any front end can keep re-driving it. The resend action
//! is gated by a [`Countdown`] whose task dies with the flow.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::auth::countdown::Countdown;
use crate::auth::otp::OtpBuffer;
use crate::auth::AuthApi;
use crate::config::ConsoleConfig;
use crate::error::ValidationError;
use crate::phone::{self, PhoneRules};
use crate::session::{AuthUser, SessionStore};

const SEND_FALLBACK: &str = "Failed to send OTP. Please try again.";
const VERIFY_FALLBACK: &str = "Invalid OTP. Please try again.";

/// Which screen the flow is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStep {
    PhoneEntry,
    OtpEntry,
}

/// Knobs injected into the flow — nothing here is hard-coded.
#[derive(Debug, Clone)]
pub struct LoginConfig {
    pub otp_length: usize,
    pub resend_timeout_secs: u32,
    pub rules: PhoneRules,
    /// Countdown tick period. One second in production.
    pub countdown_period: Duration,
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            otp_length: 6,
            resend_timeout_secs: 30,
            rules: PhoneRules::default(),
            countdown_period: Duration::from_secs(1),
        }
    }
}

impl LoginConfig {
    pub fn from_console(config: &ConsoleConfig) -> Self {
        Self {
            otp_length: config.otp.length,
            resend_timeout_secs: config.otp.resend_timeout_secs,
            rules: config.phone_rules(),
            countdown_period: Duration::from_secs(1),
        }
    }

    /// Config for quick unit tests: millisecond ticks, so a full resend
    /// window elapses without real waiting.
    pub fn instant() -> Self {
        Self {
            countdown_period: Duration::from_millis(1),
            ..Self::default()
        }
    }
}

/// The login flow. One per login view; drop it when the view goes away and
/// the countdown task is cancelled with it.
pub struct LoginFlow {
    auth: Arc<dyn AuthApi>,
    sessions: Arc<SessionStore>,
    config: LoginConfig,

    step: LoginStep,
    phone_input: String,
    /// Normalized number captured at the last successful send; the verify
    /// and resend paths reuse it.
    sent_to: Option<String>,
    otp: OtpBuffer,
    countdown: Option<Countdown>,
    invalid_phone: bool,
    error: Option<String>,
}

impl LoginFlow {
    pub fn new(auth: Arc<dyn AuthApi>, sessions: Arc<SessionStore>, config: LoginConfig) -> Self {
        let otp = OtpBuffer::new(config.otp_length);
        Self {
            auth,
            sessions,
            config,
            step: LoginStep::PhoneEntry,
            phone_input: String::new(),
            sent_to: None,
            otp,
            countdown: None,
            invalid_phone: false,
            error: None,
        }
    }

    // ─── Read-side accessors for rendering ───────────────────────────────────

    pub fn step(&self) -> LoginStep {
        self.step
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn invalid_phone(&self) -> bool {
        self.invalid_phone
    }

    pub fn otp(&self) -> &OtpBuffer {
        &self.otp
    }

    /// Seconds until resend unlocks; zero when no countdown is running.
    pub fn countdown_remaining(&self) -> u32 {
        self.countdown.as_ref().map_or(0, Countdown::remaining)
    }

    pub fn phone_input(&self) -> &str {
        &self.phone_input
    }

    pub fn set_phone_input(&mut self, raw: &str) {
        self.phone_input = raw.to_string();
    }

    // ─── Transitions ──────────────────────────────────────────────────────────

    /// Validate the phone input and request a code.
    ///
    /// Returns `true` when the flow advanced to OTP entry. Validation and
    /// remote failures set the error message and leave the step unchanged.
    pub async fn submit_phone(&mut self) -> bool {
        self.error = None;
        self.invalid_phone = false;

        if let Err(e) = self.config.rules.validate(&self.phone_input) {
            self.invalid_phone = true;
            self.error = Some(e.to_string());
            return false;
        }

        let normalized = phone::normalize(&self.phone_input);
        match self.auth.request_code(&normalized).await {
            Ok(ack) => {
                debug!(message = %ack.message, "otp requested");
                self.sent_to = Some(normalized);
                self.otp.clear();
                self.step = LoginStep::OtpEntry;
                self.restart_countdown();
                true
            }
            Err(e) => {
                warn!(err = %e, "send-otp failed");
                self.error = Some(e.user_message(SEND_FALLBACK));
                false
            }
        }
    }

    /// Feed one cell's worth of input. Auto-submits when the buffer fills.
    pub async fn otp_enter(&mut self, input: &str) -> Option<AuthUser> {
        if self.step != LoginStep::OtpEntry {
            return None;
        }
        if self.otp.enter(input) {
            return self.submit_otp().await;
        }
        None
    }

    pub fn otp_backspace(&mut self) {
        if self.step == LoginStep::OtpEntry {
            self.otp.backspace();
        }
    }

    /// Feed pasted text. A paste holding a full code fills every cell and
    /// auto-submits; anything shorter is ignored.
    pub async fn otp_paste(&mut self, text: &str) -> Option<AuthUser> {
        if self.step != LoginStep::OtpEntry {
            return None;
        }
        if self.otp.paste(text) {
            return self.submit_otp().await;
        }
        None
    }

    /// Verify the entered code.
    ///
    /// On success the session is persisted and the authenticated user is
    /// returned — the caller hands off to whatever comes after login. On
    /// failure the cells clear, focus returns to the first cell, and the
    /// flow stays in OTP entry with the error message set.
    pub async fn submit_otp(&mut self) -> Option<AuthUser> {
        self.error = None;

        if !self.otp.is_complete() {
            self.error = Some(ValidationError::IncompleteOtp.to_string());
            return None;
        }
        let Some(phone) = self.sent_to.clone() else {
            // No successful send this session — force the user back a step.
            self.back_to_phone();
            return None;
        };

        let code = self.otp.code();
        match self.auth.verify_code(&phone, &code).await {
            Ok(session) => {
                let user = session.user.clone();
                if let Err(e) = self.sessions.store(session) {
                    warn!(err = %e, "could not persist session file");
                }
                self.countdown = None;
                info!(user = %user.phone_number, role = %user.role.name, "login verified");
                Some(user)
            }
            Err(e) => {
                warn!(err = %e, "verify-otp failed");
                self.error = Some(e.user_message(VERIFY_FALLBACK));
                self.otp.clear();
                None
            }
        }
    }

    /// Re-request a code for the captured phone number.
    ///
    /// A running countdown makes this a strict no-op — no network call, no
    /// state change. Returns `true` if a send was actually attempted.
    pub async fn resend(&mut self) -> bool {
        if self.countdown_remaining() > 0 {
            return false;
        }
        self.otp.clear();
        self.error = None;
        self.submit_phone().await;
        true
    }

    /// Return to phone entry, clearing OTP state and cancelling the
    /// countdown task.
    pub fn back_to_phone(&mut self) {
        self.step = LoginStep::PhoneEntry;
        self.otp.clear();
        self.error = None;
        self.sent_to = None;
        self.countdown = None;
    }

    /// Starting a countdown always resets to the configured timeout; any
    /// previous handle is dropped (and its task aborted).
    fn restart_countdown(&mut self) {
        self.countdown = Some(Countdown::with_period(
            self.config.resend_timeout_secs,
            self.config.countdown_period,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SendOtpResponse;
    use crate::error::ApiError;
    use crate::session::{Session, UserRole};
    use async_trait::async_trait;
    use tempfile::TempDir;

    /// Mock that always succeeds.
    struct OkAuth;

    #[async_trait]
    impl AuthApi for OkAuth {
        async fn request_code(&self, _phone: &str) -> Result<SendOtpResponse, ApiError> {
            Ok(SendOtpResponse {
                message: "OTP sent".into(),
            })
        }

        async fn verify_code(&self, phone: &str, _code: &str) -> Result<Session, ApiError> {
            Ok(Session {
                access_token: "tok".into(),
                user: AuthUser {
                    id: "u1".into(),
                    phone_number: phone.into(),
                    role: UserRole {
                        id: "r1".into(),
                        name: "admin".into(),
                    },
                },
            })
        }
    }

    fn flow_with(dir: &TempDir) -> LoginFlow {
        LoginFlow::new(
            Arc::new(OkAuth),
            Arc::new(SessionStore::open(dir.path())),
            LoginConfig::instant(),
        )
    }

    #[tokio::test]
    async fn starts_in_phone_entry() {
        let dir = TempDir::new().unwrap();
        let flow = flow_with(&dir);
        assert_eq!(flow.step(), LoginStep::PhoneEntry);
        assert_eq!(flow.countdown_remaining(), 0);
        assert!(flow.error().is_none());
    }

    #[tokio::test]
    async fn invalid_phone_stays_put_with_flag() {
        let dir = TempDir::new().unwrap();
        let mut flow = flow_with(&dir);
        flow.set_phone_input("12345");

        assert!(!flow.submit_phone().await);
        assert_eq!(flow.step(), LoginStep::PhoneEntry);
        assert!(flow.invalid_phone());
        assert_eq!(flow.error(), Some("Please enter a valid phone number"));
    }

    #[tokio::test]
    async fn successful_send_advances_and_starts_countdown() {
        let dir = TempDir::new().unwrap();
        let mut flow = flow_with(&dir);
        flow.set_phone_input("+91 98765 43210");

        assert!(flow.submit_phone().await);
        assert_eq!(flow.step(), LoginStep::OtpEntry);
        assert!(flow.countdown_remaining() > 0);
    }

    #[tokio::test]
    async fn back_to_phone_clears_otp_and_countdown() {
        let dir = TempDir::new().unwrap();
        let mut flow = flow_with(&dir);
        flow.set_phone_input("9876543210");
        flow.submit_phone().await;
        flow.otp_enter("1").await;

        flow.back_to_phone();
        assert_eq!(flow.step(), LoginStep::PhoneEntry);
        assert!(flow.otp().is_empty());
        assert_eq!(flow.countdown_remaining(), 0);
    }

    #[tokio::test]
    async fn incomplete_submit_reports_locally() {
        let dir = TempDir::new().unwrap();
        let mut flow = flow_with(&dir);
        flow.set_phone_input("9876543210");
        flow.submit_phone().await;
        flow.otp_enter("1").await;

        assert!(flow.submit_otp().await.is_none());
        assert_eq!(flow.error(), Some("Please enter complete OTP"));
        assert_eq!(flow.step(), LoginStep::OtpEntry);
    }
}
