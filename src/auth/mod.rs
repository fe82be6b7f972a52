//! Phone-OTP authentication.
//!
//! The backend signs users in with a one-time code: POST `/auth/send-otp`
//! with a phone number, then POST `/auth/verify-otp` with the code. The
//! [`AuthApi`] trait is the seam between the login state machine and the
//! HTTP client, so the flow can be driven against a scripted mock in tests.

pub mod countdown;
pub mod login;
pub mod otp;

pub use countdown::Countdown;
pub use login::{LoginConfig, LoginFlow, LoginStep};
pub use otp::OtpBuffer;

use async_trait::async_trait;
use serde::Deserialize;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::session::Session;

/// Acknowledgement from `/auth/send-otp`.
#[derive(Debug, Clone, Deserialize)]
pub struct SendOtpResponse {
    /// Backend-supplied line, e.g. "OTP sent successfully".
    #[serde(default)]
    pub message: String,
}

/// The authentication collaborator consumed by [`LoginFlow`].
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Ask the backend to send a one-time code to `phone`.
    async fn request_code(&self, phone: &str) -> Result<SendOtpResponse, ApiError>;

    /// Exchange phone + code for a session (bearer token and user identity).
    async fn verify_code(&self, phone: &str, code: &str) -> Result<Session, ApiError>;
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn request_code(&self, phone: &str) -> Result<SendOtpResponse, ApiError> {
        self.post(
            "/auth/send-otp",
            &serde_json::json!({ "phoneNumber": phone }),
        )
        .await
    }

    async fn verify_code(&self, phone: &str, code: &str) -> Result<Session, ApiError> {
        self.post(
            "/auth/verify-otp",
            &serde_json::json!({ "phoneNumber": phone, "otp": code }),
        )
        .await
    }
}
