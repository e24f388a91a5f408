use crate::client::FleetClient;
use crate::envelope::ApiResponse;
use crate::error::{ApiError, Result};
use crate::transport::Transport;
use crate::types::{LoginRequest, RegisterRequest, Session};

pub struct AuthApi<'a, T> {
    client: &'a FleetClient<T>,
}

impl<'a, T: Transport> AuthApi<'a, T> {
    pub(crate) fn new(client: &'a FleetClient<T>) -> Self {
        Self { client }
    }

    pub fn login(&self, email: &str, password: &str) -> Result<ApiResponse<Session>> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.client.post_json("/auth/login", &body)
    }

    pub fn register(&self, request: &RegisterRequest) -> Result<ApiResponse<Session>> {
        self.client.post_json("/auth/register", request)
    }

    /// Log in and persist the session so later calls carry its token.
    pub fn login_and_remember(&self, email: &str, password: &str) -> Result<Session> {
        let session = self.login(email, password)?.into_data();
        self.client
            .tokens()
            .store_session(&session)
            .map_err(|e| ApiError::Storage(e.to_string()))?;
        Ok(session)
    }

    /// Forget the persisted session. The backend keeps no server-side state
    /// for it, so nothing is sent.
    pub fn logout(&self) -> Result<()> {
        self.client
            .tokens()
            .clear()
            .map_err(|e| ApiError::Storage(e.to_string()))
    }
}
