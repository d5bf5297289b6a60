/**
 * REST API Client
 *
 * Login, registration and session handling on top of a [`TokenStore`],
 * plus typed helpers for the leave endpoints.
 *
 * # Session rules
 *
 * - A token is only ever sent if it passes the local expiry check
 * - A login response whose token fails that check is discarded
 * - Any 401 from the server clears the stored token
 * - Network failures never clear the token
 */

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::config::ClientConfig;
use crate::client::error::ClientError;
use crate::client::form::{LoginForm, RegisterForm};
use crate::client::token_store::TokenStore;
use crate::shared::jwt::is_jwt_valid_now;
use crate::shared::types::{
    ApplyLeaveRequest, ApplyLeaveResponse, LeaveRequestEnvelope, LeaveRequestResponse, LeaveStatus, LeaveTypeInfo,
    LeaveTypesResponse, LoginResponse, MyRequestsResponse, PendingRequestsResponse, ProfileResponse,
    ProfileUpdateRequest, RegisterResponse, ReviewRequest, ReviewResponse, UserEnvelope, UserResponse,
};

const LOGIN_FAILED: &str = "Login failed, please check your email and password";
const REGISTER_FAILED: &str = "Registration failed, please try again later";
const REQUEST_FAILED: &str = "Request failed, please try again later";

/// Where a page should send the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    Stay,
    Index,
    Login,
}

/// Result of checking the stored session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionStatus {
    LoggedIn(UserResponse),
    LoggedOut,
}

impl SessionStatus {
    pub fn is_logged_in(&self) -> bool {
        matches!(self, Self::LoggedIn(_))
    }

    pub fn user(&self) -> Option<&UserResponse> {
        match self {
            Self::LoggedIn(user) => Some(user),
            Self::LoggedOut => None,
        }
    }

    /// Redirect decision for a user on `current_page`
    ///
    /// Pages are named like `login`, `/register.html` or `index`; the empty
    /// path is the index. Logged-in users leave the login and register
    /// pages, logged-out users may only see those two and the index.
    pub fn landing_page(&self, current_page: &str) -> Landing {
        let page = current_page.trim().trim_start_matches('/');
        let page = page.strip_suffix(".html").unwrap_or(page);

        let is_auth_page = matches!(page, "login" | "register");
        let is_public = is_auth_page || matches!(page, "" | "index");

        match self {
            Self::LoggedIn(_) if is_auth_page => Landing::Index,
            Self::LoggedOut if !is_public => Landing::Login,
            _ => Landing::Stay,
        }
    }
}

/// HTTP client for the studentleave API
#[derive(Debug, Clone)]
pub struct ApiClient<S> {
    http: Client,
    config: ClientConfig,
    store: S,
}

impl<S: TokenStore> ApiClient<S> {
    pub fn new(config: ClientConfig, store: S) -> Self {
        Self::with_http_client(config, store, Client::new())
    }

    pub fn with_http_client(config: ClientConfig, store: S, http: Client) -> Self {
        Self { http, config, store }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Stored token if it has not expired
    pub fn stored_token(&self) -> Option<String> {
        self.store.load().filter(|token| is_jwt_valid_now(Some(token)))
    }

    fn bearer(&self) -> Result<String, ClientError> {
        self.stored_token().ok_or(ClientError::NotLoggedIn)
    }

    /// Build an `Api` error from a failed response, preferring the server's message
    async fn api_error(response: Response, default_message: &str) -> ClientError {
        let status = response.status().as_u16();
        let message = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| body.get("message").and_then(Value::as_str).map(str::to_string))
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| default_message.to_string());

        ClientError::Api { status, message }
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Send an authenticated request and decode a 2xx body
    async fn send_authed<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let token = self.bearer()?;
        let response = request.bearer_auth(token).send().await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::info!("Server rejected the stored token, clearing it");
            self.store.clear()?;
        }
        if !response.status().is_success() {
            return Err(Self::api_error(response, REQUEST_FAILED).await);
        }

        Self::parse(response).await
    }

    /// Log in and store the returned token
    ///
    /// # Errors
    ///
    /// * `Validation` - bad email or short password; nothing is sent
    /// * `Api` - non-2xx, or a 2xx without a token
    /// * `InvalidToken` - the returned token is already expired or malformed; the store is cleared
    /// * `Serialization` - the body is not a login response; the store is untouched
    /// * `Network` - the server could not be reached
    pub async fn login(&self, form: &LoginForm) -> Result<LoginResponse, ClientError> {
        let request = form.validate()?;
        let url = self.config.api_url(self.config.endpoints.login_path());
        tracing::debug!("POST {}", url);

        let response = self.http.post(&url).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Self::api_error(response, LOGIN_FAILED).await);
        }

        let body: Value = Self::parse(response).await?;
        let token = body
            .get("token")
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .ok_or_else(|| ClientError::Api {
                status: status.as_u16(),
                message: body
                    .get("message")
                    .and_then(Value::as_str)
                    .filter(|m| !m.is_empty())
                    .unwrap_or(LOGIN_FAILED)
                    .to_string(),
            })?;

        if !is_jwt_valid_now(Some(&token)) {
            tracing::warn!("Login returned an unusable token");
            self.store.clear()?;
            return Err(ClientError::InvalidToken);
        }

        // Only a fully understood response replaces the stored token
        let login: LoginResponse = serde_json::from_value(body)?;
        self.store.save(&token)?;
        tracing::info!("Logged in as {}", login.user.email);
        Ok(login)
    }

    /// Create an account; the token store is not touched
    pub async fn register(&self, form: &RegisterForm) -> Result<RegisterResponse, ClientError> {
        let request = form.validate()?;
        let url = self.config.api_url(self.config.endpoints.register_path());
        tracing::debug!("POST {}", url);

        let response = self.http.post(&url).json(&request).send().await?;
        if !response.status().is_success() {
            return Err(Self::api_error(response, REGISTER_FAILED).await);
        }

        Self::parse(response).await
    }

    /// Ask the server who the stored token belongs to
    ///
    /// `Ok(None)` when there is no usable token or the server refuses it, in
    /// which case the token is cleared. Network errors keep the token.
    pub async fn current_user(&self) -> Result<Option<UserResponse>, ClientError> {
        let Some(token) = self.stored_token() else {
            return Ok(None);
        };

        let response = self
            .http
            .get(self.config.api_url("/api/auth/me"))
            .bearer_auth(token)
            .send()
            .await?;

        if response.status().is_success() {
            let envelope: UserEnvelope = Self::parse(response).await?;
            Ok(Some(envelope.user))
        } else {
            tracing::info!("Stored token refused ({}), clearing it", response.status());
            self.store.clear()?;
            Ok(None)
        }
    }

    /// Restore the session from the stored token
    pub async fn auto_login(&self) -> Result<SessionStatus, ClientError> {
        if self.stored_token().is_none() {
            self.store.clear()?;
            return Ok(SessionStatus::LoggedOut);
        }

        Ok(match self.current_user().await? {
            Some(user) => SessionStatus::LoggedIn(user),
            None => SessionStatus::LoggedOut,
        })
    }

    /// Discard the stored token
    ///
    /// The server is told as a courtesy; failure to reach it does not matter.
    pub async fn logout(&self) -> Result<(), ClientError> {
        if let Some(token) = self.stored_token() {
            let result = self
                .http
                .post(self.config.api_url("/api/auth/logout"))
                .bearer_auth(token)
                .send()
                .await;
            if let Err(e) = result {
                tracing::debug!("Logout notification failed: {}", e);
            }
        }

        self.store.clear()
    }

    pub async fn update_profile(&self, update: &ProfileUpdateRequest) -> Result<ProfileResponse, ClientError> {
        self.send_authed(self.http.put(self.config.api_url("/api/users/profile")).json(update))
            .await
    }

    pub async fn leave_types(&self) -> Result<Vec<LeaveTypeInfo>, ClientError> {
        let response: LeaveTypesResponse = self
            .send_authed(self.http.get(self.config.api_url("/api/leave/types")))
            .await?;
        Ok(response.leave_types)
    }

    pub async fn apply_leave(&self, request: &ApplyLeaveRequest) -> Result<ApplyLeaveResponse, ClientError> {
        self.send_authed(self.http.post(self.config.api_url("/api/leave/apply")).json(request))
            .await
    }

    pub async fn my_requests(
        &self,
        status: Option<LeaveStatus>,
        limit: Option<u32>,
    ) -> Result<MyRequestsResponse, ClientError> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(status) = status {
            query.push(("status", status.to_string()));
        }
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }

        self.send_authed(
            self.http
                .get(self.config.api_url("/api/leave/my-requests"))
                .query(&query),
        )
        .await
    }

    pub async fn pending_requests(&self) -> Result<PendingRequestsResponse, ClientError> {
        self.send_authed(self.http.get(self.config.api_url("/api/leave/pending")))
            .await
    }

    pub async fn request_detail(&self, request_id: &str) -> Result<LeaveRequestResponse, ClientError> {
        let envelope: LeaveRequestEnvelope = self
            .send_authed(
                self.http
                    .get(self.config.api_url(&format!("/api/leave/request/{}", request_id))),
            )
            .await?;
        Ok(envelope.request)
    }

    pub async fn approve(&self, request_id: &str, teacher_note: Option<&str>) -> Result<ReviewResponse, ClientError> {
        let body = ReviewRequest {
            teacher_note: teacher_note.unwrap_or_default().to_string(),
            rejected_reason: String::new(),
        };
        self.send_authed(
            self.http
                .post(self.config.api_url(&format!("/api/leave/approve/{}", request_id)))
                .json(&body),
        )
        .await
    }

    pub async fn reject(
        &self,
        request_id: &str,
        rejected_reason: &str,
        teacher_note: Option<&str>,
    ) -> Result<ReviewResponse, ClientError> {
        if rejected_reason.trim().is_empty() {
            return Err(ClientError::validation("rejected_reason", "A rejection reason is required"));
        }
        let body = ReviewRequest {
            teacher_note: teacher_note.unwrap_or_default().to_string(),
            rejected_reason: rejected_reason.trim().to_string(),
        };
        self.send_authed(
            self.http
                .post(self.config.api_url(&format!("/api/leave/reject/{}", request_id)))
                .json(&body),
        )
        .await
    }
}
