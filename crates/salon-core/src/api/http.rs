//! reqwest-backed implementation of the backend contracts.

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use super::{
    wire::{
        CreateBookingRequest, RefreshRequest, WireBooking, WireError, WireProfile, WireService,
        WireSignIn, WireSlots, WireStylist, WireTokens,
    },
    BookingBackend,
};
use crate::{
    config::ClientConfig,
    error::{BookingError, Result, ResultExt},
    models::{AuthTokens, Booking, Branding, Identity, Service, Stylist, TimeSlot},
    params::{CreateBooking, Credentials, Id, SlotQuery},
    session::SessionStore,
};

/// Tokens and identity returned by a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignIn {
    pub tokens: AuthTokens,
    pub identity: Option<Identity>,
}

/// JSON-over-HTTPS client for the booking backend.
pub struct HttpBackend {
    http: Client,
    base_url: String,
    tokens: RwLock<Option<AuthTokens>>,
    session: Option<SessionStore>,
}

/// Builder for creating and configuring [`HttpBackend`] instances.
pub struct HttpBackendBuilder {
    config: ClientConfig,
    tokens: Option<AuthTokens>,
    session: Option<SessionStore>,
}

impl HttpBackendBuilder {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            tokens: None,
            session: None,
        }
    }

    /// Uses fixed tokens instead of a session store.
    pub fn with_tokens(mut self, tokens: Option<AuthTokens>) -> Self {
        self.tokens = tokens;
        self
    }

    /// Loads tokens from `store` and writes refreshed tokens back to it.
    pub fn with_session_store(mut self, store: SessionStore) -> Self {
        self.session = Some(store);
        self
    }

    /// Builds the configured client.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Configuration` if the HTTP client cannot be built
    /// Returns `BookingError::FileSystem` if the session file cannot be read
    pub fn build(self) -> Result<HttpBackend> {
        let http = Client::builder()
            .timeout(self.config.request_timeout)
            .user_agent(concat!("salon-core/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context("Failed to build HTTP client")?;

        let tokens = match (&self.tokens, &self.session) {
            (Some(tokens), _) => Some(tokens.clone()),
            (None, Some(store)) => store.load()?.map(|session| session.tokens),
            (None, None) => None,
        };

        Ok(HttpBackend {
            http,
            base_url: self.config.api_url.as_str().trim_end_matches('/').to_string(),
            tokens: RwLock::new(tokens),
            session: self.session,
        })
    }
}

impl HttpBackend {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Whether an access token is currently held.
    pub async fn has_session(&self) -> bool {
        self.tokens.read().await.is_some()
    }

    async fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.tokens.read().await.as_ref() {
            Some(tokens) => request.bearer_auth(&tokens.access_token),
            None => request,
        }
    }

    /// Sends a request, refreshing the access token once on 401.
    async fn execute<F>(&self, build: F) -> Result<Response>
    where
        F: Fn(&Client) -> RequestBuilder + Send + Sync,
    {
        let response = self.authorized(build(&self.http)).await.send().await?;
        if response.status() == StatusCode::UNAUTHORIZED && self.refresh().await? {
            let retried = self.authorized(build(&self.http)).await.send().await?;
            return Self::check(retried).await;
        }
        Self::check(response).await
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::UNAUTHORIZED {
            return Err(BookingError::Unauthorized);
        }
        Err(Self::rejection(response).await)
    }

    /// Builds `Rejected` from the body's error message, or the status text.
    async fn rejection(response: Response) -> BookingError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<WireError>(&body)
            .ok()
            .and_then(WireError::into_message)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            });
        debug!("Backend rejected request with {status}: {message}");
        BookingError::Rejected {
            status: status.as_u16(),
            message,
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
        let body = response.bytes().await?;
        serde_json::from_slice(&body)
            .map_err(|e| BookingError::invalid_response(what).with_reason(e.to_string()))
    }

    /// Exchanges the refresh token for a new access token.
    ///
    /// Returns `false` when there is nothing to refresh with or the backend
    /// refused; in the latter case the local session is dropped.
    async fn refresh(&self) -> Result<bool> {
        let refresh_token = match self.tokens.read().await.as_ref() {
            Some(AuthTokens {
                refresh_token: Some(token),
                ..
            }) => token.clone(),
            _ => return Ok(false),
        };

        let response = self
            .http
            .post(self.url("/api/v1/auth/refresh"))
            .json(&RefreshRequest {
                refresh_token: &refresh_token,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            warn!("Token refresh failed with {}", response.status());
            *self.tokens.write().await = None;
            if let Some(store) = &self.session {
                store.clear()?;
            }
            return Ok(false);
        }

        let wire: WireTokens = Self::decode(response, "token refresh").await?;
        let tokens = AuthTokens {
            access_token: wire.access_token,
            refresh_token: wire.refresh_token.or(Some(refresh_token)),
        };
        if let Some(store) = &self.session {
            store.update_tokens(&tokens)?;
        }
        *self.tokens.write().await = Some(tokens);
        debug!("Refreshed access token");
        Ok(true)
    }

    /// Signs in with email and password and keeps the returned tokens.
    ///
    /// Sent without a bearer token and never refreshed; any refusal,
    /// including 401, carries the backend's message.
    pub async fn login(&self, credentials: &Credentials) -> Result<SignIn> {
        let response = self
            .http
            .post(self.url("/api/v1/auth/login"))
            .json(credentials)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }
        let wire: WireSignIn = Self::decode(response, "sign-in").await?;
        let (tokens, identity) = wire.into_parts()?;
        *self.tokens.write().await = Some(tokens.clone());
        Ok(SignIn { tokens, identity })
    }

    /// Forgets the tokens held in memory.
    pub async fn logout(&self) {
        *self.tokens.write().await = None;
    }

    pub async fn get_service(&self, params: &Id) -> Result<Service> {
        let path = format!("/api/v1/services/{}", params.id);
        let response = self.execute(|http| http.get(self.url(&path))).await?;
        let wire: WireService = Self::decode(response, "service").await?;
        wire.try_into()
    }

    pub async fn get_stylist(&self, params: &Id) -> Result<Stylist> {
        let path = format!("/api/v1/stylists/{}", params.id);
        let response = self.execute(|http| http.get(self.url(&path))).await?;
        let wire: WireStylist = Self::decode(response, "stylist").await?;
        wire.try_into()
    }

    /// Bookings of the signed-in customer.
    pub async fn list_bookings(&self) -> Result<Vec<Booking>> {
        let response = self
            .execute(|http| http.get(self.url("/api/v1/bookings")))
            .await?;
        let wire: Vec<WireBooking> = Self::decode(response, "bookings").await?;
        wire.into_iter().map(|b| b.narrow(None)).collect()
    }

    pub async fn get_booking(&self, params: &Id) -> Result<Booking> {
        let path = format!("/api/v1/bookings/{}", params.id);
        let response = self.execute(|http| http.get(self.url(&path))).await?;
        let wire: WireBooking = Self::decode(response, "booking").await?;
        wire.narrow(None)
    }

    pub async fn cancel_booking(&self, params: &Id) -> Result<Booking> {
        let path = format!("/api/v1/bookings/{}/cancel", params.id);
        let response = self.execute(|http| http.post(self.url(&path))).await?;
        let wire: WireBooking = Self::decode(response, "booking").await?;
        wire.narrow(None)
    }

    /// Salon branding. Callers fall back to [`Branding::default`] on error.
    pub async fn branding(&self) -> Result<Branding> {
        let response = self
            .execute(|http| http.get(self.url("/api/v1/settings/branding")))
            .await?;
        Self::decode(response, "branding").await
    }
}

#[async_trait]
impl BookingBackend for HttpBackend {
    async fn list_services(&self) -> Result<Vec<Service>> {
        let response = self
            .execute(|http| http.get(self.url("/api/v1/services")))
            .await?;
        let wire: Vec<WireService> = Self::decode(response, "services").await?;
        wire.into_iter().map(Service::try_from).collect()
    }

    async fn list_stylists(&self) -> Result<Vec<Stylist>> {
        let response = self
            .execute(|http| http.get(self.url("/api/v1/stylists")))
            .await?;
        let wire: Vec<WireStylist> = Self::decode(response, "stylists").await?;
        wire.into_iter().map(Stylist::try_from).collect()
    }

    async fn available_slots(&self, query: &SlotQuery) -> Result<Vec<TimeSlot>> {
        let path = format!("/api/v1/stylists/{}/available-slots", query.stylist_id);
        let date = query.date.to_string();
        let duration = query.duration.to_string();
        debug!(
            "Fetching slots for stylist {} on {date} ({duration} min)",
            query.stylist_id
        );
        let response = self
            .execute(|http| {
                http.get(self.url(&path))
                    .query(&[("date", date.as_str()), ("duration", duration.as_str())])
            })
            .await?;
        let wire: WireSlots = Self::decode(response, "time slots").await?;
        wire.into_slots()
    }

    async fn create_booking(&self, request: &CreateBooking) -> Result<Booking> {
        let body = CreateBookingRequest::from(request);
        let response = self
            .execute(|http| http.post(self.url("/api/v1/bookings")).json(&body))
            .await?;
        let wire: WireBooking = Self::decode(response, "booking").await?;
        wire.narrow(Some(request))
    }

    async fn current_identity(&self) -> Result<Option<Identity>> {
        if !self.has_session().await {
            return Ok(None);
        }
        let response = match self
            .execute(|http| http.get(self.url("/api/v1/auth/profile")))
            .await
        {
            Ok(response) => response,
            Err(BookingError::Unauthorized) => return Ok(None),
            Err(e) => return Err(e),
        };
        let wire: WireProfile = Self::decode(response, "profile").await?;
        wire.into_identity().map(Some)
    }
}
