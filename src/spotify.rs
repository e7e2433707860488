use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use reqwest::StatusCode;
use tracing::{error, info};

use crate::config::{Config, Credentials};
use crate::types::{CurrentlyPlaying, Playback, TokenPair, TokenResponse};

pub struct SpotifyClient {
    credentials: Credentials,
    token_url: String,
    player_url: String,
    redirect_uri: String,
    client: reqwest::Client,
}

#[derive(Debug)]
pub enum SpotifyError {
    /// A credential needed for this call was not configured. No request was sent.
    MissingCredential(&'static str),
    Network(String),
    /// Token endpoint answered with something other than 200.
    Auth { status: u16, body: String },
    /// Web API answered with an unexpected status.
    Api { status: u16, body: String },
    Parse(String),
}

impl std::fmt::Display for SpotifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpotifyError::MissingCredential(name) => write!(f, "{} is not set", name),
            SpotifyError::Network(msg) => write!(f, "Network error: {}", msg),
            SpotifyError::Auth { status, body } => write!(f, "Auth error: {} - {}", status, body),
            SpotifyError::Api { status, body } => write!(f, "API error: {} - {}", status, body),
            SpotifyError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for SpotifyError {}

/// `Basic base64(client_id:client_secret)`, as the token endpoint expects.
pub fn basic_auth_header(client_id: &str, client_secret: &str) -> String {
    let auth = BASE64_STANDARD.encode(format!("{}:{}", client_id, client_secret));
    format!("Basic {}", auth)
}

impl SpotifyClient {
    pub fn new(config: &Config) -> Self {
        Self {
            credentials: config.credentials.clone(),
            token_url: config.token_url.clone(),
            player_url: config.player_url.clone(),
            redirect_uri: config.redirect_uri.clone(),
            client: reqwest::Client::new(),
        }
    }

    /// Mints a fresh access token from the configured refresh token.
    pub async fn refresh_access_token(&self) -> Result<String, SpotifyError> {
        let refresh_token = self
            .credentials
            .refresh_token
            .as_deref()
            .ok_or(SpotifyError::MissingCredential("SPOTIFY_REFRESH_TOKEN"))?;

        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ];

        let token = self.request_token(&params, "Error refreshing token").await?;
        info!("Successfully refreshed access token.");
        Ok(token.access_token)
    }

    /// One-time exchange of the authorization code for an access/refresh token pair.
    pub async fn exchange_authorization_code(&self) -> Result<TokenPair, SpotifyError> {
        let code = self
            .credentials
            .authorization_code
            .as_deref()
            .ok_or(SpotifyError::MissingCredential("SPOTIFY_AUTHORIZATION_CODE"))?;

        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.redirect_uri.as_str()),
        ];

        let token = self
            .request_token(&params, "Error getting initial tokens")
            .await?;
        let refresh_token = token.refresh_token.ok_or_else(|| {
            SpotifyError::Parse("token response has no refresh_token".to_string())
        })?;

        Ok(TokenPair {
            access_token: token.access_token,
            refresh_token,
        })
    }

    async fn request_token(
        &self,
        params: &[(&str, &str)],
        context: &str,
    ) -> Result<TokenResponse, SpotifyError> {
        let response = self
            .client
            .post(&self.token_url)
            .header(
                "Authorization",
                basic_auth_header(&self.credentials.client_id, &self.credentials.client_secret),
            )
            .form(params)
            .send()
            .await
            .map_err(|e| SpotifyError::Network(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            error!("{}: {} - {}", context, status, body);
            return Err(SpotifyError::Auth {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| SpotifyError::Parse(format!("Parse failed: {}", e)))
    }

    /// Snapshot of the user's player. 204 means nothing is playing, which is not an error.
    pub async fn currently_playing(&self, access_token: &str) -> Result<Playback, SpotifyError> {
        let response = self
            .client
            .get(&self.player_url)
            .header("Authorization", format!("Bearer {}", access_token))
            .send()
            .await
            .map_err(|e| SpotifyError::Network(format!("Request failed: {}", e)))?;

        match response.status() {
            StatusCode::OK => {
                let current: CurrentlyPlaying = response
                    .json()
                    .await
                    .map_err(|e| SpotifyError::Parse(format!("Parse failed: {}", e)))?;
                Ok(Playback::Playing(current))
            }
            StatusCode::NO_CONTENT => {
                info!("No song is currently playing or the player is inactive.");
                Ok(Playback::Nothing)
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                error!("Error getting song info: {} - {}", status, body);
                Err(SpotifyError::Api {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }
}
