pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_PLAYER_URL: &str = "https://api.spotify.com/v1/me/player/currently-playing";
/// Must match the redirect URI registered in the Spotify developer dashboard.
pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";

#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub authorization_code: Option<String>,
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub token_url: String,
    pub player_url: String,
    pub redirect_uri: String,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Missing(name) => write!(f, "{} is not set", name),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let client_id = get("SPOTIFY_CLIENT_ID").ok_or(ConfigError::Missing("SPOTIFY_CLIENT_ID"))?;
        let client_secret =
            get("SPOTIFY_CLIENT_SECRET").ok_or(ConfigError::Missing("SPOTIFY_CLIENT_SECRET"))?;

        Ok(Self {
            credentials: Credentials {
                client_id,
                client_secret,
                authorization_code: get("SPOTIFY_AUTHORIZATION_CODE"),
                refresh_token: get("SPOTIFY_REFRESH_TOKEN"),
            },
            token_url: get("SPOTIFY_TOKEN_URL").unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            player_url: get("SPOTIFY_PLAYER_URL").unwrap_or_else(|| DEFAULT_PLAYER_URL.to_string()),
            redirect_uri: get("SPOTIFY_REDIRECT_URI")
                .unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn reads_required_and_optional_credentials() {
        let config = Config::from_lookup(lookup(&[
            ("SPOTIFY_CLIENT_ID", "id"),
            ("SPOTIFY_CLIENT_SECRET", "secret"),
            ("SPOTIFY_REFRESH_TOKEN", "refresh"),
        ]))
        .unwrap();

        assert_eq!(config.credentials.client_id, "id");
        assert_eq!(config.credentials.client_secret, "secret");
        assert_eq!(config.credentials.refresh_token.as_deref(), Some("refresh"));
        assert_eq!(config.credentials.authorization_code, None);
        assert_eq!(config.token_url, DEFAULT_TOKEN_URL);
        assert_eq!(config.player_url, DEFAULT_PLAYER_URL);
        assert_eq!(config.redirect_uri, DEFAULT_REDIRECT_URI);
    }

    #[test]
    fn missing_client_secret_is_an_error() {
        let err = Config::from_lookup(lookup(&[("SPOTIFY_CLIENT_ID", "id")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("SPOTIFY_CLIENT_SECRET"));
        assert_eq!(err.to_string(), "SPOTIFY_CLIENT_SECRET is not set");
    }

    #[test]
    fn empty_values_are_treated_as_unset() {
        let config = Config::from_lookup(lookup(&[
            ("SPOTIFY_CLIENT_ID", "id"),
            ("SPOTIFY_CLIENT_SECRET", "secret"),
            ("SPOTIFY_REFRESH_TOKEN", ""),
            ("SPOTIFY_AUTHORIZATION_CODE", "  "),
        ]))
        .unwrap();

        assert_eq!(config.credentials.refresh_token, None);
        assert_eq!(config.credentials.authorization_code, None);

        let err = Config::from_lookup(lookup(&[
            ("SPOTIFY_CLIENT_ID", ""),
            ("SPOTIFY_CLIENT_SECRET", "secret"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Missing("SPOTIFY_CLIENT_ID"));
    }

    #[test]
    fn endpoint_overrides_are_respected() {
        let config = Config::from_lookup(lookup(&[
            ("SPOTIFY_CLIENT_ID", "id"),
            ("SPOTIFY_CLIENT_SECRET", "secret"),
            ("SPOTIFY_TOKEN_URL", "http://localhost:9000/token"),
            ("SPOTIFY_PLAYER_URL", "http://localhost:9000/player"),
            ("SPOTIFY_REDIRECT_URI", "http://localhost:9999/cb"),
        ]))
        .unwrap();

        assert_eq!(config.token_url, "http://localhost:9000/token");
        assert_eq!(config.player_url, "http://localhost:9000/player");
        assert_eq!(config.redirect_uri, "http://localhost:9999/cb");
    }
}
