pub mod app;
pub mod config;
pub mod countdown;
pub mod power;
pub mod spotify;
pub mod types;

pub use config::Config;
pub use spotify::SpotifyClient;

/// Scopes the shutdown timer needs on the user's account.
pub const SCOPES: &str = "user-read-currently-playing user-read-playback-state";

/// URL the operator opens once to grant access and obtain an authorization code.
pub fn authorize_url(client_id: &str, redirect_uri: &str) -> String {
    format!(
        "https://accounts.spotify.com/authorize?client_id={}&response_type=code&redirect_uri={}&scope={}",
        client_id,
        urlencoding::encode(redirect_uri),
        urlencoding::encode(SCOPES)
    )
}
