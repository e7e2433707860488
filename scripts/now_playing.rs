// Diagnostic: refresh the token and show what the shutdown timer would see.
// Run: cargo run --bin now_playing

use spotify_shutdown::countdown::{remaining_seconds, Countdown};
use spotify_shutdown::types::Playback;
use spotify_shutdown::{Config, SpotifyClient};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spotify_shutdown=warn".into()),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            println!("FAIL: {}", e);
            std::process::exit(1);
        }
    };
    let client = SpotifyClient::new(&config);

    // 1. Get access token
    println!("1. Refreshing token...");
    let access_token = match client.refresh_access_token().await {
        Ok(token) => token,
        Err(e) => {
            println!("   FAIL: {}", e);
            std::process::exit(1);
        }
    };
    println!("   OK.");

    // 2. Query the player
    println!("\n2. Getting current playback (GET /v1/me/player/currently-playing)...");
    let current = match client.currently_playing(&access_token).await {
        Ok(Playback::Playing(current)) => current,
        Ok(Playback::Nothing) => {
            println!("   Nothing is playing (204).");
            return;
        }
        Err(e) => {
            println!("   FAIL: {}", e);
            std::process::exit(1);
        }
    };

    let Some(track) = current.item else {
        println!("   Player is active but has no track item.");
        return;
    };

    println!(
        "   Track: '{}' by {}",
        track.name,
        track.first_artist().unwrap_or("?")
    );
    println!(
        "   Playing: {}  Progress: {} / {} ms",
        current.is_playing, current.progress_ms, track.duration_ms
    );

    // 3. What the shutdown timer would do
    let seconds = remaining_seconds(current.progress_ms, track.duration_ms);
    println!("\n3. Remaining: {} seconds", seconds);
    if current.is_playing && seconds > 0 {
        let target = Countdown::new(seconds as u64).target();
        println!("   Shutdown would be issued after {}s.", target.as_secs());
    } else {
        println!("   No shutdown would be scheduled.");
    }
}
