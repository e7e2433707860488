use spotify_shutdown::app;
use spotify_shutdown::power::WindowsShutdown;
use spotify_shutdown::{Config, SpotifyClient};
use tracing::error;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spotify_shutdown=info".into()),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("\n❌ {}", e);
            eprintln!("\nTo get your Spotify credentials:");
            eprintln!("1. Go to https://developer.spotify.com/dashboard");
            eprintln!("2. Create an app with redirect URI http://127.0.0.1:8888/callback");
            eprintln!("3. Add the Client ID and Client Secret to your environment or .env file:");
            eprintln!("   SPOTIFY_CLIENT_ID=your_client_id");
            eprintln!("   SPOTIFY_CLIENT_SECRET=your_client_secret");
            eprintln!("4. Run `cargo run --bin spotify_auth` to get an authorization code\n");
            std::process::exit(1);
        }
    };

    let client = SpotifyClient::new(&config);
    let mut stdout = std::io::stdout();

    let outcome = app::run(
        &client,
        &WindowsShutdown,
        &mut stdout,
        tokio::signal::ctrl_c(),
    )
    .await;

    match outcome {
        Ok(outcome) => std::process::exit(outcome.exit_code()),
        Err(e) => {
            error!("Failed to write to the console: {}", e);
            std::process::exit(1);
        }
    }
}
