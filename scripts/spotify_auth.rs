use axum::{extract::Query, response::Html, routing::get, Router};
use serde::Deserialize;
use spotify_shutdown::{authorize_url, Config};

#[derive(Deserialize)]
struct CallbackParams {
    code: Option<String>,
    error: Option<String>,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spotify_auth=info,tower_http=info".into()),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("\n❌ {}", e);
            eprintln!("\nTo get your Spotify credentials:");
            eprintln!("1. Go to https://developer.spotify.com/dashboard");
            eprintln!("2. Create a new app");
            eprintln!("3. Copy the Client ID and Client Secret");
            eprintln!("4. Add them to your .env file:");
            eprintln!("   SPOTIFY_CLIENT_ID=your_client_id");
            eprintln!("   SPOTIFY_CLIENT_SECRET=your_client_secret\n");
            std::process::exit(1);
        }
    };

    let redirect = match reqwest::Url::parse(&config.redirect_uri) {
        Ok(url) => url,
        Err(e) => {
            eprintln!("Invalid redirect URI {}: {}", config.redirect_uri, e);
            std::process::exit(1);
        }
    };
    let host = redirect.host_str().unwrap_or("127.0.0.1").to_string();
    let port = redirect.port_or_known_default().unwrap_or(8888);
    let path = redirect.path().to_string();

    println!("\n=== Spotify OAuth Setup ===\n");
    println!("1. Open this URL in your browser:");
    println!(
        "   {}\n",
        authorize_url(&config.credentials.client_id, &config.redirect_uri)
    );
    println!("2. Authorize the app; the code will be printed here\n");
    println!("Waiting for callback on {}...\n", config.redirect_uri);

    let app = Router::new()
        .route(&path, get(callback_handler))
        .layer(tower_http::trace::TraceLayer::new_for_http());

    let listener = match tokio::net::TcpListener::bind((host.as_str(), port)).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("Failed to listen on {}:{}: {}", host, port, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Callback server error: {}", e);
        std::process::exit(1);
    }
}

async fn callback_handler(Query(params): Query<CallbackParams>) -> Html<String> {
    if let Some(error) = params.error {
        eprintln!("Authorization error: {}", error);
        return Html(format!(
            r#"
            <html>
                <body>
                    <h1>Authorization Error</h1>
                    <p>Error: {}</p>
                </body>
            </html>
            "#,
            error
        ));
    }

    if let Some(code) = params.code {
        println!("\n=== SUCCESS ===\n");
        println!("Add this to your .env file, then run spotify-shutdown once:");
        println!("SPOTIFY_AUTHORIZATION_CODE={}\n", code);
        println!("The code is single-use and expires in a few minutes.");
        println!("You can now close this window and stop the server (Ctrl+C).\n");

        return Html(
            r#"
            <html>
                <body>
                    <h1>Success!</h1>
                    <p>Check your terminal for the authorization code.</p>
                    <p>You can close this window.</p>
                </body>
            </html>
            "#
            .to_string(),
        );
    }

    Html(
        r#"
        <html>
            <body>
                <h1>No code received</h1>
                <p>Please try again.</p>
            </body>
        </html>
    "#
        .to_string(),
    )
}
