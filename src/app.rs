use std::future::Future;
use std::io::{self, Write};

use tracing::{error, info, warn};

use crate::countdown::{remaining_seconds, Countdown, CountdownOutcome};
use crate::power::PowerControl;
use crate::spotify::{SpotifyClient, SpotifyError};
use crate::types::Playback;

/// How a run ended. Decides the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    ShutdownIssued,
    ShutdownFailed,
    /// Operator interrupted the countdown; no shutdown was issued.
    Cancelled,
    /// First-time setup printed a refresh token for the operator to store.
    BootstrapPrompted,
    BootstrapFailed,
    NothingPlaying,
    NotPlaying,
    QueryFailed,
    TrackOver,
}

impl Outcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::BootstrapFailed | Outcome::ShutdownFailed => 1,
            _ => 0,
        }
    }
}

/// Authenticates, looks at the current track and shuts down when it ends.
///
/// Operator-facing messages and the progress bar go to `out`. `interrupt` cancels the countdown.
pub async fn run<P, W, F>(
    client: &SpotifyClient,
    power: &P,
    out: &mut W,
    interrupt: F,
) -> io::Result<Outcome>
where
    P: PowerControl,
    W: Write,
    F: Future,
{
    let access_token = match client.refresh_access_token().await {
        Ok(token) => token,
        Err(e) => {
            match e {
                SpotifyError::MissingCredential(_) => info!("{}, skipping token refresh", e),
                _ => warn!("Token refresh failed: {}", e),
            }
            return bootstrap(client, out).await;
        }
    };

    let current = match client.currently_playing(&access_token).await {
        Ok(Playback::Playing(current)) => current,
        Ok(Playback::Nothing) => return no_song(out, Outcome::NothingPlaying),
        Err(e) => {
            warn!("Playback query failed: {}", e);
            return no_song(out, Outcome::QueryFailed);
        }
    };

    let track = match current.item {
        Some(track) if current.is_playing => track,
        _ => return no_song(out, Outcome::NotPlaying),
    };

    let seconds = remaining_seconds(current.progress_ms, track.duration_ms);
    if seconds <= 0 {
        writeln!(out, "Song is already over.")?;
        return Ok(Outcome::TrackOver);
    }

    writeln!(
        out,
        "Currently playing: '{}' by {}",
        track.name,
        track.first_artist().unwrap_or("Unknown artist")
    )?;
    writeln!(out, "Song ends in {} seconds.", seconds)?;
    writeln!(out, "Windows will shut down in {} seconds.", seconds)?;

    let countdown = Countdown::new(seconds as u64);
    match countdown.run(out, interrupt).await? {
        CountdownOutcome::Cancelled => {
            info!("Countdown cancelled, no shutdown issued");
            Ok(Outcome::Cancelled)
        }
        CountdownOutcome::Complete => match power.shutdown() {
            Ok(()) => Ok(Outcome::ShutdownIssued),
            Err(e) => {
                error!("Failed to run shutdown command: {}", e);
                Ok(Outcome::ShutdownFailed)
            }
        },
    }
}

async fn bootstrap<W: Write>(client: &SpotifyClient, out: &mut W) -> io::Result<Outcome> {
    writeln!(out, "Attempting first-time setup to get tokens...")?;

    match client.exchange_authorization_code().await {
        Ok(pair) => {
            writeln!(out, "First-time setup successful!")?;
            writeln!(out)?;
            writeln!(
                out,
                "IMPORTANT: Set the SPOTIFY_REFRESH_TOKEN environment variable with this value for future runs."
            )?;
            writeln!(out, "Your Refresh Token is: {}", pair.refresh_token)?;
            writeln!(out)?;
            writeln!(out, "Store the refresh token and run again.")?;
            Ok(Outcome::BootstrapPrompted)
        }
        Err(e) => {
            match e {
                SpotifyError::MissingCredential(name) => writeln!(
                    out,
                    "Error: Please provide the one-time {} for the first run.",
                    name
                )?,
                e => writeln!(out, "Error getting initial tokens: {}", e)?,
            }
            writeln!(out)?;
            writeln!(
                out,
                "Setup failed. Please check your credentials and authorization code."
            )?;
            Ok(Outcome::BootstrapFailed)
        }
    }
}

fn no_song<W: Write>(out: &mut W, outcome: Outcome) -> io::Result<Outcome> {
    writeln!(
        out,
        "Could not get song information. Is a song playing on Spotify?"
    )?;
    Ok(outcome)
}
