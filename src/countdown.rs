use std::future::Future;
use std::io::{self, Write};
use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};

const BAR_LENGTH: usize = 30;
/// Subtracted from the track's remaining time so the shutdown lands before the next track starts.
const SAFETY_MARGIN_SECS: u64 = 2;
const TICK: Duration = Duration::from_millis(100);

/// Whole seconds left in a track, floored. Zero or negative means the track is over.
pub fn remaining_seconds(progress_ms: u64, duration_ms: u64) -> i64 {
    (duration_ms as i64 - progress_ms as i64).div_euclid(1000)
}

/// `[=====-----] 4.2s remaining`
pub fn render_progress(elapsed: Duration, target: Duration) -> String {
    let percent = if target.is_zero() {
        1.0
    } else {
        (elapsed.as_secs_f64() / target.as_secs_f64()).min(1.0)
    };
    let filled = ((BAR_LENGTH as f64) * percent) as usize;
    let remaining = (target.as_secs_f64() - elapsed.as_secs_f64()).max(0.0);

    format!(
        "[{}{}] {:.1}s remaining",
        "=".repeat(filled),
        "-".repeat(BAR_LENGTH - filled),
        remaining
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownOutcome {
    Complete,
    Cancelled,
}

pub struct Countdown {
    target: Duration,
    tick: Duration,
}

impl Countdown {
    pub fn new(seconds: u64) -> Self {
        Self {
            target: Duration::from_secs(seconds.saturating_sub(SAFETY_MARGIN_SECS)),
            tick: TICK,
        }
    }

    pub fn target(&self) -> Duration {
        self.target
    }

    /// Redraws the progress bar on every tick until the target elapses or `interrupt` resolves.
    ///
    /// A ready interrupt always wins over a ready tick.
    pub async fn run<W, F>(&self, out: &mut W, interrupt: F) -> io::Result<CountdownOutcome>
    where
        W: Write,
        F: Future,
    {
        let start = Instant::now();
        let mut ticker = tokio::time::interval(self.tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(interrupt);

        loop {
            let elapsed = start.elapsed();
            if elapsed >= self.target {
                break;
            }

            write!(out, "\r{}", render_progress(elapsed, self.target))?;
            out.flush()?;

            tokio::select! {
                biased;
                _ = &mut interrupt => {
                    writeln!(out)?;
                    writeln!(out, "Shutdown cancelled by user.")?;
                    out.flush()?;
                    return Ok(CountdownOutcome::Cancelled);
                }
                _ = ticker.tick() => {}
            }
        }

        writeln!(out, "\r[{}] 0.0s remaining", "=".repeat(BAR_LENGTH))?;
        out.flush()?;
        Ok(CountdownOutcome::Complete)
    }
}
