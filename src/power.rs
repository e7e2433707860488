use std::io;
use std::process::Command;

use tracing::info;

const SHUTDOWN_PROGRAM: &str = "shutdown.exe";
/// Shut down, force-close applications, no delay.
const SHUTDOWN_ARGS: [&str; 4] = ["/s", "/f", "/t", "0"];

#[cfg_attr(test, mockall::automock)]
pub trait PowerControl {
    fn shutdown(&self) -> io::Result<()>;
}

/// Invokes `shutdown.exe`. Reachable from Windows and from WSL through interop.
pub struct WindowsShutdown;

impl PowerControl for WindowsShutdown {
    fn shutdown(&self) -> io::Result<()> {
        info!("Running {} {}", SHUTDOWN_PROGRAM, SHUTDOWN_ARGS.join(" "));
        let status = Command::new(SHUTDOWN_PROGRAM).args(SHUTDOWN_ARGS).status()?;
        if !status.success() {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("{} exited with {}", SHUTDOWN_PROGRAM, status),
            ));
        }
        Ok(())
    }
}
