use std::process::Command;

use anyhow::{bail, Context};

/// Opens a URL for the user.
pub trait BrowserLauncher {
    fn open(&self, url: &str) -> anyhow::Result<()>;
}

/// Hands the URL to the platform's default opener.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl BrowserLauncher for SystemBrowser {
    fn open(&self, url: &str) -> anyhow::Result<()> {
        let mut command = opener_command(url);
        let status = command
            .status()
            .with_context(|| format!("failed to start browser for {url}"))?;
        if !status.success() {
            bail!("browser opener exited with {status}");
        }
        Ok(())
    }
}

#[cfg(target_os = "macos")]
fn opener_command(url: &str) -> Command {
    let mut command = Command::new("open");
    command.arg(url);
    command
}

#[cfg(target_os = "windows")]
fn opener_command(url: &str) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", ""]).arg(url);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener_command(url: &str) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(url);
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(target_os = "linux")]
    #[test]
    fn test_linux_opener() {
        let command = opener_command("https://meet.jit.si/Room");
        assert_eq!(command.get_program(), "xdg-open");
        let args: Vec<_> = command.get_args().collect();
        assert_eq!(args, vec!["https://meet.jit.si/Room"]);
    }
}
