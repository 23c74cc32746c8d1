//! Putting the host to sleep once the monitor is done.

use std::process::Command;

use crate::app::Result;

/// Capability to hibernate the host.
pub trait Hibernate: Send + Sync {
    fn hibernate(&self) -> Result<()>;
}

/// Runs the platform's hibernate command.
///
/// The command is spawned and left running; its outcome is not checked.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHibernate;

impl SystemHibernate {
    #[cfg(windows)]
    fn command() -> Command {
        let mut cmd = Command::new("shutdown");
        cmd.arg("/h");
        cmd
    }

    #[cfg(target_os = "macos")]
    fn command() -> Command {
        let mut cmd = Command::new("pmset");
        cmd.arg("sleepnow");
        cmd
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    fn command() -> Command {
        let mut cmd = Command::new("systemctl");
        cmd.arg("hibernate");
        cmd
    }
}

impl Hibernate for SystemHibernate {
    fn hibernate(&self) -> Result<()> {
        let mut cmd = Self::command();
        tracing::warn!("Hibernating: {:?}", cmd);
        cmd.spawn()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(all(unix, not(target_os = "macos")))]
    #[test]
    fn test_linux_command() {
        let cmd = SystemHibernate::command();
        assert_eq!(cmd.get_program(), "systemctl");
        assert_eq!(cmd.get_args().collect::<Vec<_>>(), vec!["hibernate"]);
    }

    #[cfg(windows)]
    #[test]
    fn test_windows_command() {
        let cmd = SystemHibernate::command();
        assert_eq!(cmd.get_program(), "shutdown");
        assert_eq!(cmd.get_args().collect::<Vec<_>>(), vec!["/h"]);
    }
}
