//! Permanently deleting users through the Mattermost CLI.
//!
//! The CLI is used instead of touching the database directly so the server
//! cleans up everything a user owns.

use crate::error::{DeleterError, Result};
use crate::model::CandidateUser;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

const CLI_RELATIVE_PATH: &str = "bin/mattermost";

/// The destructive external action.
pub trait UserDeleter {
    fn delete_user(&mut self, user: &CandidateUser) -> Result<()>;
}

/// Runs `<root>/bin/mattermost user delete <id> --confirm`.
#[derive(Debug, Clone)]
pub struct MattermostCli {
    path: PathBuf,
}

impl MattermostCli {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// CLI inside a Mattermost installation directory.
    pub fn from_root<P: AsRef<Path>>(root: P) -> Self {
        Self::new(root.as_ref().join(CLI_RELATIVE_PATH))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn delete_args(user_id: &str) -> [&str; 4] {
        ["user", "delete", user_id, "--confirm"]
    }
}

impl UserDeleter for MattermostCli {
    fn delete_user(&mut self, user: &CandidateUser) -> Result<()> {
        let output = Command::new(&self.path)
            .args(Self::delete_args(&user.id))
            .output()
            .map_err(|e| {
                DeleterError::Command(format!("failed to run {}: {}", self.path.display(), e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DeleterError::Command(format!(
                "{} user delete {} exited with {}: {}",
                self.path.display(),
                user.id,
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            debug!("mattermost: {}", stdout.trim());
        }
        Ok(())
    }
}

/// Records deletions instead of performing them.
#[derive(Debug, Default, Clone)]
pub struct RecordingDeleter {
    deleted: Vec<String>,
    fail_on: Option<String>,
}

impl RecordingDeleter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the deletion of `user_id` fail.
    pub fn failing_on(mut self, user_id: &str) -> Self {
        self.fail_on = Some(user_id.to_string());
        self
    }

    /// Ids passed to `delete_user`, in call order.
    pub fn deleted(&self) -> &[String] {
        &self.deleted
    }
}

impl UserDeleter for RecordingDeleter {
    fn delete_user(&mut self, user: &CandidateUser) -> Result<()> {
        if self.fail_on.as_deref() == Some(user.id.as_str()) {
            return Err(DeleterError::Command(format!(
                "user delete {} exited with exit status: 1",
                user.id
            )));
        }
        self.deleted.push(user.id.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_path_from_root() {
        let cli = MattermostCli::from_root("/opt/mattermost");
        assert_eq!(cli.path(), Path::new("/opt/mattermost/bin/mattermost"));
    }

    #[test]
    fn test_delete_args() {
        assert_eq!(
            MattermostCli::delete_args("u1"),
            ["user", "delete", "u1", "--confirm"]
        );
    }

    #[test]
    fn test_missing_binary_is_a_command_error() {
        let root = tempfile::tempdir().unwrap();
        let mut cli = MattermostCli::from_root(root.path());
        let user = CandidateUser::new("u1", "jdoe", Some("jdoe"), 1000);

        let err = cli.delete_user(&user).unwrap_err();
        assert!(matches!(err, DeleterError::Command(_)));
    }

    #[cfg(unix)]
    fn install_script(root: &Path, body: &str) {
        use std::os::unix::fs::PermissionsExt;

        let bin = root.join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        let script = bin.join("mattermost");
        std::fs::write(&script, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_invokes_cli_with_user_id_and_confirm() {
        let root = tempfile::tempdir().unwrap();
        let record = root.path().join("args.txt");
        install_script(
            root.path(),
            &format!("echo \"$@\" >> '{}'", record.display()),
        );

        let mut cli = MattermostCli::from_root(root.path());
        cli.delete_user(&CandidateUser::new("u1", "jdoe", Some("jdoe"), 1000))
            .unwrap();

        let recorded = std::fs::read_to_string(&record).unwrap();
        assert_eq!(recorded, "user delete u1 --confirm\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_is_an_error() {
        let root = tempfile::tempdir().unwrap();
        install_script(root.path(), "echo 'user not found' >&2\nexit 3");

        let mut cli = MattermostCli::from_root(root.path());
        let err = cli
            .delete_user(&CandidateUser::new("u1", "jdoe", Some("jdoe"), 1000))
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("user delete u1"));
        assert!(message.contains("user not found"));
    }

    #[test]
    fn test_recording_deleter() {
        let mut deleter = RecordingDeleter::new().failing_on("u2");
        deleter
            .delete_user(&CandidateUser::new("u1", "a", Some("a"), 1))
            .unwrap();
        assert!(deleter
            .delete_user(&CandidateUser::new("u2", "b", Some("b"), 1))
            .is_err());
        assert_eq!(deleter.deleted(), ["u1"]);
    }
}
