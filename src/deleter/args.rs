use clap::Parser;
use directories::BaseDirs;
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "mattermost-user-deleter", version)]
#[command(about = "Mattermost user purger", long_about = None)]
pub struct Cli {
    /// Mattermost config.json to read database and LDAP settings from
    #[arg(long, value_parser = parse_config_file)]
    pub config: PathBuf,

    /// Mattermost installation directory (contains bin/mattermost)
    #[arg(long, value_parser = parse_root_dir)]
    pub mattermost_root: PathBuf,

    /// Decide and log, but do not delete anything
    #[arg(long)]
    pub dry_run: bool,

    /// Debug output
    #[arg(long)]
    pub debug: bool,
}

fn parse_config_file(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if !path.is_file() {
        return Err(format!("{} is not a readable file", value));
    }
    File::open(&path).map_err(|e| format!("{} is not a readable file: {}", value, e))?;
    Ok(path)
}

fn parse_root_dir(value: &str) -> Result<PathBuf, String> {
    let path = expand_path(value)?;
    if !path.is_dir() {
        return Err(format!("{} is not a directory", value));
    }
    Ok(path)
}

/// Expand a leading `~` and make the path absolute.
fn expand_path(value: &str) -> Result<PathBuf, String> {
    let expanded = match value.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => {
            let home = BaseDirs::new()
                .map(|dirs| dirs.home_dir().to_path_buf())
                .ok_or_else(|| "cannot determine home directory".to_string())?;
            home.join(rest.trim_start_matches('/'))
        }
        _ => PathBuf::from(value),
    };
    absolute(&expanded)
}

fn absolute(path: &Path) -> Result<PathBuf, String> {
    std::path::absolute(path).map_err(|e| format!("{}: {}", path.display(), e))
}
