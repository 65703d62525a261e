//! Where the CLI keeps its config file and run logs.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

const LATEST_LOG: &str = "latest.log";
/// Archived run logs kept next to `latest.log`.
const MAX_OLD_LOGS: usize = 10;

fn dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "datatable", "datatable")
}

/// `config.json` under the platform config dir, e.g.
/// `~/.config/datatable/config.json` on Linux.
pub fn config_file() -> Option<PathBuf> {
    dirs().map(|d| d.config_dir().join("config.json"))
}

/// The log written by the current run, under the platform cache dir.
pub fn log_file() -> Option<PathBuf> {
    dirs().map(|d| d.cache_dir().join(LATEST_LOG))
}

/// Archives the previous run's log before a new one is opened.
pub fn rotate_logs() {
    if let Some(d) = dirs() {
        rotate_logs_in(d.cache_dir());
    }
}

fn rotate_logs_in(dir: &Path) {
    let previous = dir.join(LATEST_LOG);
    if previous.is_file() {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        if let Err(e) = fs::rename(&previous, dir.join(format!("{stamp}.log"))) {
            eprintln!("could not archive {}: {e}", previous.display());
        }
    }
    prune_archived_logs(dir);
}

/// Deletes archived logs beyond [`MAX_OLD_LOGS`], least recently modified
/// first.
fn prune_archived_logs(dir: &Path) {
    let Ok(entries) = fs::read_dir(dir) else { return };

    let mut archived: Vec<(Option<std::time::SystemTime>, PathBuf)> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension().is_some_and(|ext| ext == "log")
                && path.file_name().is_some_and(|name| name != LATEST_LOG)
        })
        .map(|path| (fs::metadata(&path).and_then(|m| m.modified()).ok(), path))
        .collect();
    if archived.len() <= MAX_OLD_LOGS {
        return;
    }

    archived.sort();
    let excess = archived.len() - MAX_OLD_LOGS;
    for (_, path) in archived.into_iter().take(excess) {
        let _ = fs::remove_file(path);
    }
}
