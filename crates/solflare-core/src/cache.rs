//! Disk cache of raw archive files and its purge policy.
//!
//! Daily event files keep being revised upstream for a few days after their
//! nominal date. Before every query the cache is scanned and files inside
//! that revision window are deleted so the next fetch picks up a fresher copy,
//! unless they were downloaded very recently.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::Serialize;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::config::PurgePolicy;
use crate::domain::parse_compact_date;

/// Outcome of the purge policy for one directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PurgeDecision {
    /// The reserved documentation file.
    Reserved,
    Directory,
    /// Name does not start with `YYYYMMDD` (annual reports).
    Undated,
    /// Nominal date is old enough that upstream data is final.
    Final,
    /// Modified less than `refresh_after` ago, or in the future.
    RecentlyFetched,
    /// Modification time could not be read.
    UnknownAge,
    /// Inside the revision window and not fetched recently: delete.
    Stale,
}

impl PurgeDecision {
    pub const fn should_delete(self) -> bool {
        matches!(self, Self::Stale)
    }
}

/// Apply the purge policy to a single entry.
pub fn classify_entry(
    file_name: &str,
    is_dir: bool,
    modified: Option<SystemTime>,
    now: OffsetDateTime,
    policy: &PurgePolicy,
) -> PurgeDecision {
    if file_name == policy.reserved_file {
        return PurgeDecision::Reserved;
    }
    if is_dir {
        return PurgeDecision::Directory;
    }

    let Some(nominal) = file_name.get(..8).and_then(parse_compact_date) else {
        return PurgeDecision::Undated;
    };

    let nominal_age = now - nominal.midnight().assume_utc();
    if nominal_age.whole_days() > policy.final_after_days {
        return PurgeDecision::Final;
    }

    let Some(modified) = modified else {
        return PurgeDecision::UnknownAge;
    };

    match SystemTime::from(now).duration_since(modified) {
        Ok(age) if age >= policy.refresh_after => PurgeDecision::Stale,
        _ => PurgeDecision::RecentlyFetched,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurgeFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Summary of one purge or clear pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PurgeReport {
    pub scanned: usize,
    pub retained: usize,
    pub deleted: Vec<PathBuf>,
    pub failed: Vec<PurgeFailure>,
}

/// Directory of previously fetched archive files.
#[derive(Debug, Clone)]
pub struct CacheStore {
    root: PathBuf,
    policy: PurgePolicy,
}

impl CacheStore {
    /// Open the cache, creating the directory when missing.
    ///
    /// A directory that cannot be created is logged; the store still works in
    /// degraded mode where every write fails and every lookup misses.
    pub fn open(root: impl Into<PathBuf>, policy: PurgePolicy) -> Self {
        let root = root.into();
        if !root.is_dir() {
            if let Err(error) = fs::create_dir_all(&root) {
                warn!(
                    path = %root.display(),
                    %error,
                    "unable to create cache directory; continuing without cache"
                );
            }
        }
        Self { root, policy }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.path_for(file_name).is_file()
    }

    /// Store a fetched file verbatim. A partially written file is removed.
    pub fn write(&self, file_name: &str, contents: &[u8]) -> io::Result<PathBuf> {
        let path = self.path_for(file_name);
        if let Err(error) = fs::write(&path, contents) {
            self.remove(file_name);
            return Err(error);
        }
        Ok(path)
    }

    /// Remove a cached file if present; returns whether a file was deleted.
    pub fn remove(&self, file_name: &str) -> bool {
        let path = self.path_for(file_name);
        if !path.is_file() {
            return false;
        }

        match fs::remove_file(&path) {
            Ok(()) => true,
            Err(error) => {
                warn!(path = %path.display(), %error, "unable to remove cache file");
                false
            }
        }
    }

    /// Run the purge policy against the current time.
    pub fn purge(&self) -> PurgeReport {
        self.purge_at(OffsetDateTime::now_utc())
    }

    /// Run the purge policy as if the current time were `now`.
    pub fn purge_at(&self, now: OffsetDateTime) -> PurgeReport {
        info!(path = %self.root.display(), "purging stale cache files");
        let report = self.sweep(|name, is_dir, modified| {
            let decision = classify_entry(name, is_dir, modified, now, &self.policy);
            debug!(file = name, ?decision, "purge decision");
            decision.should_delete()
        });
        debug!(
            scanned = report.scanned,
            deleted = report.deleted.len(),
            "cache purge complete"
        );
        report
    }

    /// Delete every cached archive file, keeping the reserved file and subdirectories.
    pub fn clear(&self) -> PurgeReport {
        info!(path = %self.root.display(), "clearing cache");
        self.sweep(|name, is_dir, _| !is_dir && name != self.policy.reserved_file)
    }

    fn sweep<F>(&self, mut should_delete: F) -> PurgeReport
    where
        F: FnMut(&str, bool, Option<SystemTime>) -> bool,
    {
        let mut report = PurgeReport::default();

        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(error) => {
                warn!(path = %self.root.display(), %error, "unable to scan cache directory");
                return report;
            }
        };

        for entry in entries.flatten() {
            report.scanned += 1;
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();
            let metadata = entry.metadata().ok();
            let is_dir = metadata.as_ref().is_some_and(|meta| meta.is_dir());
            let modified = metadata.as_ref().and_then(|meta| meta.modified().ok());

            if !should_delete(&name, is_dir, modified) {
                report.retained += 1;
                continue;
            }

            match fs::remove_file(&path) {
                Ok(()) => {
                    info!(path = %path.display(), "deleted cache file");
                    report.deleted.push(path);
                }
                Err(error) => {
                    warn!(path = %path.display(), %error, "error deleting cache file");
                    report.failed.push(PurgeFailure {
                        path,
                        error: error.to_string(),
                    });
                }
            }
        }

        report
    }
}
