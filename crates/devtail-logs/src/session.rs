//! Session directory lifecycle
//!
//! A session is one timestamped directory under the log root holding every
//! log file from one development run. The newest session is always reachable
//! through the relative `latest` symlink, and old sessions are pruned by
//! count, oldest first.

use chrono::Utc;
use devtail_core::{Error, Options, Result, LATEST_LINK};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// An active session: its directory and the primary (browser producer) log.
#[derive(Debug, Clone)]
pub struct Session {
    pub dir: PathBuf,
    pub primary_log: PathBuf,
}

/// Owns session creation, joining, the `latest` pointer, and pruning.
pub struct SessionManager {
    options: Options,
}

impl SessionManager {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    /// The log root for a project (`<project_root>/<log_dir>`).
    pub fn log_root(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.options.log_dir)
    }

    /// Create a fresh session: a uniquely named directory, the `latest`
    /// pointer swapped to it, old sessions pruned, and an empty primary log
    /// file. Filesystem failures here are fatal.
    pub fn create_session(&self, project_root: &Path) -> Result<Session> {
        let log_root = self.log_root(project_root);

        // Uniqueness rests on the existence check, re-done every iteration;
        // the counter only varies the candidate name.
        let mut name = session_name();
        let mut dir = log_root.join(&name);
        let mut counter: u32 = 0;
        while dir.exists() {
            counter += 1;
            name = format!("{}-{}", session_name(), counter);
            dir = log_root.join(&name);
        }

        std::fs::create_dir_all(&dir)?;
        self.update_latest_link(&log_root, &name)?;
        self.prune(&log_root);

        let primary_log = dir.join(&self.options.log_file_name);
        std::fs::write(&primary_log, "")?;

        if self.options.warn_on_missing_gitignore {
            self.check_gitignore(project_root);
        }

        debug!("Created session {}", dir.display());
        Ok(Session { dir, primary_log })
    }

    /// Dereference `latest`; if it points at an existing directory, join that
    /// session. Otherwise fall back to creating a new one.
    pub fn resolve_or_create(&self, project_root: &Path) -> Result<Session> {
        let log_root = self.log_root(project_root);
        let link = log_root.join(LATEST_LINK);
        if let Ok(real) = std::fs::canonicalize(&link) {
            if real.is_dir() {
                debug!("Joining existing session {}", real.display());
                return self.join_session(&real);
            }
        }
        self.create_session(project_root)
    }

    /// Join a session directory known to exist (e.g. propagated through a
    /// child's environment). Ensures the primary log file exists without ever
    /// truncating it, so joining is idempotent.
    pub fn join_session(&self, session_dir: &Path) -> Result<Session> {
        if !session_dir.is_dir() {
            return Err(Error::SessionNotFound(session_dir.to_path_buf()));
        }
        let primary_log = session_dir.join(&self.options.log_file_name);
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&primary_log)?;
        Ok(Session {
            dir: session_dir.to_path_buf(),
            primary_log,
        })
    }

    /// Remove the oldest session directories beyond `max_sessions`.
    /// Best-effort: one failed removal is reported and the rest continue.
    /// Returns the names of the sessions actually removed.
    pub fn prune(&self, log_root: &Path) -> Vec<String> {
        let entries = match std::fs::read_dir(log_root) {
            Ok(entries) => entries,
            // Log root may not exist yet
            Err(_) => return Vec::new(),
        };

        let mut names: Vec<String> = entries
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
            .filter_map(|e| e.file_name().into_string().ok())
            .filter(|n| n != LATEST_LINK)
            .collect();
        names.sort();

        let excess = names.len().saturating_sub(self.options.max_sessions);
        let mut pruned = Vec::new();
        for name in names.into_iter().take(excess) {
            match std::fs::remove_dir_all(log_root.join(&name)) {
                Ok(()) => {
                    info!("Pruned old session: {}", name);
                    pruned.push(name);
                }
                Err(e) => warn!("Failed to prune session {}: {}", name, e),
            }
        }
        pruned
    }

    /// Warn if the log directory is not covered by the project's .gitignore.
    /// Never fatal, never blocks session creation.
    pub fn check_gitignore(&self, project_root: &Path) {
        let log_dir = &self.options.log_dir;
        match std::fs::read_to_string(project_root.join(".gitignore")) {
            Ok(content) => {
                if !gitignore_covers(&content, log_dir) {
                    warn!(
                        "\"{}\" is not in your .gitignore. Add \"{}/\" to avoid committing log files",
                        log_dir, log_dir
                    );
                }
            }
            Err(_) => {
                warn!(
                    "No .gitignore found. Consider adding one with \"{}/\" to avoid committing log files",
                    log_dir
                );
            }
        }
    }

    fn update_latest_link(&self, log_root: &Path, session_name: &str) -> Result<()> {
        let link = log_root.join(LATEST_LINK);
        match std::fs::remove_file(&link) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        // Relative target keeps the log root relocatable
        symlink_dir(Path::new(session_name), &link)?;
        Ok(())
    }
}

/// Lexicographically-sortable session name derived from the current instant,
/// with `:` and `.` replaced so it is filesystem-safe.
fn session_name() -> String {
    Utc::now().format("%Y-%m-%dT%H-%M-%S-%3fZ").to_string()
}

/// True if any prefix of `log_dir`'s path components appears as a literal
/// line in the gitignore content (with or without leading/trailing slashes).
pub fn gitignore_covers(content: &str, log_dir: &str) -> bool {
    let lines: Vec<&str> = content.lines().map(|l| l.trim()).collect();
    let parts: Vec<&str> = log_dir.split('/').collect();
    for i in 1..=parts.len() {
        let prefix = parts[..i].join("/");
        let variants = [
            prefix.clone(),
            format!("{}/", prefix),
            format!("/{}", prefix),
            format!("/{}/", prefix),
        ];
        if variants.iter().any(|v| lines.contains(&v.as_str())) {
            return true;
        }
    }
    false
}

#[cfg(unix)]
fn symlink_dir(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink_dir(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_dir(target, link)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager() -> SessionManager {
        SessionManager::new(Options::default())
    }

    fn manager_with(f: impl FnOnce(&mut Options)) -> SessionManager {
        let mut options = Options::default();
        f(&mut options);
        SessionManager::new(options)
    }

    #[test]
    fn test_create_session_layout() {
        let root = TempDir::new().unwrap();
        let session = manager().create_session(root.path()).unwrap();

        assert!(session.dir.is_dir());
        assert!(session.primary_log.is_file());
        assert_eq!(std::fs::read_to_string(&session.primary_log).unwrap(), "");
        assert!(session.dir.starts_with(root.path().join("tmp/logs")));
    }

    #[test]
    fn test_session_name_is_filesystem_safe() {
        let name = session_name();
        assert!(!name.contains(':'));
        assert!(!name.contains('.'));
        assert!(name.ends_with('Z'));
    }

    #[test]
    fn test_latest_points_at_newest_session() {
        let root = TempDir::new().unwrap();
        let mgr = manager();

        let first = mgr.create_session(root.path()).unwrap();
        let second = mgr.create_session(root.path()).unwrap();

        let link = mgr.log_root(root.path()).join(LATEST_LINK);
        assert!(std::fs::symlink_metadata(&link).unwrap().file_type().is_symlink());

        // Relative target, resolving to the second session
        let target = std::fs::read_link(&link).unwrap();
        assert!(target.is_relative());
        let resolved = std::fs::canonicalize(&link).unwrap();
        assert_eq!(resolved, std::fs::canonicalize(&second.dir).unwrap());
        assert_ne!(first.dir, second.dir);
    }

    #[test]
    fn test_rapid_creation_yields_distinct_sessions() {
        let root = TempDir::new().unwrap();
        let mgr = manager();

        let dirs: Vec<PathBuf> = (0..3)
            .map(|_| mgr.create_session(root.path()).unwrap().dir)
            .collect();

        assert_ne!(dirs[0], dirs[1]);
        assert_ne!(dirs[1], dirs[2]);
        assert!(dirs.iter().all(|d| d.is_dir()));
    }

    #[test]
    fn test_prune_keeps_newest() {
        let root = TempDir::new().unwrap();
        let mgr = manager_with(|o| o.max_sessions = 3);
        let log_root = mgr.log_root(root.path());
        std::fs::create_dir_all(&log_root).unwrap();
        for i in 1..=5 {
            std::fs::create_dir(log_root.join(format!("2024-01-0{}T00-00-00-000Z", i))).unwrap();
        }

        let pruned = mgr.prune(&log_root);

        assert_eq!(
            pruned,
            vec![
                "2024-01-01T00-00-00-000Z".to_string(),
                "2024-01-02T00-00-00-000Z".to_string()
            ]
        );
        assert!(!log_root.join("2024-01-01T00-00-00-000Z").exists());
        assert!(log_root.join("2024-01-05T00-00-00-000Z").exists());
    }

    #[test]
    fn test_prune_ignores_latest_link() {
        let root = TempDir::new().unwrap();
        let mgr = manager_with(|o| o.max_sessions = 1);

        mgr.create_session(root.path()).unwrap();
        let session = mgr.create_session(root.path()).unwrap();
        let log_root = mgr.log_root(root.path());

        mgr.prune(&log_root);

        let link = log_root.join(LATEST_LINK);
        assert!(std::fs::symlink_metadata(&link).is_ok());
        assert!(session.dir.exists());
    }

    #[test]
    fn test_prune_missing_log_root_is_noop() {
        let root = TempDir::new().unwrap();
        let pruned = manager().prune(&root.path().join("does/not/exist"));
        assert!(pruned.is_empty());
    }

    #[test]
    fn test_create_session_prunes_old_ones() {
        let root = TempDir::new().unwrap();
        let mgr = manager_with(|o| o.max_sessions = 2);

        for _ in 0..4 {
            mgr.create_session(root.path()).unwrap();
        }

        let log_root = mgr.log_root(root.path());
        let dirs: Vec<_> = std::fs::read_dir(&log_root)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
            .collect();
        assert_eq!(dirs.len(), 2);
    }

    #[test]
    fn test_resolve_or_create_joins_existing() {
        let root = TempDir::new().unwrap();
        let mgr = manager();

        let created = mgr.create_session(root.path()).unwrap();
        let resolved = mgr.resolve_or_create(root.path()).unwrap();

        assert_eq!(
            std::fs::canonicalize(&resolved.dir).unwrap(),
            std::fs::canonicalize(&created.dir).unwrap()
        );
    }

    #[test]
    fn test_resolve_or_create_without_latest_creates() {
        let root = TempDir::new().unwrap();
        let session = manager().resolve_or_create(root.path()).unwrap();
        assert!(session.dir.is_dir());
        assert!(session.primary_log.is_file());
    }

    #[test]
    fn test_join_session_is_idempotent() {
        let root = TempDir::new().unwrap();
        let mgr = manager();
        let created = mgr.create_session(root.path()).unwrap();

        std::fs::write(&created.primary_log, "existing content\n").unwrap();

        let joined = mgr.join_session(&created.dir).unwrap();
        let joined_again = mgr.join_session(&created.dir).unwrap();

        assert_eq!(joined.primary_log, joined_again.primary_log);
        assert_eq!(
            std::fs::read_to_string(&joined.primary_log).unwrap(),
            "existing content\n"
        );
    }

    #[test]
    fn test_join_session_missing_dir_fails() {
        let root = TempDir::new().unwrap();
        let result = manager().join_session(&root.path().join("nope"));
        assert!(matches!(result, Err(Error::SessionNotFound(_))));
    }

    #[test]
    fn test_gitignore_covers_variants() {
        assert!(gitignore_covers("node_modules\ntmp/logs\n", "tmp/logs"));
        assert!(gitignore_covers("tmp/logs/\n", "tmp/logs"));
        assert!(gitignore_covers("/tmp/logs\n", "tmp/logs"));
        assert!(gitignore_covers("/tmp/logs/\n", "tmp/logs"));
        // A prefix component covers the whole subtree
        assert!(gitignore_covers("tmp\n", "tmp/logs"));
        assert!(!gitignore_covers("node_modules\n", "tmp/logs"));
        assert!(!gitignore_covers("", "tmp/logs"));
    }
}
