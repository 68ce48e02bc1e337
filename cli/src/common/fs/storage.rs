//! # appfs Storage Location Resolution
//!
//! File: cli/src/common/fs/storage.rs
//!
//! ## Overview
//!
//! Resolves the directory an application should write its files to. External
//! media (a removable card, a USB stick, a second disk) is preferred whenever it
//! counts as available; otherwise the internal files directory is used.
//!
//! ## Architecture
//!
//! - **`AppContext`**: what the resolver needs to know about the host: the
//!   external files directory (may be unavailable), the internal files directory
//!   (always available), the external storage state and whether that storage is
//!   removable.
//! - **`StorageState`**: the reported state of external storage.
//! - **`DesktopContext`**: an `AppContext` built from `StorageConfig`, probing the
//!   configured media root on every query. A root only counts as `Mounted` when a
//!   scratch file can actually be created in it, so a filesystem mounted
//!   read-only is reported as `MountedReadOnly` whatever its mode bits say.
//! - **`FileUtils::is_external_media_available`** and **`FileUtils::get_files_dir`**.
//!
//! Availability is `state == Mounted || !removable`. Built-in storage that cannot
//! be removed counts as available even when it is not reported as mounted. In that
//! case the context may have no external directory to offer; the resolver logs a
//! `StorageUnavailable` error and falls back to the internal directory.
//!
//! ## Usage
//!
//! ```rust
//! let cfg = config::load_config(None)?;
//! let ctx = DesktopContext::from_config(&cfg.storage);
//! let utils: FileUtils = FileUtils::default();
//! let dir = utils.get_files_dir(&ctx);
//! utils.write_txt_to_file("started", &dir, "events.log");
//! ```
//!
use crate::common::diagnostics::DiagnosticSink;
use crate::common::fs::io::FileUtils;
use crate::core::config::StorageConfig;
use crate::core::error::AppfsError;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name prefix of the scratch file used to test write access on the media root.
const WRITE_CHECK_PREFIX: &str = ".appfs-write-check";

/// State of the external storage as reported by an [`AppContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageState {
    /// Present with read/write access.
    Mounted,
    /// Present, read-only.
    MountedReadOnly,
    /// Known but not currently present.
    Unmounted,
    /// No external storage configured at all.
    Removed,
}

impl fmt::Display for StorageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StorageState::Mounted => "mounted",
            StorageState::MountedReadOnly => "mounted_ro",
            StorageState::Unmounted => "unmounted",
            StorageState::Removed => "removed",
        };
        f.write_str(name)
    }
}

/// Host facts needed to pick an application's files directory.
pub trait AppContext {
    /// The application's directory on external storage, if the host can offer one.
    fn external_files_dir(&self) -> Option<PathBuf>;

    /// The application's internal files directory. Always available.
    fn files_dir(&self) -> PathBuf;

    fn external_storage_state(&self) -> StorageState;

    fn is_external_storage_removable(&self) -> bool;
}

/// [`AppContext`] for desktop hosts, driven by the `[storage]` configuration.
#[derive(Debug, Clone)]
pub struct DesktopContext {
    app_id: String,
    internal_dir: PathBuf,
    media_root: Option<PathBuf>,
    removable: bool,
}

impl DesktopContext {
    pub fn from_config(config: &StorageConfig) -> Self {
        DesktopContext {
            app_id: config.app_id.clone(),
            internal_dir: PathBuf::from(&config.internal_dir),
            media_root: config.external_media_root.as_ref().map(PathBuf::from),
            removable: config.removable,
        }
    }
}

impl AppContext for DesktopContext {
    fn external_files_dir(&self) -> Option<PathBuf> {
        match self.external_storage_state() {
            StorageState::Mounted | StorageState::MountedReadOnly => self
                .media_root
                .as_ref()
                .map(|root| root.join(&self.app_id)),
            StorageState::Unmounted | StorageState::Removed => None,
        }
    }

    fn files_dir(&self) -> PathBuf {
        self.internal_dir.clone()
    }

    fn external_storage_state(&self) -> StorageState {
        let Some(root) = &self.media_root else {
            return StorageState::Removed;
        };
        let state = match fs::metadata(root) {
            Ok(meta) if meta.is_dir() => {
                if meta.permissions().readonly() {
                    StorageState::MountedReadOnly
                } else {
                    // Mode bits say nothing about a read-only mount.
                    state_for_write_check(root, check_write_access(root))
                }
            }
            // Missing, unreadable, or not a directory.
            _ => StorageState::Unmounted,
        };
        debug!("External media root {} is {}", root.display(), state);
        state
    }

    fn is_external_storage_removable(&self) -> bool {
        self.removable
    }
}

/// Creates and removes a scratch file under `root`.
fn check_write_access(root: &Path) -> io::Result<()> {
    let scratch = tempfile::Builder::new()
        .prefix(WRITE_CHECK_PREFIX)
        .tempfile_in(root)?;
    scratch.close()
}

/// A present root is `Mounted` only if the write check passed.
fn state_for_write_check(root: &Path, result: io::Result<()>) -> StorageState {
    match result {
        Ok(()) => StorageState::Mounted,
        Err(err) => {
            // EROFS, EACCES, ENOSPC and the like: present but not writable.
            debug!("External media root {} is not writable: {}", root.display(), err);
            StorageState::MountedReadOnly
        }
    }
}

impl<D: DiagnosticSink> FileUtils<D> {
    /// True when external storage is mounted read/write, or cannot be removed.
    pub fn is_external_media_available(&self, ctx: &impl AppContext) -> bool {
        ctx.external_storage_state() == StorageState::Mounted
            || !ctx.is_external_storage_removable()
    }

    /// Returns the absolute directory the application should store files in.
    ///
    /// Prefers the external files directory when external media is available. If the
    /// context reports none in that case, the `StorageUnavailable` error goes to the
    /// sink and the internal directory is returned instead.
    pub fn get_files_dir(&self, ctx: &impl AppContext) -> PathBuf {
        if self.is_external_media_available(ctx) {
            match ctx.external_files_dir() {
                Some(dir) => return absolute_path(dir),
                None => {
                    let err = AppfsError::StorageUnavailable {
                        reason: format!(
                            "external media counts as available (state: {}, removable: {}) but no external files directory was reported",
                            ctx.external_storage_state(),
                            ctx.is_external_storage_removable()
                        ),
                    };
                    self.sink()
                        .error("get files dir exception, using internal storage", Some(&err));
                }
            }
        }
        absolute_path(ctx.files_dir())
    }
}

/// Anchors relative paths at the current directory, without touching the filesystem.
fn absolute_path(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    std::path::absolute(Path::new(&path)).unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::diagnostics::RecordingSink;
    use tempfile::tempdir;
    use tracing::Level;

    /// Fixed answers for every `AppContext` query.
    struct StaticContext {
        external: Option<PathBuf>,
        internal: PathBuf,
        state: StorageState,
        removable: bool,
    }

    impl StaticContext {
        fn new(state: StorageState, removable: bool) -> Self {
            StaticContext {
                external: Some(PathBuf::from("/media/card/app")),
                internal: PathBuf::from("/data/app/files"),
                state,
                removable,
            }
        }
    }

    impl AppContext for StaticContext {
        fn external_files_dir(&self) -> Option<PathBuf> {
            self.external.clone()
        }
        fn files_dir(&self) -> PathBuf {
            self.internal.clone()
        }
        fn external_storage_state(&self) -> StorageState {
            self.state
        }
        fn is_external_storage_removable(&self) -> bool {
            self.removable
        }
    }

    #[test]
    fn test_media_availability_truth_table() {
        let utils = FileUtils::new(RecordingSink::default());
        let cases = [
            (StorageState::Mounted, true, true),
            (StorageState::Mounted, false, true),
            (StorageState::Unmounted, false, true), // Built-in storage still counts.
            (StorageState::Unmounted, true, false),
        ];
        for (state, removable, expected) in cases {
            let ctx = StaticContext::new(state, removable);
            assert_eq!(
                utils.is_external_media_available(&ctx),
                expected,
                "state={state} removable={removable}"
            );
        }
    }

    #[test]
    fn test_read_only_removable_media_is_not_available() {
        let utils = FileUtils::new(RecordingSink::default());
        let ctx = StaticContext::new(StorageState::MountedReadOnly, true);
        assert!(!utils.is_external_media_available(&ctx));
    }

    #[test]
    fn test_get_files_dir_prefers_external() {
        let sink = RecordingSink::default();
        let utils = FileUtils::new(&sink);
        let ctx = StaticContext::new(StorageState::Mounted, true);

        assert_eq!(utils.get_files_dir(&ctx), PathBuf::from("/media/card/app"));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_get_files_dir_uses_internal_when_unavailable() {
        let sink = RecordingSink::default();
        let utils = FileUtils::new(&sink);
        let ctx = StaticContext::new(StorageState::Removed, true);

        assert_eq!(utils.get_files_dir(&ctx), PathBuf::from("/data/app/files"));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_get_files_dir_falls_back_when_external_missing() {
        let sink = RecordingSink::default();
        let utils = FileUtils::new(&sink);
        let mut ctx = StaticContext::new(StorageState::Unmounted, false);
        ctx.external = None;

        assert_eq!(utils.get_files_dir(&ctx), PathBuf::from("/data/app/files"));
        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, Level::ERROR);
        assert!(records[0]
            .error
            .as_deref()
            .unwrap()
            .starts_with("External storage unavailable"));
    }

    #[test]
    fn test_get_files_dir_makes_relative_paths_absolute() {
        let utils = FileUtils::new(RecordingSink::default());
        let mut ctx = StaticContext::new(StorageState::Removed, true);
        ctx.internal = PathBuf::from("relative/files");

        let dir = utils.get_files_dir(&ctx);
        assert!(dir.is_absolute());
        assert!(dir.ends_with("relative/files"));
    }

    fn desktop(media_root: Option<&Path>, removable: bool) -> DesktopContext {
        DesktopContext::from_config(&StorageConfig {
            app_id: "demo".into(),
            internal_dir: "/var/lib/demo".into(),
            external_media_root: media_root.map(|p| p.to_string_lossy().into_owned()),
            removable,
        })
    }

    #[test]
    fn test_desktop_context_checks_media_root() {
        let temp = tempdir().unwrap();

        let mounted = desktop(Some(temp.path()), true);
        assert_eq!(mounted.external_storage_state(), StorageState::Mounted);
        assert_eq!(mounted.external_files_dir(), Some(temp.path().join("demo")));

        let unmounted = desktop(Some(&temp.path().join("not-plugged-in")), true);
        assert_eq!(unmounted.external_storage_state(), StorageState::Unmounted);
        assert_eq!(unmounted.external_files_dir(), None);

        let absent = desktop(None, true);
        assert_eq!(absent.external_storage_state(), StorageState::Removed);
        assert_eq!(absent.files_dir(), PathBuf::from("/var/lib/demo"));
    }

    #[test]
    fn test_write_check_failure_means_read_only() {
        let root = Path::new("/media/card");
        assert_eq!(state_for_write_check(root, Ok(())), StorageState::Mounted);
        assert_eq!(
            state_for_write_check(root, Err(io::Error::from(io::ErrorKind::PermissionDenied))),
            StorageState::MountedReadOnly
        );
    }

    /// EROFS is what a read-only mount returns even when the root is mode 0755.
    #[cfg(target_os = "linux")]
    #[test]
    fn test_read_only_filesystem_error_means_read_only() {
        let erofs = io::Error::from_raw_os_error(30);
        assert_eq!(
            state_for_write_check(Path::new("/media/card"), Err(erofs)),
            StorageState::MountedReadOnly
        );
    }

    /// The write check leaves no scratch file behind on a writable root.
    #[test]
    fn test_write_check_cleans_up() {
        let temp = tempdir().unwrap();
        check_write_access(temp.path()).expect("temp dir should be writable");
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    /// A root that cannot be written to is not reported as mounted, and offers no
    /// external directory to `get_files_dir` when the media is removable.
    #[cfg(unix)]
    #[test]
    fn test_desktop_context_unwritable_root_is_read_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempdir().unwrap();
        let root = temp.path().join("card");
        fs::create_dir(&root).unwrap();
        fs::set_permissions(&root, fs::Permissions::from_mode(0o555)).unwrap();

        // Privileged users write through mode bits; nothing to check then.
        let privileged = check_write_access(&root).is_ok();
        if !privileged {
            let ctx = desktop(Some(&root), true);
            assert_eq!(ctx.external_storage_state(), StorageState::MountedReadOnly);

            let sink = RecordingSink::default();
            let utils = FileUtils::new(&sink);
            assert!(!utils.is_external_media_available(&ctx));
            assert_eq!(utils.get_files_dir(&ctx), PathBuf::from("/var/lib/demo"));
        }

        fs::set_permissions(&root, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[test]
    fn test_desktop_context_non_removable_without_media_falls_back() {
        let sink = RecordingSink::default();
        let utils = FileUtils::new(&sink);
        let ctx = desktop(None, false);

        assert!(utils.is_external_media_available(&ctx));
        assert_eq!(utils.get_files_dir(&ctx), PathBuf::from("/var/lib/demo"));
        assert_eq!(sink.count(Level::ERROR), 1);
    }

    /// The default-sink form used in the module docs resolves to `TracingSink`.
    #[test]
    fn test_default_file_utils_resolves_files_dir() {
        let utils: FileUtils = FileUtils::default();
        let ctx = desktop(None, true);

        assert!(!utils.is_external_media_available(&ctx));
        assert_eq!(utils.get_files_dir(&ctx), PathBuf::from("/var/lib/demo"));
    }
}
