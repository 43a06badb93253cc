//! Watch mode: rebuild the sidebar when the content root changes.
//!
//! Every rebuild is a full scan. Events are coalesced until the tree has been
//! quiet for [`QUIET_PERIOD`], so an editor save that touches several files
//! triggers a single rebuild.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use notify::{EventKind, RecursiveMode, Watcher};
use tracing::{debug, warn};

use crate::error::CliError;

/// How long the tree must be quiet before rebuilding.
const QUIET_PERIOD: Duration = Duration::from_millis(200);

/// Watch `source_dir` and call `rebuild` after relevant changes.
///
/// Changes to `ignore` (the sidebar output file) never trigger a rebuild.
/// Runs until the watcher shuts down or `rebuild` fails.
pub(crate) fn watch_content_root(
    source_dir: &Path,
    ignore: Option<&Path>,
    mut rebuild: impl FnMut() -> Result<(), CliError>,
) -> Result<(), CliError> {
    let root = canonical(source_dir);
    let ignore = ignore.map(canonical);

    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        // Receiver gone means we are shutting down
        let _ = tx.send(res);
    })?;
    watcher.watch(&root, RecursiveMode::Recursive)?;

    while let Some(batch) = next_batch(&rx, &root, ignore.as_deref()) {
        if batch.relevant {
            debug!("Content root changed, rebuilding sidebar");
            rebuild()?;
        }
        if batch.closed {
            break;
        }
    }

    Ok(())
}

/// Events coalesced over one quiet period.
#[derive(Debug, PartialEq, Eq)]
struct Batch {
    /// At least one event can change the sidebar.
    relevant: bool,
    /// The watcher shut down while the batch was collected.
    closed: bool,
}

/// Wait for the next event, then absorb events until the tree is quiet.
///
/// Returns `None` if the watcher shut down before any event arrived.
fn next_batch(
    rx: &mpsc::Receiver<notify::Result<notify::Event>>,
    root: &Path,
    ignore: Option<&Path>,
) -> Option<Batch> {
    let first = rx.recv().ok()?;
    let mut batch = Batch {
        relevant: is_relevant(first, root, ignore),
        closed: false,
    };

    loop {
        match rx.recv_timeout(QUIET_PERIOD) {
            Ok(res) => batch.relevant |= is_relevant(res, root, ignore),
            Err(mpsc::RecvTimeoutError::Timeout) => break,
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                batch.closed = true;
                break;
            }
        }
    }

    Some(batch)
}

/// Check whether a watcher event can change the sidebar.
fn is_relevant(res: notify::Result<notify::Event>, root: &Path, ignore: Option<&Path>) -> bool {
    let event = match res {
        Ok(event) => event,
        Err(e) => {
            warn!(error = %e, "File watcher error");
            return false;
        }
    };

    matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) && event
        .paths
        .iter()
        .any(|path| Some(path.as_path()) != ignore && affects_sidebar(root, path))
}

/// Only sections and the files directly inside them show up in the sidebar.
fn affects_sidebar(root: &Path, path: &Path) -> bool {
    path.strip_prefix(root)
        .is_ok_and(|rel| (1..=2).contains(&rel.components().count()))
}

/// Canonicalize a path, falling back to the path itself.
fn canonical(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
