use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Bursts of filesystem events closer together than this collapse into one reload.
const DEBOUNCE: Duration = Duration::from_millis(250);

/// Watches the dashboard config file and signals once per burst of changes.
///
/// The parent directory is watched rather than the file itself so that
/// editors which save by rename-and-replace are still picked up. Dropping
/// the handle stops the watch.
///
/// # Example
/// ```no_run
/// # async fn demo() {
/// let (_watcher, mut rx) = fabwatch_config::ConfigWatcher::spawn("/etc/fabwatch/fabwatch.toml");
/// while rx.recv().await.is_some() {
///     println!("config changed, reloading");
/// }
/// # }
/// ```
#[derive(Debug)]
pub struct ConfigWatcher {
    task: JoinHandle<()>,
}

impl ConfigWatcher {
    /// Spawn a filesystem watcher for `path`.
    /// Returns the watcher handle and a receiver that fires on every detected change.
    pub fn spawn(path: impl AsRef<Path>) -> (Self, mpsc::Receiver<()>) {
        let (tx, rx) = mpsc::channel(1);
        let task = tokio::spawn(watch_loop(path.as_ref().to_path_buf(), tx));
        (Self { task }, rx)
    }
}

impl Drop for ConfigWatcher {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn watch_loop(path: PathBuf, tx: mpsc::Sender<()>) {
    use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

    let (event_tx, mut event_rx) = mpsc::channel::<notify::Result<Event>>(16);

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = event_tx.blocking_send(res);
        },
        Config::default().with_poll_interval(Duration::from_secs(2)),
    ) {
        Ok(w) => w,
        Err(e) => {
            error!("Failed to create filesystem watcher: {e}");
            return;
        }
    };

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };

    if let Err(e) = watcher.watch(&dir, RecursiveMode::NonRecursive) {
        warn!("Cannot watch '{}': {e}; live reload disabled", dir.display());
        return;
    }

    info!("Watching config file: {}", path.display());

    while let Some(event) = event_rx.recv().await {
        match event {
            Ok(e) if touches_config(&e, &path) => {
                // Swallow the rest of the burst before notifying.
                tokio::time::sleep(DEBOUNCE).await;
                while event_rx.try_recv().is_ok() {}

                debug!("Config change detected");
                if tx.send(()).await.is_err() {
                    break; // receiver dropped
                }
            }
            Ok(_) => {}
            Err(e) => warn!("Watcher error: {e}"),
        }
    }
}

fn touches_config(event: &notify::Event, path: &Path) -> bool {
    use notify::EventKind::{Create, Modify};

    matches!(event.kind, Modify(_) | Create(_))
        && event
            .paths
            .iter()
            .any(|p| p.file_name() == path.file_name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, ModifyKind};
    use notify::{Event, EventKind};

    #[test]
    fn only_writes_to_the_config_file_count() {
        let path = Path::new("/etc/fabwatch/fabwatch.toml");

        let write = Event::new(EventKind::Modify(ModifyKind::Any)).add_path(path.to_path_buf());
        let replace = Event::new(EventKind::Create(CreateKind::File))
            .add_path(PathBuf::from("/etc/fabwatch/fabwatch.toml"));
        let sibling = Event::new(EventKind::Modify(ModifyKind::Any))
            .add_path(PathBuf::from("/etc/fabwatch/other.toml"));
        let read = Event::new(EventKind::Access(AccessKind::Any)).add_path(path.to_path_buf());

        assert!(touches_config(&write, path));
        assert!(touches_config(&replace, path));
        assert!(!touches_config(&sibling, path));
        assert!(!touches_config(&read, path));
    }

    #[tokio::test]
    async fn dropping_the_handle_closes_the_channel() {
        let dir = std::env::temp_dir();
        let (watcher, mut rx) = ConfigWatcher::spawn(dir.join("fabwatch-drop-test.toml"));
        drop(watcher);

        let closed = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await;
        assert_eq!(closed, Ok(None));
    }
}
