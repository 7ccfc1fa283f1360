//! Incremental invalidation driven by filesystem events.

use autocomp_fs::NormalizedPath;
use notify::event::{ModifyKind, RenameMode};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::Result;
use crate::config::ResolvedOptions;
use crate::context::Context;
use crate::naming::derive_name;
use crate::session::{Update, UpdatePayload};

/// A component file appeared or disappeared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    Add(NormalizedPath),
    Unlink(NormalizedPath),
}

impl WatchEvent {
    pub fn path(&self) -> &NormalizedPath {
        match self {
            WatchEvent::Add(path) | WatchEvent::Unlink(path) => path,
        }
    }
}

impl Context {
    /// Apply one event to the registry and notify affected consumers.
    ///
    /// Paths outside the component globs are ignored. Returns `true` when
    /// the component set changed.
    pub fn handle_event(&mut self, event: WatchEvent, now: Instant) -> Result<bool> {
        if !self.options().matches_globs(event.path()) {
            tracing::trace!(path = %event.path(), "Ignoring event outside component globs");
            return Ok(false);
        }

        tracing::debug!(?event, "Component event");
        let (path, changed) = match event {
            WatchEvent::Add(path) => {
                let changed = self.add_components([path.clone()]);
                (path, changed)
            }
            WatchEvent::Unlink(path) => {
                let changed = self.remove_components([path.clone()]);
                (path, changed)
            }
        };

        self.on_update(&path, now)?;
        Ok(changed)
    }

    /// Schedule artifact regeneration and tell the live session which
    /// consumers use the component at `path`.
    pub fn on_update(&mut self, path: &NormalizedPath, now: Instant) -> Result<()> {
        self.schedule_artifacts(now)?;

        let Some(session) = self.session() else {
            return Ok(());
        };

        let name = derive_name(path, self.options());
        let timestamp = chrono::Utc::now().timestamp_millis();
        let updates: Vec<Update> = self
            .registry()
            .consumers_of(&name)
            .into_iter()
            .map(|consumer| Update::js(format!("/{}", consumer.relative_to(self.root())), timestamp))
            .collect();

        if updates.is_empty() {
            return Ok(());
        }

        tracing::debug!(%name, count = updates.len(), "Notifying live session");
        session.send(UpdatePayload::new(updates));
        Ok(())
    }

    /// Consume events until the channel closes.
    ///
    /// Parked artifact regeneration runs when its deadline passes and once
    /// more before returning. Per-event failures are logged and skipped.
    pub async fn watch(&mut self, mut events: mpsc::UnboundedReceiver<WatchEvent>) -> Result<()> {
        loop {
            let deadline = self.artifacts_deadline();
            tokio::select! {
                event = events.recv() => {
                    let Some(event) = event else { break };
                    if let Err(e) = self.handle_event(event, Instant::now()) {
                        tracing::warn!(error = %e, "Failed to handle watch event");
                    }
                }
                _ = sleep_until(deadline) => {
                    if let Err(e) = self.flush_due_artifacts(Instant::now()) {
                        tracing::warn!(error = %e, "Failed to regenerate artifacts");
                    }
                }
            }
        }

        if self.throttle_mut().flush(Instant::now()) {
            self.generate_artifacts()?;
        }
        Ok(())
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

/// Start a filesystem watcher over the component directories.
///
/// The watcher stops when the returned handle is dropped.
pub fn watch_components(
    options: &ResolvedOptions,
) -> Result<(RecommendedWatcher, mpsc::UnboundedReceiver<WatchEvent>)> {
    let (tx, rx) = mpsc::unbounded_channel();

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
        Ok(event) => {
            for event in convert_event(event) {
                let _ = tx.send(event);
            }
        }
        Err(e) => tracing::warn!(error = %e, "Watcher error"),
    })?;

    let (roots, mode) = if options.resolved_dirs.is_empty() {
        (vec![options.root.clone()], RecursiveMode::Recursive)
    } else if options.deep {
        (options.resolved_dirs.clone(), RecursiveMode::Recursive)
    } else {
        (options.resolved_dirs.clone(), RecursiveMode::NonRecursive)
    };

    for root in roots {
        if !root.is_dir() {
            tracing::warn!(%root, "Component directory does not exist, not watching");
            continue;
        }
        watcher.watch(&root.to_native(), mode)?;
        tracing::debug!(%root, "Watching component directory");
    }

    Ok((watcher, rx))
}

fn convert_event(event: Event) -> Vec<WatchEvent> {
    let paths = event.paths.iter().map(NormalizedPath::new);
    match event.kind {
        EventKind::Create(_) => paths.map(WatchEvent::Add).collect(),
        EventKind::Remove(_) => paths.map(WatchEvent::Unlink).collect(),
        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => {
            paths.map(WatchEvent::Unlink).collect()
        }
        EventKind::Modify(ModifyKind::Name(RenameMode::To)) => paths.map(WatchEvent::Add).collect(),
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) if event.paths.len() == 2 => vec![
            WatchEvent::Unlink(NormalizedPath::new(&event.paths[0])),
            WatchEvent::Add(NormalizedPath::new(&event.paths[1])),
        ],
        // Platforms that cannot tell the two sides of a rename apart
        EventKind::Modify(ModifyKind::Name(_)) => paths
            .map(|path| {
                if path.exists() {
                    WatchEvent::Add(path)
                } else {
                    WatchEvent::Unlink(path)
                }
            })
            .collect(),
        _ => Vec::new(),
    }
}
