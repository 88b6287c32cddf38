//! Per-source availability tracking and background health probing.
//!
//! Flags are plain atomics shared across requests: a failed call marks its
//! source down, the background probe brings it back. Writers may race and
//! the flags may be momentarily stale; the worst case is one extra doomed
//! remote attempt, which the tier walk absorbs.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use super::sources::ResponseSource;

/// Availability flags for the configured response sources.
#[derive(Debug)]
pub struct AvailabilityRegistry {
    flags: HashMap<&'static str, AtomicBool>,
}

impl AvailabilityRegistry {
    /// Create a registry with every listed source in the given initial state.
    pub fn new(sources: &[(&'static str, bool)]) -> Self {
        let flags = sources
            .iter()
            .map(|(id, up)| (*id, AtomicBool::new(*up)))
            .collect();
        Self { flags }
    }

    /// Whether a source is currently considered available.
    ///
    /// Unknown ids report available; the tier walk discovers the truth on
    /// the next call.
    pub fn is_up(&self, id: &str) -> bool {
        self.flags
            .get(id)
            .map(|f| f.load(Ordering::Relaxed))
            .unwrap_or(true)
    }

    /// Mark a source unavailable after a failed call.
    pub fn mark_down(&self, id: &str) {
        if let Some(flag) = self.flags.get(id) {
            if flag.swap(false, Ordering::Relaxed) {
                info!(source = id, "Response source marked unavailable");
            }
        }
    }

    /// Mark a source available again after a successful probe.
    pub fn mark_up(&self, id: &str) {
        if let Some(flag) = self.flags.get(id) {
            if !flag.swap(true, Ordering::Relaxed) {
                info!(source = id, "Response source available again");
            }
        }
    }
}

/// Handle for stopping the background health probe
pub struct ProbeHandle {
    shutdown_tx: tokio::sync::watch::Sender<bool>,
}

impl ProbeHandle {
    /// Signal the probe task to shut down
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }
}

/// Spawn the background health probe.
///
/// Runs one pass immediately, then re-probes every `interval`. Only sources
/// currently marked down are probed, so a healthy source costs nothing. A
/// failed call therefore disables a source for at most one interval.
pub fn spawn_health_probe(
    sources: Vec<Arc<dyn ResponseSource>>,
    registry: Arc<AvailabilityRegistry>,
    interval: Duration,
) -> ProbeHandle {
    let (shutdown_tx, mut shutdown_rx) = tokio::sync::watch::channel(false);

    tokio::spawn(async move {
        info!(interval_s = interval.as_secs(), "Health probe started");

        loop {
            for source in &sources {
                if !source.enabled() || registry.is_up(source.id()) {
                    continue;
                }
                if source.probe().await {
                    registry.mark_up(source.id());
                } else {
                    debug!(source = source.id(), "Health probe: still down");
                }
            }

            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                _ = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        info!("Health probe received shutdown signal");
                        break;
                    }
                }
            }
        }

        info!("Health probe stopped");
    });

    ProbeHandle { shutdown_tx }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_initial_state() {
        let registry = AvailabilityRegistry::new(&[("groq", true), ("local_ml", false)]);
        assert!(registry.is_up("groq"));
        assert!(!registry.is_up("local_ml"));
    }

    #[test]
    fn test_mark_down_and_up() {
        let registry = AvailabilityRegistry::new(&[("groq", true)]);

        registry.mark_down("groq");
        assert!(!registry.is_up("groq"));

        registry.mark_up("groq");
        assert!(registry.is_up("groq"));
    }

    #[test]
    fn test_unknown_source_reports_up() {
        let registry = AvailabilityRegistry::new(&[("groq", true)]);
        assert!(registry.is_up("nonexistent"));
        // Marking an unknown id is a no-op, not a panic
        registry.mark_down("nonexistent");
        assert!(registry.is_up("nonexistent"));
    }
}
