// Signal handling module
//
// Supported signals:
// - SIGINT:  Graceful shutdown (Ctrl+C)
// - SIGTERM: Graceful shutdown
// Other platforms only get Ctrl+C.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

use crate::error::{Error, Result};

/// Shutdown request shared between the signal task and the accept loop
#[derive(Clone, Default)]
pub struct ShutdownSignal {
    notify: Arc<Notify>,
    requested: Arc<AtomicBool>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request shutdown; wakes the accept loop even if it is not waiting yet
    pub fn trigger(&self) {
        self.requested.store(true, Ordering::SeqCst);
        self.notify.notify_one();
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    /// Wait until shutdown is requested
    pub async fn wait(&self) {
        while !self.is_requested() {
            self.notify.notified().await;
        }
    }
}

/// Start signal handlers (Unix only)
///
/// Handlers are registered before this returns, so a signal arriving right
/// after startup is not lost. The listening task runs in the background.
#[cfg(unix)]
pub fn listen(shutdown: &ShutdownSignal) -> Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt()).map_err(Error::Signal)?;
    let mut sigterm = signal(SignalKind::terminate()).map_err(Error::Signal)?;
    let shutdown = shutdown.clone();

    tokio::spawn(async move {
        tokio::select! {
            _ = sigint.recv() => {}
            _ = sigterm.recv() => {}
        }
        shutdown.trigger();
    });
    Ok(())
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn listen(shutdown: &ShutdownSignal) -> Result<()> {
    let shutdown = shutdown.clone();

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => shutdown.trigger(),
            Err(e) => crate::logger::log_error(&format!("{}", Error::Signal(e))),
        }
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_trigger_before_wait() {
        let shutdown = ShutdownSignal::new();
        assert!(!shutdown.is_requested());
        shutdown.trigger();
        assert!(shutdown.is_requested());
        tokio::time::timeout(Duration::from_secs(1), shutdown.wait())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let shutdown = ShutdownSignal::new();
        let waiter = shutdown.clone();
        let handle = tokio::spawn(async move { waiter.wait().await });
        tokio::task::yield_now().await;
        shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
    }
}
