//! Run blocking work on a background thread that an abort signal can abandon.

use std::sync::mpsc;
use std::thread;

use anyhow::{Context, Result, anyhow};

/// How a cancellable unit ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    Finished,
    /// The abort signal arrived first; the work was left running detached.
    Aborted,
}

enum Event {
    Finished(Result<()>),
    Aborted,
}

/// Handle that aborts the unit it was taken from.
#[derive(Clone)]
pub struct Canceller {
    tx: mpsc::Sender<Event>,
}

impl Canceller {
    pub fn abort(&self) {
        // The unit may already be done; nobody is listening then.
        let _ = self.tx.send(Event::Aborted);
    }
}

pub struct CancellableTask {
    tx: mpsc::Sender<Event>,
    rx: mpsc::Receiver<Event>,
}

impl Default for CancellableTask {
    fn default() -> Self {
        Self::new()
    }
}

impl CancellableTask {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    pub fn canceller(&self) -> Canceller {
        Canceller {
            tx: self.tx.clone(),
        }
    }

    /// Start `op` and wait for whichever comes first: its result or an abort.
    pub fn run<F>(self, op: F) -> Result<Completion>
    where
        F: FnOnce() -> Result<()> + Send + 'static,
    {
        let done = self.tx.clone();
        thread::Builder::new()
            .name("taskjson-worker".to_string())
            .spawn(move || {
                // Outstanding cancellers keep the channel open, so a panic must still report.
                let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(op))
                    .unwrap_or_else(|_| Err(anyhow!("worker thread panicked")));
                let _ = done.send(Event::Finished(result));
            })
            .context("spawn worker thread")?;
        drop(self.tx);

        match self.rx.recv() {
            Ok(Event::Finished(result)) => result.map(|()| Completion::Finished),
            Ok(Event::Aborted) => Ok(Completion::Aborted),
            Err(_) => Err(anyhow!("worker thread exited without a result")),
        }
    }
}

/// Abort through `canceller` on Ctrl-C, or SIGTERM on unix.
pub fn abort_on_signal(canceller: Canceller) {
    let spawned = thread::Builder::new()
        .name("taskjson-signal".to_string())
        .spawn(move || {
            let rt = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(err) => {
                    tracing::warn!("signal listener unavailable: {}", err);
                    return;
                }
            };
            rt.block_on(wait_for_signal());
            tracing::info!("received abort signal, stopping");
            canceller.abort();
        });
    if let Err(err) = spawned {
        tracing::warn!("signal listener unavailable: {}", err);
    }
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    let Ok(mut term) = signal(SignalKind::terminate()) else {
        let _ = tokio::signal::ctrl_c().await;
        return;
    };
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = term.recv() => {}
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

#[cfg(test)]
#[path = "tests/cancel_tests.rs"]
mod tests;
