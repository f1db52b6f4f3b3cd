//! Settle-once completion signal
//!
//! The controller keeps the [`CompletionSignal`]; callers hold any number of
//! [`Completion`] handles and may await them.

use tokio::sync::watch;

/// Writer side, owned by the controller
#[derive(Debug)]
pub struct CompletionSignal {
    tx: watch::Sender<bool>,
}

impl CompletionSignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    /// Settle the signal. Returns `true` only for the call that settled it.
    pub fn settle(&self) -> bool {
        // send_replace works with no live receivers, so later subscribers
        // still observe the settled value
        !self.tx.send_replace(true)
    }

    pub fn is_settled(&self) -> bool {
        *self.tx.borrow()
    }

    /// New handle for awaiting the signal
    pub fn subscribe(&self) -> Completion {
        Completion {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for CompletionSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Reader side: resolves when the animation finishes or is stopped
#[derive(Debug, Clone)]
pub struct Completion {
    rx: watch::Receiver<bool>,
}

impl Completion {
    pub fn is_settled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Wait until the signal settles.
    ///
    /// Also returns if the controller is dropped first, since nothing can
    /// settle it after that.
    pub async fn wait(&mut self) {
        let _ = self.rx.wait_for(|settled| *settled).await;
    }
}
