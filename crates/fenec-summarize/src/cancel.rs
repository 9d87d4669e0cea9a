//! Cooperative cancellation for the summarization engine (§5: "accepts a
//! cancellation signal checked before each LLM call"), following the same
//! `tokio::sync::watch` split token/handle shape as `ploke-embed`'s
//! cancellation support — trimmed to the synchronous check the engine
//! actually needs between plan entries, plus an async wait for callers that
//! want to park on it.

use tokio::sync::watch;

/// Cloneable handle a caller holds to check (or wait on) cancellation.
#[derive(Clone)]
pub struct CancellationToken {
    receiver: watch::Receiver<bool>,
}

/// The counterpart used to signal cancellation; dropping it is equivalent to
/// cancelling, since a closed channel reads as "cancelled" on the token side.
pub struct CancellationHandle {
    sender: watch::Sender<bool>,
}

impl CancellationToken {
    pub fn new() -> (Self, CancellationHandle) {
        let (sender, receiver) = watch::channel(false);
        (Self { receiver }, CancellationHandle { sender })
    }

    pub fn is_cancelled(&self) -> bool {
        *self.receiver.borrow()
    }

    pub async fn cancelled(&self) {
        let mut receiver = self.receiver.clone();
        while !*receiver.borrow() {
            if receiver.changed().await.is_err() {
                return;
            }
        }
    }
}

impl CancellationHandle {
    pub fn cancel(&self) {
        let _ = self.sender.send(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn cancel_is_observed_by_every_clone() {
        let (token, handle) = CancellationToken::new();
        let other = token.clone();
        assert!(!token.is_cancelled());
        handle.cancel();
        assert!(token.is_cancelled());
        assert!(other.is_cancelled());
    }
}
