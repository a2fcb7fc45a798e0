//! Single-shot completions
//!
//! Turns the error/reply handler pair taken by [`Proxy`](crate::proxy::Proxy)
//! into a value the caller can block on. Backed by a one-slot channel: the
//! first handler to run delivers the result and the other one becomes a
//! no-op.
//!
//! [`pending`] fits single-value replies. Empty replies (broadcast,
//! subscribe, renew) take the zero-argument handler from [`pending_empty`].
//! Replies with several values need the reply handler wrapped into a tuple.
//!
//! ```ignore
//! let (on_error, on_reply, pending) = completion::pending();
//! proxy.blockchain_fetch_last_height(on_error, on_reply);
//! let height = pending.wait_timeout(Duration::from_secs(5))?;
//!
//! let (on_error, on_reply, pending) = completion::pending_empty();
//! proxy.protocol_broadcast_transaction(&tx, on_error, on_reply);
//! pending.wait()?;
//! ```

use std::time::Duration;

use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};

use crate::error::{ObeliskError, Result};

/// Receiving side of a completion
#[derive(Debug)]
pub struct Pending<T> {
    receiver: Receiver<Result<T>>,
}

/// Create a completion: `(on_error, on_reply, pending)`
pub fn pending<T: Send + 'static>() -> (
    impl FnOnce(ObeliskError) + Send + 'static,
    impl FnOnce(T) + Send + 'static,
    Pending<T>,
) {
    let (sender, receiver) = channel::bounded(1);
    let error_sender: Sender<Result<T>> = sender.clone();

    let on_error = move |error: ObeliskError| {
        // Full slot means the reply already arrived
        let _ = error_sender.try_send(Err(error));
    };
    let on_reply = move |value: T| {
        let _ = sender.try_send(Ok(value));
    };

    (on_error, on_reply, Pending { receiver })
}

/// Create a completion for replies that carry no value
pub fn pending_empty() -> (
    impl FnOnce(ObeliskError) + Send + 'static,
    impl FnOnce() + Send + 'static,
    Pending<()>,
) {
    let (on_error, on_reply, pending) = pending::<()>();
    (on_error, move || on_reply(()), pending)
}

impl<T> Pending<T> {
    /// Block until a handler runs.
    ///
    /// Returns `Canceled` if both handlers were dropped uncalled.
    pub fn wait(self) -> Result<T> {
        self.receiver.recv().map_err(|_| ObeliskError::Canceled)?
    }

    /// Block for at most `timeout`; `Timeout` if no handler ran in time
    pub fn wait_timeout(self, timeout: Duration) -> Result<T> {
        match self.receiver.recv_timeout(timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => Err(ObeliskError::Timeout),
            Err(RecvTimeoutError::Disconnected) => Err(ObeliskError::Canceled),
        }
    }

    /// Non-blocking poll; `None` while still outstanding
    pub fn try_take(&self) -> Option<Result<T>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(ObeliskError::Canceled)),
        }
    }
}
