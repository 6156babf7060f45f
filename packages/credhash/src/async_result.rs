//! Async credential result backed by a oneshot channel

use crate::{CredentialError, Result};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

/// Pending result of a credential operation
///
/// Key derivation runs on tokio's blocking pool and reports back over a
/// oneshot channel. Dropping this future abandons the derivation's result;
/// the derived key is wiped when the worker finishes, and nothing partial is
/// ever delivered.
#[must_use = "credential results do nothing unless awaited"]
pub struct AsyncCredentialResult<T> {
    receiver: oneshot::Receiver<Result<T>>,
}

impl<T: Send + 'static> AsyncCredentialResult<T> {
    pub(crate) fn new(receiver: oneshot::Receiver<Result<T>>) -> Self {
        Self { receiver }
    }

    /// Create a result that's already completed
    pub fn ready(result: Result<T>) -> Self {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(result);
        Self { receiver: rx }
    }

    /// Create a result that yields an error
    pub fn error(error: CredentialError) -> Self {
        Self::ready(Err(error))
    }

    /// Run `job` on the blocking pool of the current tokio runtime
    pub(crate) fn spawn_blocking<F>(job: F) -> Self
    where
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                return Self::error(CredentialError::internal(format!(
                    "key derivation requires a tokio runtime: {e}"
                )));
            }
        };

        let (tx, rx) = oneshot::channel();
        handle.spawn_blocking(move || {
            let _ = tx.send(job());
        });
        Self::new(rx)
    }
}

impl<T> Future for AsyncCredentialResult<T> {
    type Output = Result<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(_)) => Poll::Ready(Err(CredentialError::internal(
                "credential task dropped before completing",
            ))),
            Poll::Pending => Poll::Pending,
        }
    }
}
