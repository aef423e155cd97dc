//! Deferred continuations.
//!
//! A [`Deferred`] is the only asynchrony in the pipeline: a boxed future that
//! eventually yields another [`GameEffect`]. Reducers return it explicitly;
//! nothing suspends inside a reducer. The driver polls every pending
//! continuation once at the start of each tick, with a no-op waker, and
//! applies the effects of those that are ready in FIFO order.
//!
//! Whatever resolves the future (a thread, an async runtime, a platform
//! callback) lives outside the core. [`Deferred::channel`] hands such a
//! scheduler a [`DeferredHandle`]; dropping the handle cancels the
//! continuation without side effects.

use std::borrow::Cow;
use std::fmt;
use std::future::Future;
use std::task::{Context, Poll};

use futures::FutureExt;
use futures::channel::oneshot;
use futures::future::BoxFuture;
use futures::task::noop_waker_ref;

use crate::effect::GameEffect;

/// Work that completes later and re-enters the pipeline with its own effect.
pub struct Deferred<S> {
    label: Cow<'static, str>,
    future: BoxFuture<'static, Option<GameEffect<S>>>,
}

impl<S: 'static> Deferred<S> {
    /// Wrap a future producing the follow-up effect.
    ///
    /// The future is polled from the game loop's thread without a real
    /// waker, so it must make progress on its own (typically by waiting on a
    /// channel fed by some other executor).
    pub fn new<F>(label: impl Into<Cow<'static, str>>, future: F) -> Self
    where
        F: Future<Output = GameEffect<S>> + Send + 'static,
    {
        Self {
            label: label.into(),
            future: future.map(Some).boxed(),
        }
    }

    /// A continuation that is already resolved; it applies on the next tick.
    pub fn ready(label: impl Into<Cow<'static, str>>, effect: GameEffect<S>) -> Self {
        Self {
            label: label.into(),
            future: futures::future::ready(Some(effect)).boxed(),
        }
    }

    /// A continuation resolved through the returned [`DeferredHandle`].
    pub fn channel(label: impl Into<Cow<'static, str>>) -> (DeferredHandle<S>, Self) {
        let (sender, receiver) = oneshot::channel();
        let deferred = Self {
            label: label.into(),
            future: receiver.map(Result::ok).boxed(),
        };
        (DeferredHandle { sender }, deferred)
    }
}

impl<S> Deferred<S> {
    /// Human-readable description used in logs.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Poll once without blocking.
    ///
    /// `Ready(None)` means the continuation was cancelled.
    pub(crate) fn poll_once(&mut self) -> Poll<Option<GameEffect<S>>> {
        let mut cx = Context::from_waker(noop_waker_ref());
        self.future.poll_unpin(&mut cx)
    }
}

impl<S> fmt::Debug for Deferred<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Resolves a [`Deferred`] created by [`Deferred::channel`].
pub struct DeferredHandle<S> {
    sender: oneshot::Sender<GameEffect<S>>,
}

impl<S> DeferredHandle<S> {
    /// Resolve the continuation with `effect`.
    ///
    /// Returns `false` if the continuation no longer exists (the game loop
    /// that owned it was dropped).
    pub fn resolve(self, effect: GameEffect<S>) -> bool {
        self.sender.send(effect).is_ok()
    }

    /// Returns `true` if the receiving side has gone away.
    #[must_use]
    pub fn is_canceled(&self) -> bool {
        self.sender.is_canceled()
    }
}

impl<S> fmt::Debug for DeferredHandle<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredHandle").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct State;

    #[test]
    fn test_ready_resolves_on_first_poll() {
        let mut deferred = Deferred::<State>::ready("now", GameEffect::none());
        assert_eq!(deferred.label(), "now");
        assert!(matches!(deferred.poll_once(), Poll::Ready(Some(GameEffect::None))));
    }

    #[test]
    fn test_channel_pending_until_resolved() {
        let (handle, mut deferred) = Deferred::<State>::channel("load");
        assert!(deferred.poll_once().is_pending());
        assert!(deferred.poll_once().is_pending());

        assert!(handle.resolve(GameEffect::none()));
        assert!(matches!(deferred.poll_once(), Poll::Ready(Some(_))));
    }

    #[test]
    fn test_dropped_handle_cancels() {
        let (handle, mut deferred) = Deferred::<State>::channel("load");
        drop(handle);
        assert!(matches!(deferred.poll_once(), Poll::Ready(None)));
    }

    #[test]
    fn test_resolve_after_receiver_dropped() {
        let (handle, deferred) = Deferred::<State>::channel("load");
        drop(deferred);
        assert!(handle.is_canceled());
        assert!(!handle.resolve(GameEffect::none()));
    }

    #[test]
    fn test_future_resolved_from_another_thread() {
        let (sender, receiver) = oneshot::channel::<u32>();
        let mut deferred = Deferred::<State>::new("thread", async move {
            let _ = receiver.await;
            GameEffect::none()
        });
        assert!(deferred.poll_once().is_pending());

        std::thread::spawn(move || sender.send(7))
            .join()
            .expect("sender thread panicked")
            .expect("receiver alive");
        assert!(deferred.poll_once().is_ready());
    }
}
