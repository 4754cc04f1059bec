//! Refresh coordination for the response stage of the auth interceptor
//!
//! One [`AuthInterceptorState`] belongs to one [`ApiClient`](super::ApiClient).
//! It is `Idle` or `Refreshing`. The first request that sees a 401 while
//! `Idle` becomes the leader and performs the single refresh call; every 401
//! that arrives while `Refreshing` parks a oneshot sender in a FIFO queue and
//! waits. Settling the episode resets the state to `Idle` and then releases
//! or rejects the queue in arrival order.
//!
//! The state lock is a `parking_lot::Mutex` and is never held across an
//! `.await`, so the check-then-set of the flag cannot interleave with another
//! task's.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::oneshot;

use super::errors::ApiError;

type Waiter = oneshot::Sender<Result<(), ApiError>>;

#[derive(Default)]
struct RefreshState {
    refreshing: bool,
    queue: VecDeque<Waiter>,
}

/// Shared refresh flag plus the queue of requests waiting on it
#[derive(Default)]
pub struct AuthInterceptorState {
    inner: Mutex<RefreshState>,
}

/// What a request that just received a 401 must do next
pub(crate) enum RefreshRole {
    /// Perform the refresh; settle through the guard.
    Leader(LeaderGuard),
    /// A refresh is already running; await its outcome.
    Follower(oneshot::Receiver<Result<(), ApiError>>),
}

impl AuthInterceptorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a refresh call is outstanding.
    pub fn is_refreshing(&self) -> bool {
        self.inner.lock().refreshing
    }

    /// Number of requests parked behind the outstanding refresh.
    pub fn queued(&self) -> usize {
        self.inner.lock().queue.len()
    }

    /// Become the leader of a new episode, or join the running one.
    pub(crate) fn begin(self: &Arc<Self>) -> RefreshRole {
        let mut state = self.inner.lock();
        if state.refreshing {
            let (tx, rx) = oneshot::channel();
            state.queue.push_back(tx);
            RefreshRole::Follower(rx)
        } else {
            state.refreshing = true;
            RefreshRole::Leader(LeaderGuard { state: Arc::clone(self), settled: false })
        }
    }

    /// Back to `Idle`, then deliver `outcome` to every waiter in FIFO order.
    fn settle(&self, outcome: &Result<(), ApiError>) -> usize {
        let waiters = {
            let mut state = self.inner.lock();
            state.refreshing = false;
            std::mem::take(&mut state.queue)
        };

        let released = waiters.len();
        for waiter in waiters {
            // A waiter whose caller was dropped has nobody to tell.
            let _ = waiter.send(outcome.clone());
        }
        released
    }
}

impl fmt::Debug for AuthInterceptorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.lock();
        f.debug_struct("AuthInterceptorState")
            .field("refreshing", &state.refreshing)
            .field("queued", &state.queue.len())
            .finish()
    }
}

/// Ownership of the running refresh episode.
///
/// Dropping it without calling [`LeaderGuard::settle`] (the leader's future
/// was cancelled mid-refresh) rejects the queue with
/// [`ApiError::AuthExpired`].
pub(crate) struct LeaderGuard {
    state: Arc<AuthInterceptorState>,
    settled: bool,
}

impl LeaderGuard {
    /// Finish the episode; returns how many waiters were notified.
    pub(crate) fn settle(mut self, outcome: Result<(), ApiError>) -> usize {
        self.settled = true;
        self.state.settle(&outcome)
    }
}

impl Drop for LeaderGuard {
    fn drop(&mut self) {
        if !self.settled {
            tracing::warn!("Token refresh abandoned; rejecting queued requests");
            self.state.settle(&Err(ApiError::AuthExpired));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leader(state: &Arc<AuthInterceptorState>) -> LeaderGuard {
        match state.begin() {
            RefreshRole::Leader(guard) => guard,
            RefreshRole::Follower(_) => panic!("expected to lead the refresh"),
        }
    }

    fn follower(state: &Arc<AuthInterceptorState>) -> oneshot::Receiver<Result<(), ApiError>> {
        match state.begin() {
            RefreshRole::Follower(rx) => rx,
            RefreshRole::Leader(_) => panic!("expected to join the running refresh"),
        }
    }

    #[tokio::test]
    async fn first_401_leads_and_later_ones_queue() {
        let state = Arc::new(AuthInterceptorState::new());
        let guard = leader(&state);
        assert!(state.is_refreshing());

        let first = follower(&state);
        let second = follower(&state);
        assert_eq!(state.queued(), 2);

        assert_eq!(guard.settle(Ok(())), 2);
        assert!(!state.is_refreshing());
        assert_eq!(state.queued(), 0);
        assert_eq!(first.await.unwrap(), Ok(()));
        assert_eq!(second.await.unwrap(), Ok(()));
    }

    #[tokio::test]
    async fn settle_notifies_every_waiter_before_returning() {
        let state = Arc::new(AuthInterceptorState::new());
        let guard = leader(&state);

        let mut receivers: Vec<_> = (0..5).map(|_| follower(&state)).collect();
        guard.settle(Ok(()));

        // Senders fire synchronously inside settle.
        for rx in &mut receivers {
            assert_eq!(rx.try_recv().unwrap(), Ok(()));
        }
    }

    #[tokio::test]
    async fn waiters_are_released_in_arrival_order() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        const WAITERS: usize = 6;

        let state = Arc::new(AuthInterceptorState::new());
        let guard = leader(&state);
        let receivers: Vec<_> = (0..WAITERS).map(|_| follower(&state)).collect();

        let parked = Arc::new(AtomicUsize::new(0));
        let released = Arc::new(Mutex::new(Vec::new()));

        // Spawned last-arrival first, so wake order can only come from the queue.
        let handles: Vec<_> = receivers
            .into_iter()
            .enumerate()
            .rev()
            .map(|(arrival, rx)| {
                let parked = Arc::clone(&parked);
                let released = Arc::clone(&released);
                tokio::spawn(async move {
                    parked.fetch_add(1, Ordering::SeqCst);
                    rx.await.unwrap().unwrap();
                    released.lock().push(arrival);
                })
            })
            .collect();

        while parked.load(Ordering::SeqCst) < WAITERS {
            tokio::task::yield_now().await;
        }

        guard.settle(Ok(()));
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(*released.lock(), (0..WAITERS).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn failure_is_delivered_to_every_waiter() {
        let state = Arc::new(AuthInterceptorState::new());
        let guard = leader(&state);
        let a = follower(&state);
        let b = follower(&state);

        guard.settle(Err(ApiError::AuthExpired));

        assert_eq!(a.await.unwrap(), Err(ApiError::AuthExpired));
        assert_eq!(b.await.unwrap(), Err(ApiError::AuthExpired));
    }

    #[tokio::test]
    async fn dropped_leader_rejects_queue_and_resets() {
        let state = Arc::new(AuthInterceptorState::new());
        let guard = leader(&state);
        let waiter = follower(&state);

        drop(guard);

        assert!(!state.is_refreshing());
        assert_eq!(waiter.await.unwrap(), Err(ApiError::AuthExpired));
    }

    #[test]
    fn new_episode_starts_after_settle() {
        let state = Arc::new(AuthInterceptorState::new());
        leader(&state).settle(Ok(()));
        let _second = leader(&state);
        assert!(state.is_refreshing());
    }
}
