//! In-process outbox for chat-session notifications.
//!
//! `respond` enqueues and returns; a single background worker drains the queue
//! and delivers each notification with bounded retries. Delivery is best-effort:
//! a notification that exhausts its attempts, or that arrives while the queue is
//! full, is logged and dropped. Committed request state is never rolled back.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::chat_client::{ChatError, ChatNotifier, ChatSessionRequest};

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts per notification, including the first.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles on each further attempt.
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Attempts actually made per notification; at least one.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    fn delay_before(&self, attempt: u32) -> Duration {
        // attempt is 1-based; the first retry is attempt 2.
        self.base_delay * (1 << (attempt.saturating_sub(2)).min(16))
    }
}

/// Sending half of the outbox. Cheap to clone.
#[derive(Clone)]
pub struct ChatOutbox {
    tx: mpsc::Sender<ChatSessionRequest>,
}

impl ChatOutbox {
    /// Spawn the delivery worker and return the outbox feeding it.
    ///
    /// The worker exits once every `ChatOutbox` clone has been dropped and the
    /// queue is drained.
    pub fn spawn(
        notifier: Arc<dyn ChatNotifier>,
        capacity: usize,
        policy: RetryPolicy,
    ) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let handle = tokio::spawn(run_worker(rx, notifier, policy));
        (Self { tx }, handle)
    }

    /// Queue a notification without waiting. Returns `false` if it was dropped.
    pub fn enqueue(&self, request: ChatSessionRequest) -> bool {
        match self.tx.try_send(request) {
            Ok(()) => true,
            Err(TrySendError::Full(request)) => {
                warn!(
                    candidate_id = %request.candidate_id,
                    recruiter_id = %request.recruiter_id,
                    "Chat outbox full, dropping session notification"
                );
                false
            }
            Err(TrySendError::Closed(request)) => {
                error!(
                    candidate_id = %request.candidate_id,
                    recruiter_id = %request.recruiter_id,
                    "Chat outbox worker has stopped, dropping session notification"
                );
                false
            }
        }
    }
}

async fn run_worker(
    mut rx: mpsc::Receiver<ChatSessionRequest>,
    notifier: Arc<dyn ChatNotifier>,
    policy: RetryPolicy,
) {
    while let Some(request) = rx.recv().await {
        if let Err(e) = deliver(notifier.as_ref(), &request, policy).await {
            error!(
                candidate_id = %request.candidate_id,
                recruiter_id = %request.recruiter_id,
                attempts = policy.attempts(),
                "Chat session notification lost: {e}"
            );
        }
    }
    debug!("Chat outbox drained, worker exiting");
}

/// Deliver one notification, retrying with exponential backoff.
/// Returns the number of attempts used on success, or the last error.
pub(crate) async fn deliver(
    notifier: &dyn ChatNotifier,
    request: &ChatSessionRequest,
    policy: RetryPolicy,
) -> Result<u32, ChatError> {
    let max_attempts = policy.attempts();
    let mut attempt = 1;

    loop {
        match notifier.open_session(request).await {
            Ok(()) => return Ok(attempt),
            Err(e) if attempt >= max_attempts => return Err(e),
            Err(e) => {
                attempt += 1;
                let delay = policy.delay_before(attempt);
                warn!(
                    candidate_id = %request.candidate_id,
                    "Chat notification failed ({e}), retrying in {}ms (attempt {attempt}/{max_attempts})",
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    /// Fails the first `failures` calls, then records every successful delivery.
    #[derive(Default)]
    pub(crate) struct ScriptedNotifier {
        pub failures: u32,
        pub calls: AtomicU32,
        pub delivered: Mutex<Vec<ChatSessionRequest>>,
    }

    impl ScriptedNotifier {
        pub(crate) fn failing_forever() -> Self {
            Self {
                failures: u32::MAX,
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl ChatNotifier for ScriptedNotifier {
        async fn open_session(&self, request: &ChatSessionRequest) -> Result<(), ChatError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                return Err(ChatError::Status {
                    status: 503,
                    body: "unavailable".to_string(),
                });
            }
            self.delivered.lock().unwrap().push(request.clone());
            Ok(())
        }
    }

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            base_delay: Duration::from_millis(1),
        }
    }

    fn session() -> ChatSessionRequest {
        ChatSessionRequest {
            candidate_id: "c1".to_string(),
            recruiter_id: "r1".to_string(),
        }
    }

    #[test]
    fn test_backoff_doubles() {
        let policy = RetryPolicy {
            max_attempts: 4,
            base_delay: Duration::from_millis(100),
        };
        assert_eq!(policy.delay_before(2), Duration::from_millis(100));
        assert_eq!(policy.delay_before(3), Duration::from_millis(200));
        assert_eq!(policy.delay_before(4), Duration::from_millis(400));
    }

    #[tokio::test]
    async fn test_deliver_retries_until_success() {
        let notifier = ScriptedNotifier {
            failures: 2,
            ..ScriptedNotifier::default()
        };
        let attempts = deliver(&notifier, &session(), fast_policy(3)).await.unwrap();
        assert_eq!(attempts, 3);
        assert_eq!(*notifier.delivered.lock().unwrap(), vec![session()]);
    }

    #[tokio::test]
    async fn test_deliver_gives_up_after_max_attempts() {
        let notifier = ScriptedNotifier::failing_forever();
        let result = deliver(&notifier, &session(), fast_policy(3)).await;
        assert!(result.is_err());
        assert_eq!(notifier.calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_attempts_is_at_least_one() {
        assert_eq!(fast_policy(0).attempts(), 1);
        assert_eq!(fast_policy(1).attempts(), 1);
        assert_eq!(fast_policy(5).attempts(), 5);
    }

    #[tokio::test]
    async fn test_zero_attempts_still_tries_once() {
        let notifier = ScriptedNotifier::default();
        assert_eq!(deliver(&notifier, &session(), fast_policy(0)).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_worker_drains_queue_then_exits() {
        let notifier = Arc::new(ScriptedNotifier {
            failures: 1,
            ..ScriptedNotifier::default()
        });
        let (outbox, handle) = ChatOutbox::spawn(notifier.clone(), 8, fast_policy(2));

        assert!(outbox.enqueue(session()));
        assert!(outbox.enqueue(ChatSessionRequest {
            candidate_id: "c2".to_string(),
            recruiter_id: "r1".to_string(),
        }));
        drop(outbox);
        handle.await.unwrap();

        let delivered = notifier.delivered.lock().unwrap();
        assert_eq!(delivered.len(), 2);
        assert_eq!(delivered[1].candidate_id, "c2");
    }

    #[tokio::test]
    async fn test_enqueue_after_worker_stops_is_dropped() {
        let notifier = Arc::new(ScriptedNotifier::default());
        let (outbox, handle) = ChatOutbox::spawn(notifier, 1, fast_policy(1));
        handle.abort();
        let _ = handle.await;

        assert!(!outbox.enqueue(session()));
    }

    #[tokio::test]
    async fn test_enqueue_when_full_is_dropped() {
        // The current-thread runtime cannot run the worker until this test
        // yields, so the second send finds the single slot still occupied.
        let notifier = Arc::new(ScriptedNotifier::default());
        let (outbox, handle) = ChatOutbox::spawn(notifier.clone(), 1, fast_policy(1));

        assert!(outbox.enqueue(session()));
        assert!(!outbox.enqueue(ChatSessionRequest {
            candidate_id: "c2".to_string(),
            recruiter_id: "r1".to_string(),
        }));

        drop(outbox);
        handle.await.unwrap();
        assert_eq!(*notifier.delivered.lock().unwrap(), vec![session()]);
    }
}
