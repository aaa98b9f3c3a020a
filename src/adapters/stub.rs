use crate::domain::model::{BookingIntent, BookingOutcome};
use crate::domain::ports::BookingGatewayClient;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

/// Test-mode gateway: never touches the network and always reports the
/// outcome it was built with.
pub struct StubGateway {
    outcome: BookingOutcome,
    calls: AtomicUsize,
    last_intent: Mutex<Option<BookingIntent>>,
}

impl StubGateway {
    pub fn new(outcome: BookingOutcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_intent: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn last_intent(&self) -> Option<BookingIntent> {
        *self.last_intent.lock().await
    }
}

impl Default for StubGateway {
    fn default() -> Self {
        Self::new(BookingOutcome::Confirmed { redirect_url: None })
    }
}

#[async_trait]
impl BookingGatewayClient for StubGateway {
    async fn submit(&self, intent: &BookingIntent) -> BookingOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_intent.lock().await = Some(*intent);
        tracing::info!("🧪 Stub gateway accepted booking ({} room(s))", intent.room_count);
        self.outcome.clone()
    }
}
