use tokio::sync::broadcast;

/// Small bound; a refresh is a hint, not a queue of work.
const CHANNEL_CAPACITY: usize = 16;

/// Re-render hint fired after every successful mutation.
///
/// View layers call [`RefreshSignal::subscribe`] and re-query the tree when
/// an event arrives. Senders never block and never fail: a mutation goes
/// through whether or not anyone is listening, and a lagging subscriber
/// just misses intermediate ticks.
#[derive(Clone)]
pub struct RefreshSignal {
    tx: broadcast::Sender<()>,
}

impl RefreshSignal {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    pub fn notify(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for RefreshSignal {
    fn default() -> Self {
        Self::new()
    }
}
