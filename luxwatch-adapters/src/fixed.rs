//! Fetcher that replays canned outcomes.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::{FetchOutcome, Fetcher};

/// A fetcher that returns pre-recorded outcomes in order.
///
/// Once the queue is down to its last outcome, that outcome is repeated for
/// every further fetch. An empty fetcher always reports
/// [`FetchOutcome::Empty`]. Requested paths are recorded for inspection.
///
/// # Example
///
/// ```
/// use luxwatch_adapters::{FetchOutcome, StaticFetcher};
///
/// let fetcher = StaticFetcher::new([FetchOutcome::Empty]);
/// assert_eq!(fetcher.requests().len(), 0);
/// ```
#[derive(Debug, Default)]
pub struct StaticFetcher {
    outcomes: Mutex<VecDeque<FetchOutcome>>,
    requests: Mutex<Vec<String>>,
}

impl StaticFetcher {
    /// Create a fetcher that will return `outcomes` in order.
    pub fn new(outcomes: impl IntoIterator<Item = FetchOutcome>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue another outcome.
    pub fn push(&self, outcome: FetchOutcome) {
        self.outcomes.lock().push_back(outcome);
    }

    /// Paths requested so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    fn next_outcome(&self) -> FetchOutcome {
        let mut outcomes = self.outcomes.lock();
        if outcomes.len() > 1 {
            outcomes.pop_front().unwrap_or(FetchOutcome::Empty)
        } else {
            outcomes.front().cloned().unwrap_or(FetchOutcome::Empty)
        }
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, path: &str) -> FetchOutcome {
        self.requests.lock().push(path.to_string());
        self.next_outcome()
    }

    fn description(&self) -> String {
        "static".to_string()
    }
}
