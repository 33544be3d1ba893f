//! Classification of a poll cycle into user-facing problem categories.
//!
//! The UI never inspects adapter errors directly. It asks
//! [`Diagnosis::from_outcome`] what went wrong and renders the title,
//! message and remediation steps of the answer.

use luxwatch_adapters::{AdapterError, FetchOutcome};

/// What kept a poll cycle from producing a chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnosis {
    /// The read did not complete within the timeout.
    Timeout,
    /// The database host could not be reached.
    ConnectionError(String),
    /// Database rules or credentials rejected the read (401/403).
    Unauthorized(u16),
    /// Any other HTTP failure.
    HttpError(u16),
    /// The response body was not JSON.
    ParseFailure(String),
    /// The read worked but yielded no usable readings.
    EmptyResult {
        /// Entries present in the store that could not be used.
        skipped: usize,
    },
    /// Anything else.
    Unknown(String),
}

impl Diagnosis {
    /// Diagnose a cycle from its fetch outcome and the normalizer's usable and
    /// skipped counts.
    ///
    /// Returns `None` when the cycle produced at least one record. `skipped`
    /// only matters for a successful read with nothing usable.
    pub fn from_outcome(outcome: &FetchOutcome, usable: usize, skipped: usize) -> Option<Self> {
        match outcome {
            FetchOutcome::Failure(err) => Some(Self::from_error(err)),
            FetchOutcome::Empty => Some(Diagnosis::EmptyResult { skipped: 0 }),
            FetchOutcome::Success(_) if usable == 0 => Some(Diagnosis::EmptyResult { skipped }),
            FetchOutcome::Success(_) => None,
        }
    }

    /// Map an adapter error onto its category.
    pub fn from_error(err: &AdapterError) -> Self {
        match err {
            AdapterError::Timeout => Diagnosis::Timeout,
            AdapterError::Connection(msg) => Diagnosis::ConnectionError(msg.clone()),
            AdapterError::Unauthorized(status) => Diagnosis::Unauthorized(*status),
            AdapterError::Http(status) => Diagnosis::HttpError(*status),
            AdapterError::Parse(msg) => Diagnosis::ParseFailure(msg.clone()),
            AdapterError::Unknown(msg) => Diagnosis::Unknown(msg.clone()),
        }
    }

    /// Stable machine-readable kind, used in exports and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Diagnosis::Timeout => "timeout",
            Diagnosis::ConnectionError(_) => "connection_error",
            Diagnosis::Unauthorized(_) => "unauthorized",
            Diagnosis::HttpError(_) => "http_error",
            Diagnosis::ParseFailure(_) => "parse_failure",
            Diagnosis::EmptyResult { .. } => "empty_result",
            Diagnosis::Unknown(_) => "unknown",
        }
    }

    /// Panel heading.
    pub fn title(&self) -> &'static str {
        match self {
            Diagnosis::Timeout => "Request timed out",
            Diagnosis::ConnectionError(_) => "Database unreachable",
            Diagnosis::Unauthorized(_) => "Access denied by database rules",
            Diagnosis::HttpError(_) => "Database returned an error",
            Diagnosis::ParseFailure(_) => "Response is not valid JSON",
            Diagnosis::EmptyResult { .. } => "No data yet",
            Diagnosis::Unknown(_) => "Unexpected error",
        }
    }

    /// One-line explanation.
    pub fn message(&self) -> String {
        match self {
            Diagnosis::Timeout => "The database did not answer in time.".to_string(),
            Diagnosis::ConnectionError(msg) => format!("Could not connect: {}", msg),
            Diagnosis::Unauthorized(status) => {
                format!("The read was rejected with HTTP {}.", status)
            }
            Diagnosis::HttpError(status) => format!("The read failed with HTTP {}.", status),
            Diagnosis::ParseFailure(msg) => format!("Could not decode the response: {}", msg),
            Diagnosis::EmptyResult { skipped: 0 } => {
                "The database answered but holds no readings at this path.".to_string()
            }
            Diagnosis::EmptyResult { skipped } => format!(
                "{} entries were found but none carried a numeric light_inte value.",
                skipped
            ),
            Diagnosis::Unknown(msg) => msg.clone(),
        }
    }

    /// Steps the user can take.
    pub fn remediation(&self) -> &'static [&'static str] {
        match self {
            Diagnosis::Timeout => &[
                "Check your network connection",
                "The next poll will retry automatically",
            ],
            Diagnosis::ConnectionError(_) => &[
                "Verify the database URL (--url or [firebase] database_url)",
                "Check your network connection",
                "The next poll will retry automatically",
            ],
            Diagnosis::Unauthorized(_) => &[
                "Open the database Rules tab in the Firebase console",
                "Allow reads on the sensor path, e.g. { \"rules\": { \".read\": true } }",
                "Confirm the URL points at the intended project",
            ],
            Diagnosis::HttpError(_) => &[
                "Verify the database URL and data path",
                "The next poll will retry automatically",
            ],
            Diagnosis::ParseFailure(_) => &[
                "Verify the URL is a Realtime Database URL, not a web page",
                "The database URL usually ends in firebaseio.com or firebasedatabase.app",
            ],
            Diagnosis::EmptyResult { .. } => &[
                "Confirm the sensor device is powered and uploading",
                "Expected shape: { \"<epoch>\": { \"light_inte\": 42 } }",
                "or { \"<date>\": { \"<time>\": { \"light_inte\": 39, \"raw\": 2511 } } }",
            ],
            Diagnosis::Unknown(_) => &["Run with --debug and check the log file"],
        }
    }

    /// Whether the problem is likely fixed by changing configuration rather than waiting.
    pub fn is_configuration_problem(&self) -> bool {
        matches!(
            self,
            Diagnosis::Unauthorized(_) | Diagnosis::ParseFailure(_) | Diagnosis::HttpError(404)
        )
    }
}
