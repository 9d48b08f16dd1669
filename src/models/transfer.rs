use chrono::TimeZone;
use chrono_tz::Tz;

/// Token name the ledger uses as a sentinel for the chain's native coin (TRX).
pub const NATIVE_TOKEN: &str = "_";

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Represents one value movement of one token between two addresses.
///
/// Raw transfers arrive from the ledger with an empty `comment`; the merge
/// engine is the only place that constructs new transfers (the aggregates)
/// and the only place that sets a comment.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Transfer {
    /// Sender address.
    pub from_address: String,
    /// Receiver address.
    pub to_address: String,
    /// Asset identifier; [`NATIVE_TOKEN`] denotes the native coin.
    pub token_name: String,
    /// Amount in the asset's smallest indivisible unit. Conversion to a
    /// human-readable decimal happens only at render time.
    pub amount: u64,
    /// Milliseconds since epoch.
    pub timestamp: i64,
    /// Ledger-finality flag.
    pub confirmed: bool,
    /// Empty for raw transfers, set by the merge engine for aggregates.
    pub comment: String
}

impl Transfer {
    /// Whether this transfer moves the chain's native coin.
    pub fn is_native(&self) -> bool {
        self.token_name == NATIVE_TOKEN
    }

    /// Renders the transfer timestamp as a local date string in `timezone`.
    pub fn date(&self, timezone: Tz) -> String {
        timezone.timestamp_millis_opt(self.timestamp)
            .single()
            .map(|date| date.format(DATE_FORMAT).to_string())
            .unwrap_or_else(|| self.timestamp.to_string())
    }
}
