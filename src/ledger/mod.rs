mod tronscan;


use thiserror::Error;

pub use tronscan::TronScanClient;

/// Decimal precision of the chain's native coin, fixed without a lookup.
pub const NATIVE_PRECISION: u32 = 6;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("TronScan request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("TronScan returned no token info for [{token_name}]")]
    UnknownToken {
        token_name: String
    }
}

/// Resolves the count of fractional decimal digits needed to convert a raw
/// integer amount of a token into a human-readable decimal.
///
/// Seam between the report assembler and the ledger backend, so rendering is
/// testable without the network.
#[allow(async_fn_in_trait)]
pub trait PrecisionSource {
    async fn precision(&self, token_name: &str) -> Result<u32, LedgerError>;
}
