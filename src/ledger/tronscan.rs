use moka::future::Cache;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::ledger::{LedgerError, NATIVE_PRECISION, PrecisionSource};
use crate::models::{NATIVE_TOKEN, Transfer};

const API_BASE: &str = "https://apilist.tronscan.org/api";
const PAGE_SIZE: u64 = 50;
const PRECISION_CACHE_CAPACITY: u64 = 1_024;

/// Client for the TronScan HTTP API.
///
/// Fetches a wallet's transfers page by page and resolves token precisions,
/// caching the latter since an export queries the same handful of tokens
/// over and over.
pub struct TronScanClient {
    http: Client,
    base_url: String,
    precision_cache: Cache<String, u32>
}

/// One page of the transfer listing endpoint.
#[derive(Debug, Deserialize)]
struct TransferPage {
    total: u64,
    #[serde(default)]
    data: Vec<TransferPayload>
}

/// One transfer row as served by the TronScan API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TransferPayload {
    transfer_from_address: String,
    transfer_to_address: String,
    amount: u64,
    token_name: String,
    timestamp: i64,
    confirmed: bool
}

impl From<TransferPayload> for Transfer {
    fn from(payload: TransferPayload) -> Self {
        Self {
            from_address: payload.transfer_from_address,
            to_address: payload.transfer_to_address,
            token_name: payload.token_name,
            amount: payload.amount,
            timestamp: payload.timestamp,
            confirmed: payload.confirmed,
            comment: String::new()
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenInfoPage {
    #[serde(default)]
    data: Vec<TokenInfo>
}

#[derive(Debug, Deserialize)]
struct TokenInfo {
    precision: u32
}

impl TronScanClient {
    pub fn new() -> Self {
        Self::with_base_url(API_BASE)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            precision_cache: Cache::new(PRECISION_CACHE_CAPACITY)
        }
    }

    /// Fetches every transfer touching `wallet_address` within the inclusive
    /// millisecond time range, paginating until the reported total is
    /// reached. `currency_filters` restricts the result to the listed token
    /// names; an empty list keeps everything.
    ///
    /// The returned order is whatever the API serves; callers sort before
    /// processing.
    pub async fn transfers(
        &self,
        wallet_address: &str,
        currency_filters: &[String],
        start_ts: Option<i64>,
        end_ts: Option<i64>
    ) -> Result<Vec<Transfer>, LedgerError> {
        let mut fetched = Vec::new();
        let mut offset = 0u64;

        loop {
            let mut request = self.http
                .get(format!("{}/transfer", self.base_url))
                .query(&[("address", wallet_address)])
                .query(&[("limit", PAGE_SIZE), ("start", offset)]);

            if let Some(start_ts) = start_ts {
                request = request.query(&[("start_timestamp", start_ts)]);
            }

            if let Some(end_ts) = end_ts {
                request = request.query(&[("end_timestamp", end_ts)]);
            }

            let page: TransferPage = request.send().await?
                .error_for_status()?
                .json().await?;

            let received = page.data.len() as u64;
            offset += received;

            debug!("Fetched {offset}/{} transfers for wallet [{wallet_address}]", page.total);

            fetched.extend(page.data.into_iter().map(Transfer::from));

            if received == 0 || offset >= page.total {
                break
            }
        }

        Ok(retain_filtered(fetched, currency_filters))
    }

    async fn lookup_precision(&self, token_name: &str) -> Result<u32, LedgerError> {
        let page: TokenInfoPage = self.http
            .get(format!("{}/token", self.base_url))
            .query(&[("token", token_name)])
            .send().await?
            .error_for_status()?
            .json().await?;

        page.data.first()
            .map(|info| info.precision)
            .ok_or_else(|| LedgerError::UnknownToken { token_name: token_name.to_string() })
    }
}

impl Default for TronScanClient {
    fn default() -> Self {
        Self::new()
    }
}

impl PrecisionSource for TronScanClient {
    async fn precision(&self, token_name: &str) -> Result<u32, LedgerError> {
        if token_name == NATIVE_TOKEN {
            return Ok(NATIVE_PRECISION)
        }

        if let Some(precision) = self.precision_cache.get(token_name).await {
            return Ok(precision)
        }

        let precision = self.lookup_precision(token_name).await?;
        self.precision_cache.insert(token_name.to_string(), precision).await;

        Ok(precision)
    }
}

/// Applies the currency allow-list; an empty list keeps every transfer.
pub(crate) fn retain_filtered(transfers: Vec<Transfer>, currency_filters: &[String]) -> Vec<Transfer> {
    if currency_filters.is_empty() {
        return transfers
    }

    transfers.into_iter()
        .filter(|transfer| currency_filters.iter().any(|currency| *currency == transfer.token_name))
        .collect()
}
