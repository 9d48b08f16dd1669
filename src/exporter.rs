use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::config::{ConfigError, ExporterConfig};
use crate::engine;
use crate::ledger::{LedgerError, TronScanClient};
use crate::models::EngineError;
use crate::report::{CoinTrackingReport, ReportError};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("Export error: {0}")]
    Io(#[from] std::io::Error)
}

/// Fetches, reduces, classifies and writes one wallet's transfers.
///
/// Each instance owns its configuration and its ledger client; separate
/// instances can run concurrently, the pipeline keeps no global state.
pub struct Exporter {
    config: ExporterConfig,
    client: TronScanClient
}

impl Exporter {
    pub fn new(config: ExporterConfig) -> Self {
        Self::with_client(config, TronScanClient::new())
    }

    pub fn with_client(config: ExporterConfig, client: TronScanClient) -> Self {
        Self { config, client }
    }

    /// End-to-end export of the wallet's transfers to a CSV file at `path`,
    /// bounded by the optional inclusive millisecond time range.
    pub async fn export_csv(
        &self,
        path: impl AsRef<Path>,
        start_ts: Option<i64>,
        end_ts: Option<i64>
    ) -> Result<(), ExportError> {
        let assignment_rules = self.config.assignment_rules()?;
        let group_rules = self.config.group_rules()?;

        info!("Fetching transfers for wallet [{}] from TronScan", self.config.wallet_address);

        let transfers = self.client
            .transfers(&self.config.wallet_address, &self.config.currency_filters, start_ts, end_ts)
            .await?;

        info!("Fetched {} transfers", transfers.len());

        let records = engine::process(
            transfers,
            &assignment_rules,
            &group_rules,
            &self.config.wallet_address,
            self.config.timezone
        )?;

        info!("Reduced and classified into {} records", records.len());

        let report = CoinTrackingReport::new(
            self.config.wallet_name.clone().unwrap_or_default(),
            self.config.currency_aliases.clone(),
            self.config.timezone,
            self.config.locale
        );

        let file = File::create(path.as_ref())?;
        report.write(&records, &self.client, BufWriter::new(file)).await?;

        info!("Report written to {}", path.as_ref().display());

        Ok(())
    }
}
