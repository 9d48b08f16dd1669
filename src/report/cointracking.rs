use std::collections::HashMap;
use std::io::Write;

use chrono_tz::Tz;
use rust_decimal::Decimal;

use crate::ledger::{NATIVE_PRECISION, PrecisionSource};
use crate::models::{Transfer, TransferLabel};
use crate::report::{Locale, ReportError, is_buy_side, label_text};

const HEADER_DE: [&str; 11] = [
    "Typ", "Kauf", "Cur.", "Verkauf", "Cur.", "Gebühr", "Cur.", "Börse", "Gruppe", "Kommentar", "Datum"
];
const HEADER_EN: [&str; 11] = [
    "Type", "Buy", "Cur.", "Sell", "Cur.", "Fee", "Cur.", "Exchange", "Group", "Comment", "Date"
];

/// Display currency symbol of the chain's native coin.
const NATIVE_CURRENCY: &str = "TRX";

/// Assembles classified transfers into CoinTracking.info import rows.
///
/// The assembler owns everything the engine does not participate in:
/// locale-specific label text, buy-side versus sell-side placement, exact
/// decimal conversion of raw integer amounts, currency aliasing and date
/// rendering. Fee and group columns stay empty, the transfer listing carries
/// no fee data.
pub struct CoinTrackingReport {
    wallet_name: String,
    currency_aliases: HashMap<String, String>,
    timezone: Tz,
    locale: Locale
}

impl CoinTrackingReport {
    pub fn new(
        wallet_name: String,
        currency_aliases: HashMap<String, String>,
        timezone: Tz,
        locale: Locale
    ) -> Self {
        Self { wallet_name, currency_aliases, timezone, locale }
    }

    /// Writes the header plus one row per classified record.
    ///
    /// # Errors
    /// Fails when a token's precision cannot be resolved or the underlying
    /// writer rejects a row.
    pub async fn write<P: PrecisionSource, W: Write>(
        &self,
        records: &[(Transfer, TransferLabel)],
        precision_source: &P,
        writer: W
    ) -> Result<(), ReportError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let header = match self.locale {
            Locale::De => HEADER_DE,
            Locale::En => HEADER_EN
        };

        csv_writer.write_record(header)?;

        for (transfer, label) in records {
            let precision = if transfer.is_native() {
                NATIVE_PRECISION
            } else {
                precision_source.precision(&transfer.token_name).await?
            };

            let amount = scaled_amount(transfer.amount, precision);
            let currency = self.display_currency(&transfer.token_name);

            let (buy, buy_currency, sell, sell_currency) = if is_buy_side(*label) {
                (amount, currency, String::new(), String::new())
            } else {
                (String::new(), String::new(), amount, currency)
            };

            csv_writer.write_record([
                label_text(*label, self.locale).to_string(),
                buy,
                buy_currency,
                sell,
                sell_currency,
                String::new(),
                String::new(),
                self.wallet_name.clone(),
                String::new(),
                transfer.comment.clone(),
                transfer.date(self.timezone)
            ])?;
        }

        csv_writer.flush()?;

        Ok(())
    }

    fn display_currency(&self, token_name: &str) -> String {
        if token_name == crate::models::NATIVE_TOKEN {
            return NATIVE_CURRENCY.to_string()
        }

        self.currency_aliases.get(token_name)
            .cloned()
            .unwrap_or_else(|| token_name.to_string())
    }
}

/// Exact decimal rendering of a raw integer amount at the given precision,
/// trailing zeros trimmed. Never touches floating point. A precision beyond
/// what `Decimal` can scale falls back to the raw integer text.
fn scaled_amount(amount: u64, precision: u32) -> String {
    Decimal::try_from_i128_with_scale(i128::from(amount), precision)
        .map(|amount| amount.normalize().to_string())
        .unwrap_or_else(|_| amount.to_string())
}
