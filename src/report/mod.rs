mod cointracking;


use serde::Deserialize;
use thiserror::Error;

pub use cointracking::CoinTrackingReport;

use crate::ledger::LedgerError;
use crate::models::TransferLabel;

/// Output language of the CSV header and the transaction-type column.
///
/// CoinTracking.info accepts both its German and its English type names on
/// import; German is the default the original tooling used.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    De,
    En
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Report error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Report error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Ledger(#[from] LedgerError)
}

/// CoinTracking display text for a label, chosen only at render time.
pub fn label_text(label: TransferLabel, locale: Locale) -> &'static str {
    match locale {
        Locale::De => match label {
            TransferLabel::Deposit => "Einzahlung",
            TransferLabel::Revenue => "Einnahme",
            TransferLabel::Mining => "Mining",
            TransferLabel::GiftIn => "Geschenk",
            TransferLabel::Withdrawal => "Auszahlung",
            TransferLabel::Expense => "Ausgabe",
            TransferLabel::Donation => "Spende",
            TransferLabel::GiftOut => "Schenkung",
            TransferLabel::Stolen => "Gestohlen",
            TransferLabel::Loss => "Verlust"
        },
        Locale::En => match label {
            TransferLabel::Deposit => "Deposit",
            TransferLabel::Revenue => "Income",
            TransferLabel::Mining => "Mining",
            TransferLabel::GiftIn => "Gift/Tip",
            TransferLabel::Withdrawal => "Withdrawal",
            TransferLabel::Expense => "Spend",
            TransferLabel::Donation => "Donation",
            TransferLabel::GiftOut => "Gift",
            TransferLabel::Stolen => "Stolen",
            TransferLabel::Loss => "Lost"
        }
    }
}

/// Whether a label lands on the buy side (Kauf) of a CoinTracking row.
/// Everything else goes to the sell side.
pub(crate) fn is_buy_side(label: TransferLabel) -> bool {
    matches!(
        label,
        TransferLabel::Deposit | TransferLabel::Revenue | TransferLabel::Mining | TransferLabel::GiftIn
    )
}
