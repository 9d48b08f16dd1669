use thiserror::Error;

use crate::models::Transfer;

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("Either a sender address or a destination address must be set")]
    MissingAddress
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Transfer [{from_address} -> {to_address}] matches no rule and involves neither side of wallet [{wallet_address}]")]
    UnclassifiableTransfer {
        from_address: String,
        to_address: String,
        wallet_address: String
    },
    #[error("Amount overflow while aggregating a run of [{token_name}] transfers")]
    AmountOverflow {
        token_name: String
    }
}

impl EngineError {
    pub fn unclassifiable(transfer: &Transfer, wallet_address: &str) -> Self {
        Self::UnclassifiableTransfer {
            from_address: transfer.from_address.clone(),
            to_address: transfer.to_address.clone(),
            wallet_address: wallet_address.to_string()
        }
    }

    pub fn overflow(token_name: &str) -> Self {
        Self::AmountOverflow {
            token_name: token_name.to_string()
        }
    }
}
