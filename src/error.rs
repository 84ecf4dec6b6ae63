use {
    alloy_primitives::{TxHash, ruint::aliases::U256},
    thiserror::Error,
};

#[derive(Error, Debug)]
pub enum Error {
    #[error("required environment variable not set: {0}")]
    MissingCredential(&'static str),

    #[error("insufficient balance: have {balance} wei, need at least {minimum} wei")]
    InsufficientFunds { balance: U256, minimum: U256 },

    #[error("chain {chain_id} not in the supported chain list")]
    ChainNotFound { chain_id: u64 },

    #[error("token {symbol} not listed on chain {chain_id}")]
    TokenNotFound { symbol: String, chain_id: u64 },

    #[error("chain not supported: {chain}")]
    ChainNotSupported { chain: String },

    #[error("amount {0} wei is below the relay minimum")]
    AmountTooLow(U256),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("RPC error: {0}")]
    Rpc(#[from] alloy_json_rpc::RpcError<alloy_transport::TransportErrorKind>),

    #[error("transaction confirmation failed: {0}")]
    PendingTransaction(#[from] alloy_provider::PendingTransactionError),

    #[error("contract call failed: {0}")]
    Contract(#[from] alloy_contract::Error),

    #[error("ABI encoding/decoding error: {0}")]
    Abi(#[from] alloy_sol_types::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("no receipt found for transaction {0}")]
    ReceiptNotFound(TxHash),

    #[error("deposit event not found in transaction {0}")]
    DepositEventMissing(TxHash),

    #[error("{phase} phase failed: {reason}")]
    PhaseFailed { phase: &'static str, reason: String },

    #[error("timeout waiting for destination fill")]
    FillTimeout,
}

pub type Result<T> = std::result::Result<T, Error>;
