//! spl-faucet-client
//!
//! A small, focused Rust client for the SPL token faucet program.
//!
//! It includes:
//! - PDA derivation helpers (faucet authority, done marker, associated token accounts)
//! - UI amount normalization against the mint's decimals
//! - get-or-create resolution of the caller's token account
//! - legacy and v0 transaction assembly bound to a fresh blockhash
//! - a `FaucetClient` facade building unsigned `airdrop` / `claim` transactions
//!
//! Note: the produced transactions are unsigned. Signing and broadcasting are
//! left to the consumer.

pub mod amount;
pub mod assembler;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod instruction;
pub mod ledger;
pub mod pda;
pub mod resolver;

pub use amount::UiAmount;
pub use assembler::InstructionPlan;
pub use client::{FaucetClient, FaucetTransaction};
pub use config::{AmountPolicy, FaucetConfig, MessageEncoding};
pub use constants::*;
pub use error::{FaucetError, FaucetResult, LedgerError};
pub use ledger::{AccountFetch, LedgerReader, MintInfo, RpcLedgerReader};
pub use pda::*;
pub use resolver::ResolvedAccount;
