//! Configuration for the faucet client.
//!
//! The client does not read environment variables. Program ids and variant
//! switches are provided explicitly by the caller; defaults point at the
//! devnet faucet deployment.

use solana_sdk::commitment_config::CommitmentConfig;
use solana_program::pubkey::Pubkey;

use crate::constants::DEFAULT_PROGRAM_ID;
use crate::error::{FaucetError, FaucetResult};
use crate::pda::TokenPrograms;

/// Client configuration container.
#[derive(Debug, Clone, PartialEq)]
pub struct FaucetConfig {
    pub program_id: Pubkey,
    pub token_program_id: Pubkey,
    pub associated_token_program_id: Pubkey,
    pub encoding: MessageEncoding,
    pub amount_policy: AmountPolicy,
    /// Claim writes a per-user done marker so the program can refuse a second
    /// claim for the same mint.
    pub claim_marker: bool,
    pub commitment: CommitmentConfig,
}

impl Default for FaucetConfig {
    fn default() -> Self {
        Self {
            program_id: DEFAULT_PROGRAM_ID,
            token_program_id: spl_token::id(),
            associated_token_program_id: spl_associated_token_account::id(),
            encoding: MessageEncoding::Legacy,
            amount_policy: AmountPolicy::Scaled,
            claim_marker: false,
            commitment: CommitmentConfig::confirmed(),
        }
    }
}

impl FaucetConfig {
    pub fn with_program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = program_id;
        self
    }

    pub fn with_encoding(mut self, encoding: MessageEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_amount_policy(mut self, amount_policy: AmountPolicy) -> Self {
        self.amount_policy = amount_policy;
        self
    }

    pub fn with_associated_token_program(mut self, associated_token_program_id: Pubkey) -> Self {
        self.associated_token_program_id = associated_token_program_id;
        self
    }

    pub fn token_programs(&self) -> TokenPrograms {
        TokenPrograms { token: self.token_program_id, associated_token: self.associated_token_program_id }
    }

    pub fn with_claim_marker(mut self, claim_marker: bool) -> Self {
        self.claim_marker = claim_marker;
        self
    }
}

/// Transaction message encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageEncoding {
    #[default]
    Legacy,
    /// Version-0 message without address lookup tables.
    V0,
}

impl MessageEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::V0 => "v0",
        }
    }
}

/// How the requested amount reaches the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AmountPolicy {
    /// Caller supplies a UI amount; it is scaled by the mint's decimals and
    /// encoded as a `u64` instruction argument.
    #[default]
    Scaled,
    /// The program distributes a fixed amount; instructions carry no argument.
    ProgramFixed,
}

impl AmountPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scaled => "scaled",
            Self::ProgramFixed => "program-fixed",
        }
    }
}

/// Validate a full configuration object.
pub fn validate_config(cfg: &FaucetConfig) -> FaucetResult<()> {
    if cfg.program_id == Pubkey::default() {
        return Err(FaucetError::invalid_config("program_id must not be the default pubkey"));
    }

    if cfg.program_id == cfg.token_program_id || cfg.program_id == cfg.associated_token_program_id {
        return Err(FaucetError::invalid_config(
            "program_id must differ from the token and associated token programs",
        ));
    }

    if cfg.token_program_id == cfg.associated_token_program_id {
        return Err(FaucetError::invalid_config(
            "token_program_id must differ from associated_token_program_id",
        ));
    }

    Ok(())
}
