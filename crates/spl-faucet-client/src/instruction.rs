//! Faucet program instruction builders.
//!
//! Instruction data is an 8-byte method discriminator
//! (`sha256("global:<method>")[..8]`) followed by the argument, a `u64`
//! amount as 8 little-endian bytes.

use solana_program::instruction::{AccountMeta, Instruction};
use solana_program::pubkey::Pubkey;
use sha2::{Digest, Sha256};

use crate::constants::{DISCRIMINATOR_NAMESPACE, IX_AIRDROP, IX_CLAIM};

/// Accounts for `airdrop`.
#[derive(Debug, Clone)]
pub struct AirdropAccounts {
    pub user_token_account: Pubkey,
    pub mint: Pubkey,
    pub mint_authority: Pubkey,
    pub token_program: Pubkey,
}

/// Accounts for `claim`.
#[derive(Debug, Clone)]
pub struct ClaimAccounts {
    pub user_token_account: Pubkey,
    pub vault_token_account: Pubkey,
    pub vault_authority: Pubkey,
    pub token_program: Pubkey,
    pub marker: Option<DoneMarkerAccounts>,
}

/// Extra accounts of the one-time-claim variant. The program creates
/// `done_marker` on first claim, paid by `user`.
#[derive(Debug, Clone)]
pub struct DoneMarkerAccounts {
    pub user: Pubkey,
    pub done_marker: Pubkey,
}

/// Method discriminator for `name`.
pub fn discriminator(name: &str) -> [u8; 8] {
    let digest = Sha256::digest(format!("{DISCRIMINATOR_NAMESPACE}:{name}").as_bytes());
    let mut out = [0u8; 8];
    out.copy_from_slice(&digest[..8]);
    out
}

fn encode(name: &str, amount: Option<u64>) -> Vec<u8> {
    let mut data = discriminator(name).to_vec();
    if let Some(amount) = amount {
        data.extend_from_slice(&amount.to_le_bytes());
    }
    data
}

/// Build `airdrop`. `amount` is `None` when the program mints a fixed amount.
pub fn airdrop(program_id: &Pubkey, accounts: &AirdropAccounts, amount: Option<u64>) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(accounts.user_token_account, false),
            AccountMeta::new(accounts.mint, false),
            AccountMeta::new_readonly(accounts.mint_authority, false),
            AccountMeta::new_readonly(accounts.token_program, false),
        ],
        data: encode(IX_AIRDROP, amount),
    }
}

/// Build `claim`.
pub fn claim(program_id: &Pubkey, accounts: &ClaimAccounts, amount: Option<u64>) -> Instruction {
    let mut metas = vec![
        AccountMeta::new(accounts.user_token_account, false),
        AccountMeta::new(accounts.vault_token_account, false),
        AccountMeta::new_readonly(accounts.vault_authority, false),
        AccountMeta::new_readonly(accounts.token_program, false),
    ];
    if let Some(marker) = &accounts.marker {
        metas.push(AccountMeta::new(marker.user, true));
        metas.push(AccountMeta::new(marker.done_marker, false));
        metas.push(AccountMeta::new_readonly(solana_program::system_program::id(), false));
    }
    Instruction { program_id: *program_id, accounts: metas, data: encode(IX_CLAIM, amount) }
}
