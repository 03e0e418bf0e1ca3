//! PDA derivation helpers for the faucet program.
//!
//! These helpers implement deterministic address derivation and are designed to
//! match the on-chain program's seeds.

use solana_program::pubkey::Pubkey;

use crate::constants::SEED_FAUCET_AUTHORITY;
use crate::error::{FaucetError, FaucetResult};

/// Addresses touched by a single faucet operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaucetPdas {
    pub authority: (Pubkey, u8),
    pub vault: Pubkey,
}

/// Derive the faucet authority PDA.
///
/// The authority is the mint authority for `airdrop` and the owner of the
/// vault token account for `claim`.
pub fn derive_authority(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[SEED_FAUCET_AUTHORITY], program_id)
}

/// Derive the done marker for `(user, mint)`.
///
/// The program creates this account on the first claim; its existence alone
/// records that the user has claimed the mint.
pub fn derive_done_marker(user: &Pubkey, mint: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[user.as_ref(), mint.as_ref()], program_id)
}

/// Token program pair used for associated token accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenPrograms {
    pub token: Pubkey,
    pub associated_token: Pubkey,
}

impl Default for TokenPrograms {
    fn default() -> Self {
        Self { token: spl_token::id(), associated_token: spl_associated_token_account::id() }
    }
}

fn associated_token_address(mint: &Pubkey, owner: &Pubkey, programs: &TokenPrograms) -> Pubkey {
    Pubkey::find_program_address(
        &[owner.as_ref(), programs.token.as_ref(), mint.as_ref()],
        &programs.associated_token,
    )
    .0
}

/// Derive the associated token address of `owner` for `mint`.
///
/// Owners that are themselves PDAs sit off the ed25519 curve; they are only
/// accepted when `allow_off_curve_owner` is set.
pub fn derive_associated_token_address(
    mint: &Pubkey,
    owner: &Pubkey,
    programs: &TokenPrograms,
    allow_off_curve_owner: bool,
) -> FaucetResult<Pubkey> {
    if !allow_off_curve_owner && !owner.is_on_curve() {
        return Err(FaucetError::OwnerOffCurve(*owner));
    }
    Ok(associated_token_address(mint, owner, programs))
}

/// Collect the program-owned addresses for a mint.
pub fn pdas_for_mint(program_id: &Pubkey, programs: &TokenPrograms, mint: &Pubkey) -> FaucetPdas {
    let authority = derive_authority(program_id);
    let vault = associated_token_address(mint, &authority.0, programs);
    FaucetPdas { authority, vault }
}
