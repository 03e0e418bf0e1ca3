//! Get-or-create resolution of associated token accounts.
//!
//! The existence check and the creation instruction are not atomic against
//! the ledger. The emitted instruction is the associated token program's
//! idempotent create, so an account that appears between the read and the
//! broadcast is left untouched.

use solana_program::instruction::Instruction;
use solana_program::program_pack::Pack;
use solana_program::pubkey::Pubkey;
use solana_sdk::account::Account;
use spl_associated_token_account::instruction::create_associated_token_account_idempotent;
use tracing::debug;

use crate::config::FaucetConfig;
use crate::error::{FaucetError, FaucetResult, LedgerError};
use crate::ledger::{AccountFetch, LedgerReader};
use crate::pda;

/// Token account address plus the instruction creating it, when it is absent.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAccount {
    pub address: Pubkey,
    pub creation_instruction: Option<Instruction>,
}

impl ResolvedAccount {
    pub fn needs_creation(&self) -> bool {
        self.creation_instruction.is_some()
    }
}

/// Resolve the associated token account of `owner` for `mint`.
///
/// Off-curve owners are accepted. Creation is paid by `payer`.
pub async fn resolve_or_create<R>(
    reader: &R,
    config: &FaucetConfig,
    payer: &Pubkey,
    mint: &Pubkey,
    owner: &Pubkey,
) -> FaucetResult<ResolvedAccount>
where
    R: LedgerReader + ?Sized,
{
    let address = pda::derive_associated_token_address(mint, owner, &config.token_programs(), true)?;

    match reader.get_account(&address).await {
        AccountFetch::Found(account) => {
            check_token_account(&address, &account, &config.token_program_id)
                .map_err(|source| FaucetError::resolution(address, source))?;
            debug!(%address, %owner, %mint, "token account exists");
            Ok(ResolvedAccount { address, creation_instruction: None })
        }
        AccountFetch::NotFound => {
            debug!(%address, %owner, %mint, "token account missing, adding create instruction");
            let mut ix = create_associated_token_account_idempotent(payer, owner, mint, &config.token_program_id);
            ix.program_id = config.associated_token_program_id;
            ix.accounts[1].pubkey = address;
            Ok(ResolvedAccount { address, creation_instruction: Some(ix) })
        }
        AccountFetch::ReadError(source) => Err(FaucetError::resolution(address, source)),
    }
}

fn check_token_account(address: &Pubkey, account: &Account, token_program_id: &Pubkey) -> Result<(), LedgerError> {
    if account.owner != *token_program_id {
        return Err(LedgerError::malformed(*address, format!("owned by {}, not the token program", account.owner)));
    }
    if account.data.len() < spl_token::state::Account::LEN {
        return Err(LedgerError::malformed(
            *address,
            format!("{} bytes is too short for a token account", account.data.len()),
        ));
    }
    Ok(())
}
