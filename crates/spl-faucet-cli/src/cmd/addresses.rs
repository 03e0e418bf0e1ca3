use anyhow::Result;
use serde::Serialize;
use solana_sdk::pubkey::Pubkey;
use spl_faucet_client::{pda, FaucetConfig};

use crate::output;

#[derive(Debug, Serialize)]
pub struct AddressesOut {
    pub program_id: String,
    pub mint: String,
    pub authority: String,
    pub authority_bump: u8,
    pub vault: String,
    pub wallet_token_account: Option<String>,
    pub done_marker: Option<String>,
}

pub fn run(config: &FaucetConfig, mint: &Pubkey, wallet: Option<&Pubkey>) -> Result<()> {
    let pdas = pda::pdas_for_mint(&config.program_id, &config.token_programs(), mint);
    let wallet_token_account = wallet
        .map(|w| pda::derive_associated_token_address(mint, w, &config.token_programs(), true))
        .transpose()?;
    let done_marker = wallet.map(|w| pda::derive_done_marker(w, mint, &config.program_id).0);

    output::print(&AddressesOut {
        program_id: config.program_id.to_string(),
        mint: mint.to_string(),
        authority: pdas.authority.0.to_string(),
        authority_bump: pdas.authority.1,
        vault: pdas.vault.to_string(),
        wallet_token_account: wallet_token_account.map(|a| a.to_string()),
        done_marker: done_marker.map(|a| a.to_string()),
    })
}
