//! Remote ledger reads.
//!
//! `LedgerReader` is the seam between the faucet client and the network. The
//! account lookup reports absence as an explicit `AccountFetch::NotFound`
//! variant so callers never have to tell "missing" apart from "failed" by
//! inspecting error values.

use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_program::program_pack::Pack;
use solana_program::pubkey::Pubkey;
use solana_sdk::account::Account;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::hash::Hash;
use spl_token::state::Mint;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::LedgerError;

/// Outcome of a single account read.
#[derive(Debug, Clone, PartialEq)]
pub enum AccountFetch {
    Found(Account),
    NotFound,
    ReadError(LedgerError),
}

/// Mint metadata needed by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintInfo {
    pub decimals: u8,
}

#[async_trait]
pub trait LedgerReader: Send + Sync {
    async fn get_account(&self, address: &Pubkey) -> AccountFetch;

    async fn get_mint_info(&self, mint: &Pubkey) -> Result<MintInfo, LedgerError>;

    async fn get_latest_blockhash(&self) -> Result<Hash, LedgerError>;
}

/// Decode mint metadata from a raw account owned by `token_program_id`.
pub fn mint_info_from_account(
    mint: &Pubkey,
    account: &Account,
    token_program_id: &Pubkey,
) -> Result<MintInfo, LedgerError> {
    if account.owner != *token_program_id {
        return Err(LedgerError::malformed(*mint, format!("owned by {}, not the token program", account.owner)));
    }
    let data = account
        .data
        .get(..Mint::LEN)
        .ok_or_else(|| LedgerError::malformed(*mint, format!("{} bytes is too short for a mint", account.data.len())))?;
    let state = Mint::unpack(data).map_err(|e| LedgerError::malformed(*mint, e.to_string()))?;
    Ok(MintInfo { decimals: state.decimals })
}

/// `LedgerReader` backed by a JSON-RPC node.
pub struct RpcLedgerReader {
    rpc: RpcClient,
    token_program_id: Pubkey,
}

impl RpcLedgerReader {
    pub fn new(rpc_url: &str, commitment: CommitmentConfig) -> Self {
        Self::from_client(RpcClient::new_with_commitment(rpc_url.to_string(), commitment))
    }

    pub fn from_client(rpc: RpcClient) -> Self {
        Self { rpc, token_program_id: spl_token::id() }
    }

    pub fn with_token_program(mut self, token_program_id: Pubkey) -> Self {
        self.token_program_id = token_program_id;
        self
    }

    pub fn url(&self) -> String {
        self.rpc.url()
    }
}

#[async_trait]
impl LedgerReader for RpcLedgerReader {
    async fn get_account(&self, address: &Pubkey) -> AccountFetch {
        debug!(%address, "getAccountInfo");
        match self.rpc.get_account_with_commitment(address, self.rpc.commitment()).await {
            Ok(response) => match response.value {
                Some(account) => AccountFetch::Found(account),
                None => AccountFetch::NotFound,
            },
            Err(err) => {
                warn!(%address, error = %err, "account read failed");
                AccountFetch::ReadError(LedgerError::transport(err.to_string()))
            }
        }
    }

    async fn get_mint_info(&self, mint: &Pubkey) -> Result<MintInfo, LedgerError> {
        match self.get_account(mint).await {
            AccountFetch::Found(account) => mint_info_from_account(mint, &account, &self.token_program_id),
            AccountFetch::NotFound => Err(LedgerError::AccountNotFound(*mint)),
            AccountFetch::ReadError(err) => Err(err),
        }
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, LedgerError> {
        debug!("getLatestBlockhash");
        self.rpc.get_latest_blockhash().await.map_err(|err| {
            warn!(error = %err, "blockhash fetch failed");
            LedgerError::transport(err.to_string())
        })
    }
}

/// Reader that abandons in-flight reads once `token` is cancelled.
pub struct Cancellable<'a, R: ?Sized> {
    inner: &'a R,
    token: &'a CancellationToken,
}

impl<'a, R: ?Sized> Cancellable<'a, R> {
    pub fn new(inner: &'a R, token: &'a CancellationToken) -> Self {
        Self { inner, token }
    }
}

#[async_trait]
impl<'a, R> LedgerReader for Cancellable<'a, R>
where
    R: LedgerReader + ?Sized,
{
    async fn get_account(&self, address: &Pubkey) -> AccountFetch {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => AccountFetch::ReadError(LedgerError::Cancelled),
            fetch = self.inner.get_account(address) => fetch,
        }
    }

    async fn get_mint_info(&self, mint: &Pubkey) -> Result<MintInfo, LedgerError> {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(LedgerError::Cancelled),
            info = self.inner.get_mint_info(mint) => info,
        }
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, LedgerError> {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(LedgerError::Cancelled),
            hash = self.inner.get_latest_blockhash() => hash,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use solana_program::program_option::COption;

    fn mint_account(decimals: u8, owner: Pubkey) -> Account {
        let mut data = vec![0u8; Mint::LEN];
        let state = Mint {
            mint_authority: COption::Some(Pubkey::new_unique()),
            supply: 0,
            decimals,
            is_initialized: true,
            freeze_authority: COption::None,
        };
        Mint::pack(state, &mut data).unwrap();
        Account { lamports: 1, data, owner, executable: false, rent_epoch: 0 }
    }

    #[test]
    fn decodes_mint_decimals() {
        let mint = Pubkey::new_unique();
        let info = mint_info_from_account(&mint, &mint_account(6, spl_token::id()), &spl_token::id()).unwrap();
        assert_eq!(info, MintInfo { decimals: 6 });
    }

    #[test]
    fn rejects_foreign_or_short_mints() {
        let mint = Pubkey::new_unique();
        assert_matches!(
            mint_info_from_account(&mint, &mint_account(6, Pubkey::new_unique()), &spl_token::id()),
            Err(LedgerError::Malformed { .. })
        );

        let mut short = mint_account(6, spl_token::id());
        short.data.truncate(10);
        assert_matches!(
            mint_info_from_account(&mint, &short, &spl_token::id()),
            Err(LedgerError::Malformed { .. })
        );
    }
}
