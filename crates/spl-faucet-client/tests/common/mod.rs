//! In-memory ledger for exercising the faucet client without a node.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use solana_sdk::account::Account;
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::transaction::VersionedTransaction;

use spl_faucet_client::{AccountFetch, LedgerError, LedgerReader, MintInfo};

pub struct FakeLedger {
    accounts: HashMap<Pubkey, AccountFetch>,
    mints: HashMap<Pubkey, u8>,
    pub blockhash: Hash,
    blockhash_error: Option<LedgerError>,
    stalled: bool,
    calls: AtomicUsize,
}

impl Default for FakeLedger {
    fn default() -> Self {
        Self {
            accounts: HashMap::new(),
            mints: HashMap::new(),
            blockhash: Hash::new_unique(),
            blockhash_error: None,
            stalled: false,
            calls: AtomicUsize::new(0),
        }
    }
}

impl FakeLedger {
    pub fn with_mint(mut self, mint: Pubkey, decimals: u8) -> Self {
        self.mints.insert(mint, decimals);
        self
    }

    pub fn with_token_account(mut self, address: Pubkey) -> Self {
        let account = Account {
            lamports: 2_039_280,
            data: vec![0; 165],
            owner: spl_token::id(),
            executable: false,
            rent_epoch: 0,
        };
        self.accounts.insert(address, AccountFetch::Found(account));
        self
    }

    pub fn with_read_error(mut self, address: Pubkey, err: LedgerError) -> Self {
        self.accounts.insert(address, AccountFetch::ReadError(err));
        self
    }

    pub fn with_blockhash_error(mut self, err: LedgerError) -> Self {
        self.blockhash_error = Some(err);
        self
    }

    /// Every read stays pending forever.
    pub fn stalled(mut self) -> Self {
        self.stalled = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn enter(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.stalled {
            std::future::pending::<()>().await;
        }
    }
}

#[async_trait]
impl LedgerReader for FakeLedger {
    async fn get_account(&self, address: &Pubkey) -> AccountFetch {
        self.enter().await;
        self.accounts.get(address).cloned().unwrap_or(AccountFetch::NotFound)
    }

    async fn get_mint_info(&self, mint: &Pubkey) -> Result<MintInfo, LedgerError> {
        self.enter().await;
        self.mints
            .get(mint)
            .map(|decimals| MintInfo { decimals: *decimals })
            .ok_or(LedgerError::AccountNotFound(*mint))
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, LedgerError> {
        self.enter().await;
        match &self.blockhash_error {
            Some(err) => Err(err.clone()),
            None => Ok(self.blockhash),
        }
    }
}

/// Program id invoked by each instruction, in order.
pub fn program_ids(tx: &VersionedTransaction) -> Vec<Pubkey> {
    let keys = tx.message.static_account_keys();
    tx.message.instructions().iter().map(|ix| keys[usize::from(ix.program_id_index)]).collect()
}

/// Accounts referenced by instruction `index`, in order.
pub fn instruction_accounts(tx: &VersionedTransaction, index: usize) -> Vec<Pubkey> {
    let keys = tx.message.static_account_keys();
    tx.message.instructions()[index].accounts.iter().map(|i| keys[usize::from(*i)]).collect()
}

pub fn instruction_data(tx: &VersionedTransaction, index: usize) -> Vec<u8> {
    tx.message.instructions()[index].data.clone()
}
