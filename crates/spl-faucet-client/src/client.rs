//! Faucet client.
//!
//! The client can:
//! - derive the faucet PDAs and token addresses
//! - resolve (and plan creation of) the caller's token account
//! - build `airdrop` / `claim` transactions, unsigned, bound to a fresh blockhash
//!
//! Signing and submission belong to the caller.

use std::fmt;

use solana_program::pubkey::Pubkey;
use solana_sdk::transaction::VersionedTransaction;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use crate::amount::{self, UiAmount};
use crate::assembler::{self, InstructionPlan};
use crate::config::{validate_config, AmountPolicy, FaucetConfig};
use crate::error::{FaucetError, FaucetResult};
use crate::instruction::{self, AirdropAccounts, ClaimAccounts, DoneMarkerAccounts};
use crate::ledger::{Cancellable, LedgerReader};
use crate::pda;
use crate::resolver::{self, ResolvedAccount};

/// An unsigned faucet transaction and what went into it.
#[derive(Debug, Clone)]
pub struct FaucetTransaction {
    pub transaction: VersionedTransaction,
    pub user_token_account: Pubkey,
    /// The transaction creates `user_token_account` before the faucet call.
    pub creates_token_account: bool,
    /// Amount in base units, when the instruction carries one.
    pub amount: Option<u64>,
}

impl FaucetTransaction {
    pub fn instruction_count(&self) -> usize {
        self.transaction.message.instructions().len()
    }

    pub fn into_transaction(self) -> VersionedTransaction {
        self.transaction
    }
}

struct Prepared {
    wallet: Pubkey,
    plan: InstructionPlan,
    user_token_account: Pubkey,
    creates_token_account: bool,
    amount: Option<u64>,
}

pub struct FaucetClient<R> {
    reader: R,
    config: FaucetConfig,
    wallet: Option<Pubkey>,
    cancel: CancellationToken,
}

impl<R> fmt::Debug for FaucetClient<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FaucetClient")
            .field("config", &self.config)
            .field("wallet", &self.wallet)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}

impl<R: LedgerReader> FaucetClient<R> {
    pub fn new(reader: R, config: FaucetConfig) -> FaucetResult<Self> {
        validate_config(&config)?;
        Ok(Self { reader, config, wallet: None, cancel: CancellationToken::new() })
    }

    pub fn with_wallet(mut self, wallet: Pubkey) -> Self {
        self.wallet = Some(wallet);
        self
    }

    /// Abandon in-flight remote reads once `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn connect(&mut self, wallet: Pubkey) {
        self.wallet = Some(wallet);
    }

    pub fn disconnect(&mut self) {
        self.wallet = None;
    }

    pub fn config(&self) -> &FaucetConfig {
        &self.config
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    pub fn wallet_address(&self) -> FaucetResult<Pubkey> {
        self.wallet.ok_or(FaucetError::WalletNotConnected)
    }

    pub fn authority_address(&self) -> Pubkey {
        pda::derive_authority(&self.config.program_id).0
    }

    pub fn vault_address(&self, mint: &Pubkey) -> Pubkey {
        pda::pdas_for_mint(&self.config.program_id, &self.config.token_programs(), mint).vault
    }

    pub fn user_token_address(&self, mint: &Pubkey) -> FaucetResult<Pubkey> {
        let wallet = self.wallet_address()?;
        pda::derive_associated_token_address(mint, &wallet, &self.config.token_programs(), true)
    }

    pub fn done_marker_address(&self, mint: &Pubkey) -> FaucetResult<Pubkey> {
        let wallet = self.wallet_address()?;
        Ok(pda::derive_done_marker(&wallet, mint, &self.config.program_id).0)
    }

    /// Resolve the token account of `owner` (default: the wallet) for `mint`.
    pub async fn get_or_create_token_account(
        &self,
        mint: &Pubkey,
        owner: Option<&Pubkey>,
    ) -> FaucetResult<ResolvedAccount> {
        let wallet = self.wallet_address()?;
        let owner = owner.unwrap_or(&wallet);
        let reader = Cancellable::new(&self.reader, &self.cancel);
        resolver::resolve_or_create(&reader, &self.config, &wallet, mint, owner).await
    }

    pub async fn amount_in_base_units(&self, mint: &Pubkey, amount: &UiAmount) -> FaucetResult<u64> {
        let reader = Cancellable::new(&self.reader, &self.cancel);
        amount::normalize(&reader, mint, amount).await
    }

    /// Build an `airdrop` transaction minting to the wallet's token account.
    #[instrument(skip_all, fields(mint = %mint))]
    pub async fn airdrop(&self, mint: &Pubkey, amount: Option<&UiAmount>) -> FaucetResult<FaucetTransaction> {
        let mut prepared = self.prepare(mint, amount).await?;

        let accounts = AirdropAccounts {
            user_token_account: prepared.user_token_account,
            mint: *mint,
            mint_authority: self.authority_address(),
            token_program: self.config.token_program_id,
        };
        prepared.plan.push(instruction::airdrop(&self.config.program_id, &accounts, prepared.amount));

        self.finish(prepared).await
    }

    /// Build a `claim` transaction moving tokens from the faucet vault.
    #[instrument(skip_all, fields(mint = %mint))]
    pub async fn claim(&self, mint: &Pubkey, amount: Option<&UiAmount>) -> FaucetResult<FaucetTransaction> {
        let mut prepared = self.prepare(mint, amount).await?;

        let marker = self.config.claim_marker.then(|| DoneMarkerAccounts {
            user: prepared.wallet,
            done_marker: pda::derive_done_marker(&prepared.wallet, mint, &self.config.program_id).0,
        });
        let accounts = ClaimAccounts {
            user_token_account: prepared.user_token_account,
            vault_token_account: self.vault_address(mint),
            vault_authority: self.authority_address(),
            token_program: self.config.token_program_id,
            marker,
        };
        prepared.plan.push(instruction::claim(&self.config.program_id, &accounts, prepared.amount));

        self.finish(prepared).await
    }

    async fn prepare(&self, mint: &Pubkey, amount: Option<&UiAmount>) -> FaucetResult<Prepared> {
        let wallet = self.wallet_address()?;
        match (self.config.amount_policy, amount) {
            (AmountPolicy::Scaled, None) => {
                return Err(FaucetError::invalid_amount("an amount is required"));
            }
            (AmountPolicy::ProgramFixed, Some(amount)) => {
                return Err(FaucetError::invalid_amount(format!(
                    "{amount} requested but the program distributes a fixed amount"
                )));
            }
            _ => {}
        }

        let reader = Cancellable::new(&self.reader, &self.cancel);
        let resolve = resolver::resolve_or_create(&reader, &self.config, &wallet, mint, &wallet);
        let (resolved, units) = match amount {
            Some(amount) => {
                let (resolved, units) = tokio::join!(resolve, amount::normalize(&reader, mint, amount));
                (resolved?, Some(units?))
            }
            None => (resolve.await?, None),
        };

        let creates_token_account = resolved.needs_creation();
        let mut plan = InstructionPlan::new();
        let user_token_account = plan.add_account(resolved);
        debug!(%wallet, %user_token_account, creates_token_account, amount = ?units, "prepared faucet call");

        Ok(Prepared { wallet, plan, user_token_account, creates_token_account, amount: units })
    }

    async fn finish(&self, prepared: Prepared) -> FaucetResult<FaucetTransaction> {
        let reader = Cancellable::new(&self.reader, &self.cancel);
        let transaction =
            assembler::assemble(&reader, prepared.plan.into_instructions(), &prepared.wallet, self.config.encoding)
                .await?;
        Ok(FaucetTransaction {
            transaction,
            user_token_account: prepared.user_token_account,
            creates_token_account: prepared.creates_token_account,
            amount: prepared.amount,
        })
    }
}
