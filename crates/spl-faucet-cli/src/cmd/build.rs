use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::info;

use spl_faucet_client::{FaucetClient, FaucetConfig, RpcLedgerReader, UiAmount};

use crate::args::FaucetArgs;
use crate::output;

#[derive(Debug, Clone, Copy)]
pub enum Operation {
    Airdrop,
    Claim,
}

impl Operation {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Airdrop => "airdrop",
            Self::Claim => "claim",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BuildOut {
    pub operation: String,
    pub rpc_url: String,
    pub program_id: String,
    pub mint: String,
    pub wallet: String,
    pub user_token_account: String,
    pub creates_token_account: bool,
    pub amount: Option<u64>,
    pub encoding: String,
    pub instructions: usize,
    /// Unsigned transaction, bincode wire format, base64.
    pub transaction: String,
}

pub async fn run(rpc_url: &str, config: FaucetConfig, op: Operation, args: &FaucetArgs) -> Result<()> {
    let amount = args
        .amount
        .as_deref()
        .map(str::parse::<UiAmount>)
        .transpose()
        .context("parse --amount")?;

    let reader = RpcLedgerReader::new(rpc_url, config.commitment).with_token_program(config.token_program_id);
    let mut client = FaucetClient::new(reader, config)?;
    if let Some(wallet) = args.wallet {
        client.connect(wallet);
    }

    let cancel = CancellationToken::new();
    let client = client.with_cancellation(cancel.clone());
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    let built = match op {
        Operation::Airdrop => client.airdrop(&args.mint, amount.as_ref()).await,
        Operation::Claim => client.claim(&args.mint, amount.as_ref()).await,
    };
    ctrl_c.abort();
    let built = built.with_context(|| format!("build {} transaction", op.as_str()))?;

    let wire = bincode::serialize(&built.transaction).context("serialize transaction")?;
    info!(bytes = wire.len(), "transaction ready for signing");

    output::print(&BuildOut {
        operation: op.as_str().to_string(),
        rpc_url: client.reader().url(),
        program_id: client.config().program_id.to_string(),
        mint: args.mint.to_string(),
        wallet: client.wallet_address()?.to_string(),
        user_token_account: built.user_token_account.to_string(),
        creates_token_account: built.creates_token_account,
        amount: built.amount,
        encoding: client.config().encoding.as_str().to_string(),
        instructions: built.instruction_count(),
        transaction: STANDARD.encode(wire),
    })
}
