use clap::{Args, Parser, Subcommand};
use solana_sdk::pubkey::Pubkey;
use spl_faucet_client::DEFAULT_RPC_URL;

#[derive(Parser, Debug, Clone)]
#[command(name = "spl-faucet", version, about = "Build unsigned SPL token faucet transactions")]
pub struct Cli {
    /// Emit JSON output on stdout.
    #[arg(long, global = true)]
    pub json: bool,

    /// RPC endpoint.
    #[arg(long, short = 'u', global = true, default_value = DEFAULT_RPC_URL)]
    pub url: String,

    /// Faucet program id (default: devnet deployment).
    #[arg(long, global = true)]
    pub program_id: Option<Pubkey>,

    /// Compile a version-0 message instead of a legacy one.
    #[arg(long, global = true)]
    pub v0: bool,

    /// The program distributes a fixed amount; no amount is sent.
    #[arg(long, global = true)]
    pub fixed_amount: bool,

    /// Claim writes a one-time done marker.
    #[arg(long, global = true)]
    pub claim_marker: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Mint tokens from the faucet to the wallet.
    Airdrop(FaucetArgs),

    /// Transfer tokens from the faucet vault to the wallet.
    Claim(FaucetArgs),

    /// Print the faucet addresses for a mint (no RPC).
    Addresses {
        #[arg(long)]
        mint: Pubkey,
        #[arg(long)]
        wallet: Option<Pubkey>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct FaucetArgs {
    /// Token mint.
    #[arg(long)]
    pub mint: Pubkey,

    /// UI amount, e.g. 1.5
    #[arg(long)]
    pub amount: Option<String>,

    /// Fee payer and recipient.
    #[arg(long)]
    pub wallet: Option<Pubkey>,
}
