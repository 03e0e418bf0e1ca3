use anyhow::Result;
use spl_faucet_client::{AmountPolicy, FaucetConfig, MessageEncoding};

use crate::args::{Cli, Command};

mod addresses;
mod build;

pub async fn dispatch(cli: Cli) -> Result<()> {
    let config = faucet_config(&cli);
    match cli.command {
        Command::Airdrop(args) => build::run(&cli.url, config, build::Operation::Airdrop, &args).await,
        Command::Claim(args) => build::run(&cli.url, config, build::Operation::Claim, &args).await,
        Command::Addresses { mint, wallet } => addresses::run(&config, &mint, wallet.as_ref()),
    }
}

fn faucet_config(cli: &Cli) -> FaucetConfig {
    let mut config = FaucetConfig::default()
        .with_encoding(if cli.v0 { MessageEncoding::V0 } else { MessageEncoding::Legacy })
        .with_amount_policy(if cli.fixed_amount { AmountPolicy::ProgramFixed } else { AmountPolicy::Scaled })
        .with_claim_marker(cli.claim_marker);
    if let Some(program_id) = cli.program_id {
        config = config.with_program_id(program_id);
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use solana_sdk::pubkey::Pubkey;

    #[test]
    fn flags_map_onto_config() {
        let program_id = Pubkey::new_unique();
        let cli = Cli::try_parse_from([
            "spl-faucet",
            "--program-id",
            &program_id.to_string(),
            "--fixed-amount",
            "--claim-marker",
            "addresses",
            "--mint",
            &Pubkey::new_unique().to_string(),
        ])
        .unwrap();

        let config = faucet_config(&cli);
        assert_eq!(config.program_id, program_id);
        assert_eq!(config.amount_policy, AmountPolicy::ProgramFixed);
        assert_eq!(config.encoding, MessageEncoding::Legacy);
        assert!(config.claim_marker);
    }
}
