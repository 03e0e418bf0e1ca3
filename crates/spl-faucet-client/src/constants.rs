//! Constants shared between the on-chain faucet program and clients.
//!
//! Keep these stable because they affect PDA derivation.

use solana_program::pubkey;
use solana_program::pubkey::Pubkey;

/// PDA seed for the faucet authority (mint authority and vault owner).
pub const SEED_FAUCET_AUTHORITY: &[u8] = b"Faucet Authority";

/// Default faucet program id (devnet deployment).
pub const DEFAULT_PROGRAM_ID: Pubkey = pubkey!("GLAiyTqs45dw1Nm1WtxLYorPaE9j38EP1T3CJaf1AuQX");

/// Default RPC endpoint used by the CLI.
pub const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";

/// Instruction names as declared by the program. Their discriminators are
/// derived from these, so they must match the program's method names.
pub const IX_AIRDROP: &str = "airdrop";
pub const IX_CLAIM: &str = "claim";

/// Namespace prefix used for instruction discriminators.
pub const DISCRIMINATOR_NAMESPACE: &str = "global";
