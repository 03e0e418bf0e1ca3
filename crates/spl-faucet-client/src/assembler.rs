//! Transaction assembly.

use std::collections::HashSet;

use solana_program::instruction::Instruction;
use solana_program::pubkey::Pubkey;
use solana_sdk::hash::Hash;
use solana_sdk::message::{v0, Message, VersionedMessage};
use solana_sdk::signature::Signature;
use solana_sdk::transaction::VersionedTransaction;
use tracing::info;

use crate::config::MessageEncoding;
use crate::error::{FaucetError, FaucetResult};
use crate::ledger::LedgerReader;
use crate::resolver::ResolvedAccount;

/// Ordered instructions for one transaction.
///
/// Each token account gets at most one creation instruction, placed before
/// anything pushed after it.
#[derive(Debug, Default)]
pub struct InstructionPlan {
    instructions: Vec<Instruction>,
    created: HashSet<Pubkey>,
}

impl InstructionPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the creation instruction of `account`, if any, and return its address.
    pub fn add_account(&mut self, account: ResolvedAccount) -> Pubkey {
        if let Some(ix) = account.creation_instruction {
            if self.created.insert(account.address) {
                self.instructions.push(ix);
            }
        }
        account.address
    }

    pub fn push(&mut self, ix: Instruction) {
        self.instructions.push(ix);
    }

    pub fn into_instructions(self) -> Vec<Instruction> {
        self.instructions
    }
}

/// Compile `instructions` into an unsigned transaction paid by `payer`.
pub fn compile(
    instructions: &[Instruction],
    payer: &Pubkey,
    blockhash: Hash,
    encoding: MessageEncoding,
) -> FaucetResult<VersionedTransaction> {
    let message = match encoding {
        MessageEncoding::Legacy => {
            VersionedMessage::Legacy(Message::new_with_blockhash(instructions, Some(payer), &blockhash))
        }
        MessageEncoding::V0 => VersionedMessage::V0(
            v0::Message::try_compile(payer, instructions, &[], blockhash)
                .map_err(|e| FaucetError::MessageCompile(e.to_string()))?,
        ),
    };
    let signatures = vec![Signature::default(); usize::from(message.header().num_required_signatures)];
    Ok(VersionedTransaction { signatures, message })
}

/// Fetch a fresh blockhash and compile an unsigned transaction.
///
/// No retry is attempted when the blockhash fetch fails.
pub async fn assemble<R>(
    reader: &R,
    instructions: Vec<Instruction>,
    payer: &Pubkey,
    encoding: MessageEncoding,
) -> FaucetResult<VersionedTransaction>
where
    R: LedgerReader + ?Sized,
{
    let blockhash = reader.get_latest_blockhash().await?;
    let tx = compile(&instructions, payer, blockhash, encoding)?;
    info!(
        %payer,
        %blockhash,
        encoding = encoding.as_str(),
        instructions = instructions.len(),
        "assembled unsigned transaction"
    );
    Ok(tx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use solana_program::instruction::AccountMeta;

    fn noop(program_id: Pubkey, tag: u8) -> Instruction {
        Instruction::new_with_bytes(program_id, &[tag], vec![AccountMeta::new(Pubkey::new_unique(), false)])
    }

    #[test]
    fn plan_keeps_one_creation_per_account() {
        let address = Pubkey::new_unique();
        let create = noop(Pubkey::new_unique(), 0);
        let resolved = ResolvedAccount { address, creation_instruction: Some(create.clone()) };

        let mut plan = InstructionPlan::new();
        assert_eq!(plan.add_account(resolved.clone()), address);
        assert_eq!(plan.add_account(resolved), address);
        plan.push(noop(Pubkey::new_unique(), 1));

        let ixs = plan.into_instructions();
        assert_eq!(ixs.len(), 2);
        assert_eq!(ixs[0], create);
    }

    #[test]
    fn compile_preserves_payer_order_and_blockhash() {
        let payer = Pubkey::new_unique();
        let blockhash = Hash::new_unique();
        let (a, b) = (Pubkey::new_unique(), Pubkey::new_unique());
        let ixs = vec![noop(a, 1), noop(b, 2)];

        for encoding in [MessageEncoding::Legacy, MessageEncoding::V0] {
            let tx = compile(&ixs, &payer, blockhash, encoding).unwrap();
            let keys = tx.message.static_account_keys();
            assert_eq!(keys[0], payer);
            assert_eq!(*tx.message.recent_blockhash(), blockhash);
            assert_eq!(tx.signatures, vec![Signature::default()]);

            let programs: Vec<Pubkey> = tx
                .message
                .instructions()
                .iter()
                .map(|ix| keys[usize::from(ix.program_id_index)])
                .collect();
            assert_eq!(programs, vec![a, b]);
            assert_eq!(tx.message.instructions()[0].data, vec![1u8]);
        }
    }

    #[test]
    fn encoding_selects_message_version() {
        let payer = Pubkey::new_unique();
        let ixs = vec![noop(Pubkey::new_unique(), 0)];
        let legacy = compile(&ixs, &payer, Hash::default(), MessageEncoding::Legacy).unwrap();
        let v0 = compile(&ixs, &payer, Hash::default(), MessageEncoding::V0).unwrap();
        assert_matches!(legacy.message, VersionedMessage::Legacy(_));
        assert_matches!(v0.message, VersionedMessage::V0(_));
    }
}
