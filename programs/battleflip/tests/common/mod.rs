#![allow(dead_code)]

use anchor_lang::solana_program::{account_info::AccountInfo, entrypoint::ProgramResult};
use anchor_lang::{AccountDeserialize, AnchorDeserialize, InstructionData, Space, ToAccountMetas};

use battleflip::config::PlatformConfig;
use battleflip::derivation::{platform_address, wager_address};
use battleflip::entropy::{most_recent_slot_hash, OutcomeSource, SlotHashEntropy};
use battleflip::state::{Face, JoinOutcome, Platform, Wager};

use solana_program_test::*;
use solana_sdk::{
    clock::Clock,
    instruction::{Instruction, InstructionError},
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    system_instruction, system_program, sysvar,
    transaction::{Transaction, TransactionError},
};

pub const MIN_PRINCIPAL: u64 = 1_000;
pub const FEE_BPS: u16 = 250;
pub const WALLET_LAMPORTS: u64 = 10_000_000_000;

// SlotHashes is empty at genesis.
const START_SLOT: u64 = 10;

// Anchor's entrypoint ties the slice and each AccountInfo to one lifetime.
fn process_instruction(program_id: &Pubkey, accounts: &[AccountInfo], data: &[u8]) -> ProgramResult {
    let accounts = Box::leak(Box::new(accounts.to_vec()));
    battleflip::entry(program_id, accounts, data)
}

pub struct Harness {
    pub ctx: ProgramTestContext,
    pub platform: Pubkey,
    pub fee_destination: Pubkey,
}

impl Harness {
    pub async fn start() -> Self {
        Self::start_with(PlatformConfig {
            fee_bps: FEE_BPS,
            cancel_fee_bps: 0,
            min_principal: MIN_PRINCIPAL,
        })
        .await
    }

    pub async fn start_with(config: PlatformConfig) -> Self {
        let program_test = ProgramTest::new(
            "battleflip",
            battleflip::ID,
            processor!(process_instruction),
        );
        let mut ctx = program_test.start_with_context().await;
        ctx.warp_to_slot(START_SLOT).unwrap();

        let (platform, _) = platform_address(&battleflip::ID);
        let mut harness = Self {
            ctx,
            platform,
            fee_destination: Pubkey::new_unique(),
        };

        // Fee proceeds are far below the rent-exempt minimum on their own.
        let fee_destination = harness.fee_destination;
        harness.airdrop(&fee_destination, 1_000_000_000).await;

        let authority = harness.ctx.payer.pubkey();
        let ix = Instruction {
            program_id: battleflip::ID,
            accounts: battleflip::accounts::InitializePlatform {
                platform,
                authority,
                fee_destination,
                system_program: system_program::ID,
            }
            .to_account_metas(None),
            data: battleflip::instruction::InitializePlatform { config }.data(),
        };
        harness.send(&[ix], &[]).await.unwrap();
        harness
    }

    pub async fn airdrop(&mut self, to: &Pubkey, lamports: u64) {
        let ix = system_instruction::transfer(&self.ctx.payer.pubkey(), to, lamports);
        self.send(&[ix], &[]).await.unwrap();
    }

    pub async fn wallet(&mut self) -> Keypair {
        let wallet = Keypair::new();
        self.airdrop(&wallet.pubkey(), WALLET_LAMPORTS).await;
        wallet
    }

    /// The context payer covers transaction fees, so player balances move
    /// only through the program.
    pub async fn send(
        &mut self,
        instructions: &[Instruction],
        signers: &[&Keypair],
    ) -> Result<(), BanksClientError> {
        let blockhash = self.ctx.banks_client.get_latest_blockhash().await?;
        let mut all: Vec<&Keypair> = vec![&self.ctx.payer];
        all.extend_from_slice(signers);
        let tx = Transaction::new_signed_with_payer(
            instructions,
            Some(&self.ctx.payer.pubkey()),
            all.as_slice(),
            blockhash,
        );
        self.ctx.banks_client.process_transaction(tx).await
    }

    /// Waits for a new blockhash so an identical transaction is not
    /// deduplicated.
    pub async fn refresh_blockhash(&mut self) {
        self.ctx.get_new_latest_blockhash().await.unwrap();
    }

    pub async fn balance(&mut self, key: &Pubkey) -> u64 {
        self.ctx.banks_client.get_balance(*key).await.unwrap()
    }

    pub async fn wager_rent(&mut self) -> u64 {
        let rent = self.ctx.banks_client.get_rent().await.unwrap();
        rent.minimum_balance(8 + Wager::INIT_SPACE)
    }

    pub async fn platform_state(&mut self) -> Platform {
        let account = self
            .ctx
            .banks_client
            .get_account(self.platform)
            .await
            .unwrap()
            .expect("platform exists");
        Platform::try_deserialize(&mut account.data.as_slice()).unwrap()
    }

    pub async fn wager_state(&mut self, wager: &Pubkey) -> Option<Wager> {
        let account = self.ctx.banks_client.get_account(*wager).await.unwrap()?;
        if account.owner != battleflip::ID {
            return None;
        }
        Wager::try_deserialize(&mut account.data.as_slice()).ok()
    }

    pub async fn next_wager_address(&mut self, creator: &Pubkey, label: &str) -> Pubkey {
        let sequence = self.platform_state().await.next_sequence();
        wager_address(&battleflip::ID, &self.platform, sequence, creator, label).0
    }

    pub fn create_ix(&self, creator: &Pubkey, wager: Pubkey, label: &str, principal: u64) -> Instruction {
        Instruction {
            program_id: battleflip::ID,
            accounts: battleflip::accounts::CreateWager {
                platform: self.platform,
                wager,
                creator: *creator,
                system_program: system_program::ID,
            }
            .to_account_metas(None),
            data: battleflip::instruction::CreateWager {
                label: label.to_string(),
                principal,
            }
            .data(),
        }
    }

    pub fn join_ix(&self, counterparty: &Pubkey, wager: Pubkey, choice: Face) -> Instruction {
        Instruction {
            program_id: battleflip::ID,
            accounts: battleflip::accounts::JoinWager {
                platform: self.platform,
                wager,
                counterparty: *counterparty,
                slot_hashes: sysvar::slot_hashes::ID,
                instructions: sysvar::instructions::ID,
                system_program: system_program::ID,
            }
            .to_account_metas(None),
            data: battleflip::instruction::JoinWager { choice }.data(),
        }
    }

    pub fn claim_ix(
        &self,
        winner: &Pubkey,
        wager: Pubkey,
        creator: &Pubkey,
        fee_destination: &Pubkey,
    ) -> Instruction {
        Instruction {
            program_id: battleflip::ID,
            accounts: battleflip::accounts::ClaimWinnings {
                platform: self.platform,
                wager,
                winner: *winner,
                creator: *creator,
                fee_destination: *fee_destination,
            }
            .to_account_metas(None),
            data: battleflip::instruction::ClaimWinnings {}.data(),
        }
    }

    pub fn cancel_ix(&self, creator: &Pubkey, wager: Pubkey) -> Instruction {
        Instruction {
            program_id: battleflip::ID,
            accounts: battleflip::accounts::CancelWager {
                platform: self.platform,
                wager,
                creator: *creator,
                fee_destination: self.fee_destination,
            }
            .to_account_metas(None),
            data: battleflip::instruction::CancelWager {}.data(),
        }
    }

    pub fn expire_ix(&self, caller: &Pubkey, wager: Pubkey, creator: &Pubkey) -> Instruction {
        Instruction {
            program_id: battleflip::ID,
            accounts: battleflip::accounts::ExpireWager {
                platform: self.platform,
                wager,
                creator: *creator,
                fee_destination: self.fee_destination,
                caller: *caller,
            }
            .to_account_metas(None),
            data: battleflip::instruction::ExpireWager {}.data(),
        }
    }

    pub async fn create(
        &mut self,
        creator: &Keypair,
        label: &str,
        principal: u64,
    ) -> Result<Pubkey, BanksClientError> {
        let wager = self.next_wager_address(&creator.pubkey(), label).await;
        let ix = self.create_ix(&creator.pubkey(), wager, label, principal);
        self.send(&[ix], &[creator]).await?;
        Ok(wager)
    }

    /// Joins and decodes the instruction's return data.
    pub async fn join(
        &mut self,
        counterparty: &Keypair,
        wager: Pubkey,
        choice: Face,
    ) -> Result<JoinOutcome, BanksClientError> {
        let ix = self.join_ix(&counterparty.pubkey(), wager, choice);
        let blockhash = self.ctx.banks_client.get_latest_blockhash().await?;
        let signers: [&Keypair; 2] = [&self.ctx.payer, counterparty];
        let tx = Transaction::new_signed_with_payer(
            &[ix],
            Some(&self.ctx.payer.pubkey()),
            &signers[..],
            blockhash,
        );
        let processed = self
            .ctx
            .banks_client
            .process_transaction_with_metadata(tx)
            .await?;
        processed
            .result
            .map_err(BanksClientError::TransactionError)?;
        let data = processed
            .metadata
            .and_then(|m| m.return_data)
            .expect("join_wager sets return data")
            .data;
        Ok(JoinOutcome::try_from_slice(&data).unwrap())
    }

    /// Recomputes the flip the program will draw for a join landing in the
    /// current bank.
    pub async fn upcoming_outcome(&mut self, wager: &Pubkey, counterparty: &Pubkey) -> Face {
        let sequence_number = self
            .wager_state(wager)
            .await
            .expect("open wager")
            .sequence_number;
        let slot_hashes = self
            .ctx
            .banks_client
            .get_account(sysvar::slot_hashes::ID)
            .await
            .unwrap()
            .expect("slot hashes sysvar");
        let recent = most_recent_slot_hash(&slot_hashes.data).unwrap();
        let clock: Clock = self.ctx.banks_client.get_sysvar().await.unwrap();
        SlotHashEntropy::mix(recent, &clock, wager, sequence_number, counterparty).decide()
    }

    pub async fn set_unix_timestamp(&mut self, unix_timestamp: i64) {
        let mut clock: Clock = self.ctx.banks_client.get_sysvar().await.unwrap();
        clock.unix_timestamp = unix_timestamp;
        self.ctx.set_sysvar(&clock);
    }
}

pub fn opposite(face: Face) -> Face {
    match face {
        Face::Heads => Face::Tails,
        Face::Tails => Face::Heads,
    }
}

/// Custom program error carried by a failed transaction.
pub fn error_code(err: BanksClientError) -> u32 {
    match err.unwrap() {
        TransactionError::InstructionError(_, InstructionError::Custom(code)) => code,
        other => panic!("expected a program error, got {other:?}"),
    }
}
