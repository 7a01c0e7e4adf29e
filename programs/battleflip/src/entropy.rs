//! Coin-flip randomness.
//!
//! The settlement path only sees [`OutcomeSource`]. On chain the outcome is
//! drawn inside `join_wager` from the newest `SlotHashes` entry, the current
//! clock, and the join's own keys, mixed with blake3. Nothing about it is
//! fixed when the wager is created, and anyone can recompute the digest from
//! the slot the join landed in.
//!
//! Every input is readable by other code running in the same slot, so the
//! join handler first runs [`crate::guards::ensure_final_direct_call`]: no
//! calling program can compute the face before choosing, and no later
//! instruction can revert a loss.

use anchor_lang::prelude::*;

use crate::errors::BattleflipError;
use crate::state::Face;

/// Size of one `(Slot, Hash)` entry in the `SlotHashes` sysvar.
const SLOT_HASH_ENTRY_LEN: usize = 8 + 32;

pub trait OutcomeSource {
    fn decide(&self) -> Face;
}

/// Lowest bit of the digest: 0 is heads, 1 is tails.
pub fn face_from_seed(seed: &[u8; 32]) -> Face {
    if seed[0] & 1 == 0 {
        Face::Heads
    } else {
        Face::Tails
    }
}

/// Returns `(slot, hash)` of the newest entry in raw `SlotHashes` data.
pub fn most_recent_slot_hash(data: &[u8]) -> Result<(u64, [u8; 32])> {
    let len_bytes: [u8; 8] = data
        .get(0..8)
        .and_then(|b| b.try_into().ok())
        .ok_or(BattleflipError::EntropyUnavailable)?;
    require!(
        u64::from_le_bytes(len_bytes) > 0,
        BattleflipError::EntropyUnavailable
    );

    let entry = data
        .get(8..8 + SLOT_HASH_ENTRY_LEN)
        .ok_or(BattleflipError::EntropyUnavailable)?;
    let (slot_bytes, hash_bytes) = entry.split_at(8);

    let mut slot = [0u8; 8];
    slot.copy_from_slice(slot_bytes);
    let mut hash = [0u8; 32];
    hash.copy_from_slice(hash_bytes);
    Ok((u64::from_le_bytes(slot), hash))
}

pub struct SlotHashEntropy {
    seed: [u8; 32],
}

impl SlotHashEntropy {
    /// Reads the `SlotHashes` sysvar. The caller must have checked its address.
    pub fn sample(
        slot_hashes: &AccountInfo,
        clock: &Clock,
        wager: &Pubkey,
        sequence_number: u64,
        counterparty: &Pubkey,
    ) -> Result<Self> {
        let data = slot_hashes.try_borrow_data()?;
        let recent = most_recent_slot_hash(&data)?;
        Ok(Self::mix(recent, clock, wager, sequence_number, counterparty))
    }

    // blake3( recent_hash || recent_slot || clock_slot || unix_ts || wager || seq || counterparty )
    pub fn mix(
        recent: (u64, [u8; 32]),
        clock: &Clock,
        wager: &Pubkey,
        sequence_number: u64,
        counterparty: &Pubkey,
    ) -> Self {
        let (recent_slot, recent_hash) = recent;
        let mut hasher = blake3::Hasher::new();
        hasher.update(&recent_hash);
        hasher.update(&recent_slot.to_le_bytes());
        hasher.update(&clock.slot.to_le_bytes());
        hasher.update(&clock.unix_timestamp.to_le_bytes());
        hasher.update(wager.as_ref());
        hasher.update(&sequence_number.to_le_bytes());
        hasher.update(counterparty.as_ref());
        Self {
            seed: *hasher.finalize().as_bytes(),
        }
    }

    pub fn seed(&self) -> &[u8; 32] {
        &self.seed
    }
}

impl OutcomeSource for SlotHashEntropy {
    fn decide(&self) -> Face {
        face_from_seed(&self.seed)
    }
}

/// Deterministic stand-in for tests.
#[cfg(test)]
pub struct FixedOutcome(pub Face);

#[cfg(test)]
impl OutcomeSource for FixedOutcome {
    fn decide(&self) -> Face {
        self.0
    }
}
