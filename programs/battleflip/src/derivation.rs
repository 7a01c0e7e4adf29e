//! PDA derivation for the platform singleton and per-wager escrow accounts.
//!
//! Wager seeds: `["wager", platform, sequence_number (u64 LE), creator, label]`.
//! The sequence number is `Platform::total_wagers_created` at creation, so a
//! client working from a stale platform snapshot derives an address the
//! program will refuse.

use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::errors::BattleflipError;
use crate::state::{Platform, Wager};

pub fn platform_address(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[Platform::SEED], program_id)
}

pub fn wager_address(
    program_id: &Pubkey,
    platform: &Pubkey,
    sequence_number: u64,
    creator: &Pubkey,
    label: &str,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            Wager::SEED,
            platform.as_ref(),
            &sequence_number.to_le_bytes(),
            creator.as_ref(),
            label.as_bytes(),
        ],
        program_id,
    )
}

/// An address is free while it is system-owned and carries no data. Stray
/// lamports sent there beforehand do not make it occupied.
pub fn ensure_vacant(owner: &Pubkey, data_len: usize) -> Result<()> {
    require!(
        *owner == system_program::ID && data_len == 0,
        BattleflipError::AddressAlreadyInUse
    );
    Ok(())
}

pub fn ensure_derived(supplied: &Pubkey, expected: &Pubkey) -> Result<()> {
    require_keys_eq!(*supplied, *expected, BattleflipError::WagerAddressMismatch);
    Ok(())
}
