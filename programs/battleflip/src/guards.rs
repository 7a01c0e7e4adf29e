//! Transaction-shape checks for `join_wager`.
//!
//! The flip is decided from state the joiner can read in the same slot. A
//! calling program could compute the outcome before choosing its face, and
//! an instruction placed after the join could abort the transaction on a
//! loss. So a join must be invoked directly by the transaction and must be
//! its last instruction.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{get_stack_height, TRANSACTION_LEVEL_STACK_HEIGHT};
use anchor_lang::solana_program::sysvar::instructions::load_current_index_checked;

use crate::errors::BattleflipError;

pub fn ensure_top_level(stack_height: usize) -> Result<()> {
    require!(
        stack_height <= TRANSACTION_LEVEL_STACK_HEIGHT,
        BattleflipError::CpiNotAllowed
    );
    Ok(())
}

/// Number of top-level instructions, from the leading `u16` of the
/// instructions sysvar.
pub fn instruction_count(data: &[u8]) -> Result<u16> {
    let bytes: [u8; 2] = data
        .get(0..2)
        .and_then(|b| b.try_into().ok())
        .ok_or(ProgramError::InvalidAccountData)?;
    Ok(u16::from_le_bytes(bytes))
}

pub fn ensure_last_instruction(current_index: u16, count: u16) -> Result<()> {
    require!(
        u32::from(current_index) + 1 >= u32::from(count),
        BattleflipError::TrailingInstruction
    );
    Ok(())
}

/// Runs both checks against the live runtime. The caller must have
/// constrained `instructions` to the instructions sysvar address.
pub fn ensure_final_direct_call(instructions: &AccountInfo) -> Result<()> {
    ensure_top_level(get_stack_height())?;
    let current_index = load_current_index_checked(instructions)?;
    let count = instruction_count(&instructions.try_borrow_data()?)?;
    ensure_last_instruction(current_index, count)
}
