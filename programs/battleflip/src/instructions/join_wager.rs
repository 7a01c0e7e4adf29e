use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar::{instructions as instructions_sysvar, slot_hashes};

use crate::entropy::SlotHashEntropy;
use crate::errors::BattleflipError;
use crate::events::WagerDecided;
use crate::guards::ensure_final_direct_call;
use crate::state::{Face, JoinOutcome, Platform, Wager};
use crate::utils::fund_escrow;

#[derive(Accounts)]
pub struct JoinWager<'info> {
    #[account(
        seeds = [Platform::SEED],
        bump = platform.bump,
    )]
    pub platform: Account<'info, Platform>,

    #[account(
        mut,
        seeds = [
            Wager::SEED,
            platform.key().as_ref(),
            wager.sequence_number.to_le_bytes().as_ref(),
            wager.creator.as_ref(),
            wager.label.as_bytes(),
        ],
        bump = wager.bump,
        constraint = wager.is_open() @ BattleflipError::WagerNotOpen,
    )]
    pub wager: Account<'info, Wager>,

    /// The joining player; matches the principal.
    #[account(mut)]
    pub counterparty: Signer<'info>,

    /// CHECK: address constrained to the sysvar.
    #[account(address = slot_hashes::ID)]
    pub slot_hashes: UncheckedAccount<'info>,

    /// CHECK: address constrained to the sysvar.
    #[account(address = instructions_sysvar::ID)]
    pub instructions: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<JoinWager>, choice: Face) -> Result<JoinOutcome> {
    ensure_final_direct_call(&ctx.accounts.instructions.to_account_info())?;

    let counterparty_key = ctx.accounts.counterparty.key();
    let wager_key = ctx.accounts.wager.key();
    let principal = ctx.accounts.wager.principal;

    require!(
        ctx.accounts.counterparty.lamports() >= principal,
        BattleflipError::InsufficientFunds
    );
    fund_escrow(
        &ctx.accounts.counterparty.to_account_info(),
        &ctx.accounts.wager.to_account_info(),
        &ctx.accounts.system_program.to_account_info(),
        principal,
    )?;

    let clock = Clock::get()?;
    let entropy = SlotHashEntropy::sample(
        &ctx.accounts.slot_hashes.to_account_info(),
        &clock,
        &wager_key,
        ctx.accounts.wager.sequence_number,
        &counterparty_key,
    )?;

    let wager = &mut ctx.accounts.wager;
    let result = wager.join(counterparty_key, choice, &entropy)?;

    msg!(
        "Wager {} decided! Choice: {:?}, Result: {:?}, Winner: {}",
        wager.sequence_number,
        choice,
        result.outcome,
        result.winner
    );

    emit!(WagerDecided {
        wager: wager_key,
        sequence_number: wager.sequence_number,
        creator: wager.creator,
        counterparty: counterparty_key,
        counterparty_choice: choice,
        outcome: result.outcome,
        winner: result.winner,
        slot: clock.slot,
    });

    Ok(result)
}
