use anchor_lang::prelude::*;

use crate::errors::BattleflipError;
use crate::events::WinningsClaimed;
use crate::fees;
use crate::state::{Platform, Wager};
use crate::utils::transfer_from_escrow;

#[derive(Accounts)]
pub struct ClaimWinnings<'info> {
    #[account(
        mut,
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
        close = creator,
    )]
    pub wager: Account<'info, Wager>,

    /// The winner (only they may claim).
    #[account(mut)]
    pub winner: Signer<'info>,

    /// CHECK: Wager creator; receives the rent deposit when the wager closes.
    #[account(
        mut,
        address = wager.creator @ BattleflipError::WrongCreator,
    )]
    pub creator: UncheckedAccount<'info>,

    /// CHECK: Platform fee wallet.
    #[account(
        mut,
        address = platform.fee_destination @ BattleflipError::WrongFeeDestination,
    )]
    pub fee_destination: UncheckedAccount<'info>,
}

pub fn handler(ctx: Context<ClaimWinnings>) -> Result<()> {
    let wager = &ctx.accounts.wager;
    let winner = wager.authorize_claim(ctx.accounts.winner.key)?;

    let split = fees::claim_split(wager.principal, ctx.accounts.platform.fee_bps)?;

    let wager_info = wager.to_account_info();
    transfer_from_escrow(
        &wager_info,
        &ctx.accounts.winner.to_account_info(),
        split.payout,
    )?;
    transfer_from_escrow(
        &wager_info,
        &ctx.accounts.fee_destination.to_account_info(),
        split.fee,
    )?;

    ctx.accounts.platform.record_close()?;

    msg!(
        "Wager {} claimed: {} to winner, {} fee",
        wager.sequence_number,
        split.payout,
        split.fee
    );

    emit!(WinningsClaimed {
        wager: wager.key(),
        sequence_number: wager.sequence_number,
        winner,
        payout: split.payout,
        fee: split.fee,
    });

    Ok(())
}
