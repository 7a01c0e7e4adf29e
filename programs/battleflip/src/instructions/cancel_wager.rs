use anchor_lang::prelude::*;

use crate::errors::BattleflipError;
use crate::events::WagerCancelled;
use crate::fees;
use crate::state::{Platform, Wager};
use crate::utils::transfer_from_escrow;

#[derive(Accounts)]
pub struct CancelWager<'info> {
    #[account(
        mut,
        seeds = [Platform::SEED],
        bump = platform.bump,
    )]
    pub platform: Account<'info, Platform>,

    // No has_one here: the open-state check must run before the creator check.
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

    #[account(mut)]
    pub creator: Signer<'info>,

    /// CHECK: Platform fee wallet.
    #[account(
        mut,
        address = platform.fee_destination @ BattleflipError::WrongFeeDestination,
    )]
    pub fee_destination: UncheckedAccount<'info>,
}

pub fn handler(ctx: Context<CancelWager>) -> Result<()> {
    let wager = &ctx.accounts.wager;
    wager.authorize_cancel(ctx.accounts.creator.key)?;

    let split = fees::cancel_split(wager.principal, ctx.accounts.platform.cancel_fee_bps)?;

    let wager_info = wager.to_account_info();
    transfer_from_escrow(
        &wager_info,
        &ctx.accounts.creator.to_account_info(),
        split.payout,
    )?;
    transfer_from_escrow(
        &wager_info,
        &ctx.accounts.fee_destination.to_account_info(),
        split.fee,
    )?;

    ctx.accounts.platform.record_close()?;

    msg!("Wager {} cancelled: {}", wager.sequence_number, wager.label);

    emit!(WagerCancelled {
        wager: wager.key(),
        sequence_number: wager.sequence_number,
        creator: wager.creator,
        refund: split.payout,
        fee: split.fee,
    });

    Ok(())
}
