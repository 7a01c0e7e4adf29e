use anchor_lang::prelude::*;

use crate::errors::BattleflipError;
use crate::events::WagerExpired;
use crate::fees;
use crate::state::{Platform, Wager};
use crate::utils::transfer_from_escrow;

/// Reaper path for stale lobbies. Anyone may call it once an open wager is
/// past `WAGER_EXPIRY_SECONDS`; funds move exactly as in `cancel_wager`.
#[derive(Accounts)]
pub struct ExpireWager<'info> {
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

    /// CHECK: Wager creator; receives the refund and the rent deposit.
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

    /// Anyone (permissionless).
    pub caller: Signer<'info>,
}

pub fn handler(ctx: Context<ExpireWager>) -> Result<()> {
    let clock = Clock::get()?;
    let wager = &ctx.accounts.wager;
    wager.authorize_expiry(clock.unix_timestamp)?;

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

    msg!(
        "Wager {} expired after {}s",
        wager.sequence_number,
        clock.unix_timestamp.saturating_sub(wager.created_at)
    );

    emit!(WagerExpired {
        wager: wager.key(),
        sequence_number: wager.sequence_number,
        creator: wager.creator,
        closed_by: ctx.accounts.caller.key(),
        refund: split.payout,
        fee: split.fee,
    });

    Ok(())
}
