use anchor_lang::prelude::*;

use crate::config::BPS_DENOMINATOR;
use crate::errors::BattleflipError;

/// How an escrowed amount is divided between its owner and the fee destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Split {
    pub payout: u64,
    pub fee: u64,
}

/// Floor of `amount * bps / 10_000`.
pub fn bps_of(amount: u64, bps: u16) -> Result<u64> {
    let scaled = (amount as u128)
        .checked_mul(bps as u128)
        .ok_or(BattleflipError::MathOverflow)?
        / BPS_DENOMINATOR as u128;
    u64::try_from(scaled).map_err(|_| error!(BattleflipError::MathOverflow))
}

/// Splits `amount` so that `payout + fee == amount`; the rounding remainder
/// stays with the payout.
pub fn split(amount: u64, bps: u16) -> Result<Split> {
    let fee = bps_of(amount, bps)?;
    let payout = amount
        .checked_sub(fee)
        .ok_or(BattleflipError::MathOverflow)?;
    Ok(Split { payout, fee })
}

/// Both principals, as held by a decided wager.
pub fn pot(principal: u64) -> Result<u64> {
    let total = principal
        .checked_mul(2)
        .ok_or(BattleflipError::MathOverflow)?;
    Ok(total)
}

pub fn claim_split(principal: u64, fee_bps: u16) -> Result<Split> {
    split(pot(principal)?, fee_bps)
}

pub fn cancel_split(principal: u64, cancel_fee_bps: u16) -> Result<Split> {
    split(principal, cancel_fee_bps)
}
