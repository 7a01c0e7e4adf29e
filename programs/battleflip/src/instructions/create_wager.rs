use anchor_lang::prelude::*;

use crate::config::{validate_label, validate_principal};
use crate::derivation::{ensure_derived, ensure_vacant, wager_address};
use crate::errors::BattleflipError;
use crate::events::WagerCreated;
use crate::state::{Platform, Wager};
use crate::utils::{create_pda_account, fund_escrow};

#[derive(Accounts)]
pub struct CreateWager<'info> {
    #[account(
        mut,
        seeds = [Platform::SEED],
        bump = platform.bump,
    )]
    pub platform: Account<'info, Platform>,

    /// CHECK: Derived and checked for vacancy in the handler so a stale
    /// sequence number is reported as a conflict instead of a seeds error.
    #[account(mut)]
    pub wager: UncheckedAccount<'info>,

    /// Creator funds the principal and the rent deposit.
    #[account(mut)]
    pub creator: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<CreateWager>, label: String, principal: u64) -> Result<Pubkey> {
    let config = ctx.accounts.platform.config();
    validate_label(&label)?;
    validate_principal(principal, &config)?;

    let wager_info = ctx.accounts.wager.to_account_info();
    ensure_vacant(wager_info.owner, wager_info.data_len())?;

    let platform_key = ctx.accounts.platform.key();
    let creator_key = ctx.accounts.creator.key();
    let sequence_number = ctx.accounts.platform.next_sequence();
    let (expected, bump) = wager_address(
        ctx.program_id,
        &platform_key,
        sequence_number,
        &creator_key,
        &label,
    );
    ensure_derived(wager_info.key, &expected)?;

    let space = 8 + Wager::INIT_SPACE;
    let rent_due = Rent::get()?
        .minimum_balance(space)
        .saturating_sub(wager_info.lamports());
    let needed = rent_due
        .checked_add(principal)
        .ok_or(BattleflipError::MathOverflow)?;
    require!(
        ctx.accounts.creator.lamports() >= needed,
        BattleflipError::InsufficientFunds
    );

    let creator_info = ctx.accounts.creator.to_account_info();
    let system_info = ctx.accounts.system_program.to_account_info();

    let sequence_bytes = sequence_number.to_le_bytes();
    let bump_bytes = [bump];
    let signer_seeds: &[&[&[u8]]] = &[&[
        Wager::SEED,
        platform_key.as_ref(),
        &sequence_bytes,
        creator_key.as_ref(),
        label.as_bytes(),
        &bump_bytes,
    ]];

    create_pda_account(&creator_info, &wager_info, &system_info, space, signer_seeds)?;
    fund_escrow(&creator_info, &wager_info, &system_info, principal)?;

    let clock = Clock::get()?;
    let wager = Wager::open(
        sequence_number,
        creator_key,
        label,
        principal,
        clock.unix_timestamp,
        bump,
    );
    {
        let mut data = wager_info.try_borrow_mut_data()?;
        wager.try_serialize(&mut &mut data[..])?;
    }

    ctx.accounts.platform.record_creation(principal)?;

    msg!("Wager {} created: {}", sequence_number, wager.label);

    emit!(WagerCreated {
        wager: expected,
        sequence_number,
        creator: creator_key,
        label: wager.label,
        principal,
        created_at: wager.created_at,
    });

    Ok(expected)
}
