use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::errors::BattleflipError;

/// Move lamports out of a program-owned escrow account.
pub fn transfer_from_escrow<'info>(
    escrow: &AccountInfo<'info>,
    to: &AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    let remaining = escrow
        .lamports()
        .checked_sub(amount)
        .ok_or(BattleflipError::InsufficientFunds)?;
    let credited = to
        .lamports()
        .checked_add(amount)
        .ok_or(BattleflipError::MathOverflow)?;
    **escrow.try_borrow_mut_lamports()? = remaining;
    **to.try_borrow_mut_lamports()? = credited;
    Ok(())
}

/// Move lamports from a wallet into escrow via the system program.
pub fn fund_escrow<'info>(
    from: &AccountInfo<'info>,
    escrow: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    require!(from.lamports() >= amount, BattleflipError::InsufficientFunds);
    system_program::transfer(
        CpiContext::new(
            system_program.clone(),
            system_program::Transfer {
                from: from.clone(),
                to: escrow.clone(),
            },
        ),
        amount,
    )
}

/// Allocate `space` bytes at a PDA and hand it to this program, with rent
/// paid by `payer`. Handles addresses that were pre-funded by a stranger.
pub fn create_pda_account<'info>(
    payer: &AccountInfo<'info>,
    account: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    space: usize,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    let required = Rent::get()?.minimum_balance(space);
    let current = account.lamports();

    if current == 0 {
        return system_program::create_account(
            CpiContext::new_with_signer(
                system_program.clone(),
                system_program::CreateAccount {
                    from: payer.clone(),
                    to: account.clone(),
                },
                signer_seeds,
            ),
            required,
            space as u64,
            &crate::ID,
        );
    }

    let top_up = required.saturating_sub(current);
    if top_up > 0 {
        fund_escrow(payer, account, system_program, top_up)?;
    }
    system_program::allocate(
        CpiContext::new_with_signer(
            system_program.clone(),
            system_program::Allocate {
                account_to_allocate: account.clone(),
            },
            signer_seeds,
        ),
        space as u64,
    )?;
    system_program::assign(
        CpiContext::new_with_signer(
            system_program.clone(),
            system_program::Assign {
                account_to_assign: account.clone(),
            },
            signer_seeds,
        ),
        &crate::ID,
    )
}
