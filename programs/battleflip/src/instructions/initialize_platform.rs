use anchor_lang::prelude::*;

use crate::config::PlatformConfig;
use crate::events::PlatformInitialized;
use crate::state::Platform;

#[derive(Accounts)]
pub struct InitializePlatform<'info> {
    #[account(
        init,
        payer = authority,
        space = 8 + Platform::INIT_SPACE,
        seeds = [Platform::SEED],
        bump,
    )]
    pub platform: Account<'info, Platform>,

    #[account(mut)]
    pub authority: Signer<'info>,

    /// CHECK: Wallet that receives platform fees.
    pub fee_destination: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializePlatform>, config: PlatformConfig) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    let fee_destination = ctx.accounts.fee_destination.key();

    let platform = &mut ctx.accounts.platform;
    platform.initialize(authority, fee_destination, config, ctx.bumps.platform)?;

    msg!(
        "Platform initialized: fee {} bps, cancel fee {} bps, min principal {}",
        config.fee_bps,
        config.cancel_fee_bps,
        config.min_principal
    );

    emit!(PlatformInitialized {
        authority,
        fee_destination,
        fee_bps: config.fee_bps,
        cancel_fee_bps: config.cancel_fee_bps,
        min_principal: config.min_principal,
    });

    Ok(())
}
