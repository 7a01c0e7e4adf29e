use anchor_lang::prelude::*;

pub mod config;
pub mod derivation;
pub mod entropy;
pub mod errors;
pub mod events;
pub mod fees;
pub mod guards;
pub mod instructions;
pub mod state;
pub mod utils;

use config::PlatformConfig;
use instructions::*;
use state::{Face, JoinOutcome};

declare_id!("mWishTAXRe8gdGcqF6VqYW3JL1CkHU5waMfkM9VTVmg");

#[program]
pub mod battleflip {
    use super::*;

    /// One-time platform initialization.
    pub fn initialize_platform(
        ctx: Context<InitializePlatform>,
        config: PlatformConfig,
    ) -> Result<()> {
        instructions::initialize_platform::handler(ctx, config)
    }

    /// Open a lobby and escrow the creator's principal. Returns the wager address.
    pub fn create_wager(
        ctx: Context<CreateWager>,
        label: String,
        principal: u64,
    ) -> Result<Pubkey> {
        instructions::create_wager::handler(ctx, label, principal)
    }

    /// Match the principal and flip. The outcome is decided in this instruction,
    /// which must be the final, top-level instruction of its transaction.
    pub fn join_wager(ctx: Context<JoinWager>, choice: Face) -> Result<JoinOutcome> {
        instructions::join_wager::handler(ctx, choice)
    }

    /// Winner takes the pot minus the platform fee; rent returns to the creator.
    pub fn claim_winnings(ctx: Context<ClaimWinnings>) -> Result<()> {
        instructions::claim_winnings::handler(ctx)
    }

    /// Creator closes a lobby nobody has joined.
    pub fn cancel_wager(ctx: Context<CancelWager>) -> Result<()> {
        instructions::cancel_wager::handler(ctx)
    }

    /// Anyone closes an open lobby older than 24 hours, refunding the creator.
    pub fn expire_wager(ctx: Context<ExpireWager>) -> Result<()> {
        instructions::expire_wager::handler(ctx)
    }
}
