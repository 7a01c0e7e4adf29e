use anchor_lang::prelude::*;

use crate::config::PlatformConfig;
use crate::errors::BattleflipError;

#[account]
#[derive(InitSpace, Debug)]
pub struct Platform {
    /// Deployer; only used at initialization.
    pub authority: Pubkey,
    /// Wallet that receives claim and cancellation fees.
    pub fee_destination: Pubkey,
    /// Running count of wagers created. Seeds the next wager address.
    pub total_wagers_created: u64,
    /// Wagers that are open or decided but not yet claimed.
    pub active_wagers: u64,
    /// Sum of all principals at creation, in lamports.
    pub cumulative_volume: u64,
    /// Claim fee in basis points of the pot.
    pub fee_bps: u16,
    /// Cancellation fee in basis points of the principal.
    pub cancel_fee_bps: u16,
    /// Smallest accepted principal, in lamports.
    pub min_principal: u64,
    /// PDA bump seed.
    pub bump: u8,
}

impl Platform {
    pub const SEED: &'static [u8] = b"platform";

    pub fn initialize(
        &mut self,
        authority: Pubkey,
        fee_destination: Pubkey,
        config: PlatformConfig,
        bump: u8,
    ) -> Result<()> {
        require!(
            authority != Pubkey::default() && fee_destination != Pubkey::default(),
            BattleflipError::InvalidAuthority
        );
        config.validate()?;

        self.authority = authority;
        self.fee_destination = fee_destination;
        self.total_wagers_created = 0;
        self.active_wagers = 0;
        self.cumulative_volume = 0;
        self.fee_bps = config.fee_bps;
        self.cancel_fee_bps = config.cancel_fee_bps;
        self.min_principal = config.min_principal;
        self.bump = bump;
        Ok(())
    }

    pub fn config(&self) -> PlatformConfig {
        PlatformConfig {
            fee_bps: self.fee_bps,
            cancel_fee_bps: self.cancel_fee_bps,
            min_principal: self.min_principal,
        }
    }

    /// Sequence number the next wager will be created under.
    pub fn next_sequence(&self) -> u64 {
        self.total_wagers_created
    }

    /// Counts a new wager and returns the sequence number it was assigned.
    /// Nothing is written unless every counter update succeeds.
    pub fn record_creation(&mut self, principal: u64) -> Result<u64> {
        let sequence_number = self.total_wagers_created;
        let total = sequence_number
            .checked_add(1)
            .ok_or(BattleflipError::MathOverflow)?;
        let active = self
            .active_wagers
            .checked_add(1)
            .ok_or(BattleflipError::MathOverflow)?;
        let volume = self
            .cumulative_volume
            .checked_add(principal)
            .ok_or(BattleflipError::MathOverflow)?;

        self.total_wagers_created = total;
        self.active_wagers = active;
        self.cumulative_volume = volume;
        Ok(sequence_number)
    }

    /// Called once per wager when its account is closed.
    pub fn record_close(&mut self) -> Result<()> {
        self.active_wagers = self
            .active_wagers
            .checked_sub(1)
            .ok_or(BattleflipError::ActiveWagerUnderflow)?;
        Ok(())
    }

    pub fn is_consistent(&self) -> bool {
        self.active_wagers <= self.total_wagers_created
    }
}
