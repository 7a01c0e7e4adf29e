use anchor_lang::prelude::*;

use crate::errors::BattleflipError;

/// Claim fee taken from the pot (250 = 2.5%).
pub const DEFAULT_FEE_BPS: u16 = 250;
/// Cancellation is free unless a deployment opts into a penalty.
pub const DEFAULT_CANCEL_FEE_BPS: u16 = 0;
/// ~0.003 SOL.
pub const DEFAULT_MIN_PRINCIPAL: u64 = 3_000_000;

pub const MAX_FEE_BPS: u16 = 2_500;
pub const MAX_CANCEL_FEE_BPS: u16 = 1_000;
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Open wagers older than this may be closed by anyone.
pub const WAGER_EXPIRY_SECONDS: i64 = 86_400;

pub const MAX_LABEL_LEN: usize = 20;

/// Deployment parameters fixed at `initialize_platform`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlatformConfig {
    /// Basis points of the 2x pot paid to the fee destination on claim.
    pub fee_bps: u16,
    /// Basis points of the principal withheld when an open wager is cancelled.
    pub cancel_fee_bps: u16,
    /// Smallest accepted principal, in lamports.
    pub min_principal: u64,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            fee_bps: DEFAULT_FEE_BPS,
            cancel_fee_bps: DEFAULT_CANCEL_FEE_BPS,
            min_principal: DEFAULT_MIN_PRINCIPAL,
        }
    }
}

impl PlatformConfig {
    pub fn validate(&self) -> Result<()> {
        require!(self.fee_bps <= MAX_FEE_BPS, BattleflipError::InvalidFeeConfig);
        require!(
            self.cancel_fee_bps <= MAX_CANCEL_FEE_BPS,
            BattleflipError::InvalidFeeConfig
        );
        require!(self.min_principal > 0, BattleflipError::InvalidFeeConfig);
        Ok(())
    }
}

/// Labels are 1-20 ASCII letters or digits. They double as a PDA seed,
/// so multi-byte characters are rejected even where `char::is_alphanumeric`
/// would accept them.
pub fn validate_label(label: &str) -> Result<()> {
    require!(
        !label.is_empty() && label.len() <= MAX_LABEL_LEN,
        BattleflipError::InvalidLabel
    );
    require!(
        label.bytes().all(|b| b.is_ascii_alphanumeric()),
        BattleflipError::InvalidLabel
    );
    Ok(())
}

pub fn validate_principal(principal: u64, config: &PlatformConfig) -> Result<()> {
    require!(
        principal > 0 && principal >= config.min_principal,
        BattleflipError::PrincipalTooLow
    );
    Ok(())
}
