use anchor_lang::prelude::*;

use crate::state::Face;

#[event]
pub struct PlatformInitialized {
    pub authority: Pubkey,
    pub fee_destination: Pubkey,
    pub fee_bps: u16,
    pub cancel_fee_bps: u16,
    pub min_principal: u64,
}

#[event]
pub struct WagerCreated {
    pub wager: Pubkey,
    pub sequence_number: u64,
    pub creator: Pubkey,
    pub label: String,
    pub principal: u64,
    pub created_at: i64,
}

#[event]
pub struct WagerDecided {
    pub wager: Pubkey,
    pub sequence_number: u64,
    pub creator: Pubkey,
    pub counterparty: Pubkey,
    pub counterparty_choice: Face,
    pub outcome: Face,
    pub winner: Pubkey,
    pub slot: u64,
}

#[event]
pub struct WinningsClaimed {
    pub wager: Pubkey,
    pub sequence_number: u64,
    pub winner: Pubkey,
    pub payout: u64,
    pub fee: u64,
}

#[event]
pub struct WagerCancelled {
    pub wager: Pubkey,
    pub sequence_number: u64,
    pub creator: Pubkey,
    pub refund: u64,
    pub fee: u64,
}

#[event]
pub struct WagerExpired {
    pub wager: Pubkey,
    pub sequence_number: u64,
    pub creator: Pubkey,
    pub closed_by: Pubkey,
    pub refund: u64,
    pub fee: u64,
}
