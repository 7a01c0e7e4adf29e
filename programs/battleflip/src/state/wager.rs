use anchor_lang::prelude::*;

use crate::config::{MAX_LABEL_LEN, WAGER_EXPIRY_SECONDS};
use crate::entropy::OutcomeSource;
use crate::errors::BattleflipError;
use crate::fees;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug)]
pub enum Face {
    Heads,
    Tails,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug)]
pub enum WagerState {
    /// Waiting for a counterparty; escrow holds the creator's principal.
    Open,
    /// Joined and flipped in one instruction; escrow holds both principals.
    Decided {
        counterparty: Pubkey,
        counterparty_choice: Face,
        outcome: Face,
        winner: Pubkey,
    },
}

/// Returned from `join_wager`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct JoinOutcome {
    pub outcome: Face,
    pub winner: Pubkey,
}

#[account]
#[derive(InitSpace, Debug)]
pub struct Wager {
    /// `Platform::total_wagers_created` when this wager was made.
    pub sequence_number: u64,
    /// First player's wallet. Pays the rent deposit and gets it back.
    pub creator: Pubkey,
    /// Lobby name (1-20 ASCII alphanumerics).
    #[max_len(20)]
    pub label: String,
    /// Stake per player in lamports.
    pub principal: u64,
    pub state: WagerState,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// PDA bump seed.
    pub bump: u8,
}

impl Wager {
    pub const SEED: &'static [u8] = b"wager";

    pub fn open(
        sequence_number: u64,
        creator: Pubkey,
        label: String,
        principal: u64,
        created_at: i64,
        bump: u8,
    ) -> Self {
        debug_assert!(label.len() <= MAX_LABEL_LEN);
        Self {
            sequence_number,
            creator,
            label,
            principal,
            state: WagerState::Open,
            created_at,
            bump,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, WagerState::Open)
    }

    pub fn counterparty(&self) -> Option<Pubkey> {
        match self.state {
            WagerState::Open => None,
            WagerState::Decided { counterparty, .. } => Some(counterparty),
        }
    }

    pub fn counterparty_choice(&self) -> Option<Face> {
        match self.state {
            WagerState::Open => None,
            WagerState::Decided {
                counterparty_choice,
                ..
            } => Some(counterparty_choice),
        }
    }

    pub fn outcome(&self) -> Option<Face> {
        match self.state {
            WagerState::Open => None,
            WagerState::Decided { outcome, .. } => Some(outcome),
        }
    }

    pub fn winner(&self) -> Option<Pubkey> {
        match self.state {
            WagerState::Open => None,
            WagerState::Decided { winner, .. } => Some(winner),
        }
    }

    /// Lamports held on top of the rent deposit.
    pub fn escrowed(&self) -> Result<u64> {
        match self.state {
            WagerState::Open => Ok(self.principal),
            WagerState::Decided { .. } => fees::pot(self.principal),
        }
    }

    /// Seats the counterparty and flips. The outcome is drawn here and
    /// nowhere else; the guesser wins only on a match.
    pub fn join(
        &mut self,
        counterparty: Pubkey,
        choice: Face,
        source: &impl OutcomeSource,
    ) -> Result<JoinOutcome> {
        require!(self.is_open(), BattleflipError::WagerNotOpen);

        let outcome = source.decide();
        let winner = if choice == outcome {
            counterparty
        } else {
            self.creator
        };

        self.state = WagerState::Decided {
            counterparty,
            counterparty_choice: choice,
            outcome,
            winner,
        };
        Ok(JoinOutcome { outcome, winner })
    }

    /// Returns the winner if `caller` may claim.
    pub fn authorize_claim(&self, caller: &Pubkey) -> Result<Pubkey> {
        match self.state {
            WagerState::Open => err!(BattleflipError::WagerNotDecided),
            WagerState::Decided { winner, .. } => {
                require_keys_eq!(winner, *caller, BattleflipError::NotWinner);
                Ok(winner)
            }
        }
    }

    /// State is checked before identity: a decided wager is never cancellable.
    pub fn authorize_cancel(&self, caller: &Pubkey) -> Result<()> {
        require!(self.is_open(), BattleflipError::WagerNotOpen);
        require_keys_eq!(self.creator, *caller, BattleflipError::NotCreator);
        Ok(())
    }

    pub fn authorize_expiry(&self, now: i64) -> Result<()> {
        require!(self.is_open(), BattleflipError::WagerNotOpen);
        require!(self.is_expired(now), BattleflipError::WagerNotExpired);
        Ok(())
    }

    pub fn is_expired(&self, now: i64) -> bool {
        now.saturating_sub(self.created_at) >= WAGER_EXPIRY_SECONDS
    }
}
