use anchor_lang::error::{Error, ErrorCode};
use anchor_lang::prelude::*;

#[error_code]
pub enum BattleflipError {
    #[msg("Lobby label must be 1-20 ASCII letters or digits.")]
    InvalidLabel,
    #[msg("Principal is below the platform minimum.")]
    PrincipalTooLow,
    #[msg("Fee configuration is out of bounds.")]
    InvalidFeeConfig,
    #[msg("Authority and fee destination cannot be the zero address.")]
    InvalidAuthority,
    #[msg("Wager address is already in use. Refresh platform state and retry.")]
    AddressAlreadyInUse,
    #[msg("Wager address does not match the current sequence, creator and label.")]
    WagerAddressMismatch,
    #[msg("Wager is not open.")]
    WagerNotOpen,
    #[msg("Wager has not been decided.")]
    WagerNotDecided,
    #[msg("Only the winner can claim winnings.")]
    NotWinner,
    #[msg("Only the creator can cancel this wager.")]
    NotCreator,
    #[msg("Wager has not reached its expiry time.")]
    WagerNotExpired,
    #[msg("Fee destination does not match the platform record.")]
    WrongFeeDestination,
    #[msg("Rent recipient is not the wager creator.")]
    WrongCreator,
    #[msg("Insufficient funds for this wager.")]
    InsufficientFunds,
    #[msg("Slot hashes sysvar is empty or malformed.")]
    EntropyUnavailable,
    #[msg("Arithmetic overflow.")]
    MathOverflow,
    #[msg("Active wager counter would underflow.")]
    ActiveWagerUnderflow,
    #[msg("join_wager must be called directly by the transaction, not through CPI.")]
    CpiNotAllowed,
    #[msg("join_wager must be the last instruction in its transaction.")]
    TrailingInstruction,
}

/// Coarse grouping callers use to decide how to react to a rejection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    /// Bad input; correct it and resubmit.
    Validation,
    /// The ledger is not in the state the request assumed; refresh and
    /// retry. Includes an empty `SlotHashes` sysvar, which only happens in
    /// the first slot of a cluster.
    Conflict,
    InsufficientFunds,
    /// Target account was already closed or never created. Anchor reports
    /// this as `AccountNotInitialized` before any handler runs.
    NotFound,
    /// Bookkeeping bug; never reachable through valid inputs.
    Arithmetic,
}

impl ErrorClass {
    /// Classifies an error returned by this program, including the Anchor
    /// account errors it can surface.
    pub fn of(error: &Error) -> Option<Self> {
        let Error::AnchorError(anchor) = error else {
            return None;
        };
        let code = anchor.error_code_number;
        if code == u32::from(ErrorCode::AccountNotInitialized) {
            return Some(ErrorClass::NotFound);
        }
        BattleflipError::ALL
            .iter()
            .find(|e| u32::from(**e) == code)
            .map(BattleflipError::class)
    }
}

impl BattleflipError {
    pub const ALL: [BattleflipError; 19] = [
        BattleflipError::InvalidLabel,
        BattleflipError::PrincipalTooLow,
        BattleflipError::InvalidFeeConfig,
        BattleflipError::InvalidAuthority,
        BattleflipError::AddressAlreadyInUse,
        BattleflipError::WagerAddressMismatch,
        BattleflipError::WagerNotOpen,
        BattleflipError::WagerNotDecided,
        BattleflipError::NotWinner,
        BattleflipError::NotCreator,
        BattleflipError::WagerNotExpired,
        BattleflipError::WrongFeeDestination,
        BattleflipError::WrongCreator,
        BattleflipError::InsufficientFunds,
        BattleflipError::EntropyUnavailable,
        BattleflipError::MathOverflow,
        BattleflipError::ActiveWagerUnderflow,
        BattleflipError::CpiNotAllowed,
        BattleflipError::TrailingInstruction,
    ];

    pub fn class(&self) -> ErrorClass {
        use BattleflipError::*;
        match self {
            InvalidLabel | PrincipalTooLow | InvalidFeeConfig | InvalidAuthority
            | CpiNotAllowed | TrailingInstruction => ErrorClass::Validation,
            AddressAlreadyInUse | WagerAddressMismatch | WagerNotOpen | WagerNotDecided
            | NotWinner | NotCreator | WagerNotExpired | WrongFeeDestination | WrongCreator
            | EntropyUnavailable => ErrorClass::Conflict,
            InsufficientFunds => ErrorClass::InsufficientFunds,
            MathOverflow | ActiveWagerUnderflow => ErrorClass::Arithmetic,
        }
    }
}
