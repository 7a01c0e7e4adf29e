pub mod cancel_wager;
pub mod claim_winnings;
pub mod create_wager;
pub mod expire_wager;
pub mod initialize_platform;
pub mod join_wager;

pub use cancel_wager::*;
pub use claim_winnings::*;
pub use create_wager::*;
pub use expire_wager::*;
pub use initialize_platform::*;
pub use join_wager::*;
