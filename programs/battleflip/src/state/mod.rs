pub mod platform;
pub mod wager;

pub use platform::*;
pub use wager::*;
