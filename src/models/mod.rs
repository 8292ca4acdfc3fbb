pub mod common;
pub mod participant;
pub mod prize;
pub mod raffle;

pub use common::*;
pub use participant::*;
pub use prize::*;
pub use raffle::*;
