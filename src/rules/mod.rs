pub mod bids;
pub mod classifier;

pub use bids::{suggested_bid, BidModel};
pub use classifier::classify;
