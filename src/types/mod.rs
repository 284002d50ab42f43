mod errors;
mod timestamp;

pub use timestamp::parse_timestamp;

pub type TransactionId = String;
pub type CardholderId = String;
pub type RewardPoints = u64;
