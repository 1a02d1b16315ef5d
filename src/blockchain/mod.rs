pub mod block;
pub mod hash;
pub mod model;
pub mod pow;
pub mod validation;

pub use block::Block;
pub use model::Blockchain;

/// Default Proof-of-Work difficulty target: hex prefix a proof hash must match.
/// Every character removed lowers the mining cost 16x.
pub const DEFAULT_DIFFICULTY_TARGET: &str = "0000";

/// Placeholder value hashed to seed the genesis block's `previous_hash`.
pub const GENESIS_SEED: &str = "genesis_block";

/// Sentinel sender used for mining reward transactions.
pub const MINING_SENDER: &str = "0";

/// Reward credited to the mining node per sealed block.
pub const MINING_REWARD: u64 = 1;
