pub mod api;
pub mod blockchain;
pub mod consensus;
pub mod error;
pub mod transaction;
