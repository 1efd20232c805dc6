//! Core data types for the balance watcher.

pub mod balance;
pub mod wallet;

pub use balance::*;
pub use wallet::*;
