//! Collaborators the engine talks to, with in-memory implementations
pub mod store;
pub use store::*;
pub mod vault;
pub use vault::*;
pub mod venue_adapter;
pub use venue_adapter::*;
pub mod vesting;
pub use vesting::*;
