pub mod config;
pub use config::*;
pub mod fee;
pub use fee::*;
pub mod migration;
pub use migration::*;
pub mod virtual_pool;
pub use virtual_pool::*;
