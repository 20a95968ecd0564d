pub mod check;
pub mod config;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod roster;
pub mod segment;
pub mod status;
