pub mod activity;
pub mod config;
pub mod day;
pub mod db;
pub mod expense;
pub mod export;
pub mod import;
pub mod init;
pub mod log;
pub mod owner;
pub mod summary;
pub mod transport;
pub mod trip;
