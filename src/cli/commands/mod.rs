pub mod alerts;
pub mod call;
pub mod calls;
pub mod config;
pub mod db;
pub mod email;
pub mod export;
pub mod import;
pub mod init;
pub mod list;
pub mod log;
pub mod stats;
pub mod template;
pub mod timeline;
