pub mod expiry;
pub mod timeline;
