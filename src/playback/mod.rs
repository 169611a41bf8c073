pub mod art_fetch;
pub mod error;
pub mod mpris_client;
pub mod proxy;
