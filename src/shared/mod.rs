pub mod api_error;
pub mod config;
#[cfg(feature = "mongodb")]
pub mod database;
pub mod deserialize;
pub mod handlers;
pub mod hash_worker;
pub mod http_error;
pub mod rto;
