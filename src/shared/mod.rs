pub mod config;
pub mod database;
pub mod http_error;
pub mod media;
pub mod middleware;
pub mod password;
pub mod role;
pub mod rto;
