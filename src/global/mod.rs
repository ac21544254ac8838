pub mod client_ip;
pub mod middleware;
pub mod shutdown;
