pub mod access_log;
pub mod auth;
pub mod blocked_ip;
pub mod board;
pub mod discount;
pub mod flight;
pub mod health;
pub mod hotel;
pub mod reservation;
pub mod settlement;
pub mod user;
