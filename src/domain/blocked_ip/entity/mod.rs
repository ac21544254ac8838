pub mod blocked_ip;
