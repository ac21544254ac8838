pub mod availability;
pub mod dto;
pub mod entity;
pub mod handler;
pub mod pricing;
pub mod service;
