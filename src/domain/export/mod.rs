pub mod dto;
pub mod handler;
pub mod pdf;
pub mod service;
