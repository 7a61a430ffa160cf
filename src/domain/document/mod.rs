pub mod dto;
pub mod extract;
pub mod handler;
pub mod model;
pub mod service;
