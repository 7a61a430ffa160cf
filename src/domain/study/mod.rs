pub mod dto;
pub mod flashcard;
pub mod handler;
pub mod prompt;
pub mod service;
