pub mod ai;
pub mod auth;
pub mod document;
pub mod exam;
pub mod export;
pub mod health;
pub mod material;
pub mod session;
pub mod study;
pub mod tutor;
pub mod user;
