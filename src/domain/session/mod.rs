pub mod context;
pub mod dto;
pub mod handler;
pub mod service;
pub mod store;

pub use context::{Artifact, ArtifactContent, ChatMessage, ChatRole, SessionContext};
pub use store::SessionStore;
