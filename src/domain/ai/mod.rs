pub mod client;
pub mod excerpt;
pub mod segment;

pub use client::{detect_model, generate, AiClient, AiClientTrait, OpenAiClient};
pub use excerpt::excerpt;
pub use segment::{segment, Segmented, SUMMARY_SENTINEL};
