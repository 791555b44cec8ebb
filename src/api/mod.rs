pub mod gemini;

pub use gemini::{GeminiApi, GenerateContentRequest, GenerateContentResponse};
