//! Backend module - Model client trait and the Gemini implementation

pub mod gemini;
pub mod traits;

pub use gemini::GeminiBackend;
pub use traits::{ContentPart, EncodedImage, GenerativeBackend};
