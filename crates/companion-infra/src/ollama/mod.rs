//! Ollama generation client.
//!
//! Talks to an Ollama-style `/api/generate` endpoint: non-streaming first,
//! falling back to line-delimited JSON streaming on read timeout, with a
//! bounded retry loop. Expected failures are converted into user-facing
//! fallback replies, never errors.

mod client;
mod types;

pub use client::OllamaClient;
