//! OpenAI-compatible chat-completions backend

mod client;

pub use client::OpenAiCompatibleEngine;
