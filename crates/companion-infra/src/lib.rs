//! Infrastructure layer for Companion.
//!
//! Contains implementations of the repository traits defined in
//! `companion-core` (SQLite storage via sqlx) and the Ollama generation
//! client (reqwest, non-streaming with streaming fallback).

pub mod ollama;
pub mod sqlite;
