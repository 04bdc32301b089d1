//! Shared domain types for Companion.
//!
//! This crate contains the core domain types used across the Companion
//! backend: Character, Conversation, Message, Settings, and their
//! associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod character;
pub mod config;
pub mod conversation;
pub mod error;
pub mod message;
pub mod settings;
