//! Business logic and repository trait definitions for Companion.
//!
//! This crate defines the "ports" (repository traits) that the
//! infrastructure layer implements, plus the chat-turn orchestration:
//! prompt composition, reply tag parsing, and the retry policy for the
//! generation client. It depends only on `companion-types` -- never on
//! `companion-infra` or any database/IO crate.

pub mod chat;
pub mod generation;
pub mod repository;
pub mod service;
