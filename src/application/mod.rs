//! Application layer
//!
//! This layer contains use cases that orchestrate domain logic to implement
//! application-specific workflows. Each use case takes a command of raw
//! values, validates it into domain types and returns a serializable response.

pub mod auth;
pub mod budget;
pub mod expense;
