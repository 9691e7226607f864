//! Application layer - Use cases and business logic
//! 
//! This layer contains:
//! - Services: Per-message orchestration (settings defaults, dispatch)
//! - Errors: Domain-specific errors
//! - Messaging: Prefix parsing, authorization, dispatching, failure isolation

pub mod errors;
pub mod services;
pub mod messaging;
