//! Plugin contracts for plume-bot
//! 
//! Handler bodies are compiled in and published through the [`HandlerCatalog`];
//! plugin units bind them to triggers at startup.

pub mod builtin;
pub mod catalog;
pub mod descriptor;
pub mod trait_def;

pub use catalog::HandlerCatalog;
pub use descriptor::{Alias, CommandDescriptor, EventDescriptor, HandlerDescriptor, Mode};
pub use trait_def::{CommandBody, EventBody, EventContext, ExecutionContext, FallbackHandler, HandlerResult};
