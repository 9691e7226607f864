//! Message handling - authorization, dispatch and failure isolation

pub mod authorization;
pub mod dispatcher;
pub mod isolation;
pub mod parser;

pub use authorization::{AuthorizationResolver, UnlistedParticipant};
pub use dispatcher::{DispatchReport, MessageDispatcher};
pub use parser::{MessageParser, PrefixMatcher};
