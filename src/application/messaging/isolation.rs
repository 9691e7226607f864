//! Failure isolation for handler invocations
//!
//! A handler that returns an error or panics is reported and turned into a
//! [`HandlerOutcome::Failed`]; the caller keeps going.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use futures::FutureExt;
use crate::plugins::HandlerResult;

/// Why a handler invocation failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerFailure {
    Error(String),
    Panic(String),
}

impl std::fmt::Display for HandlerFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HandlerFailure::Error(msg) => write!(f, "error: {}", msg),
            HandlerFailure::Panic(msg) => write!(f, "panic: {}", msg),
        }
    }
}

/// Outcome of one isolated handler invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerOutcome {
    Completed,
    Failed(HandlerFailure),
}

impl std::fmt::Display for HandlerOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HandlerOutcome::Completed => write!(f, "completed"),
            HandlerOutcome::Failed(failure) => write!(f, "failed ({})", failure),
        }
    }
}

/// Await a handler invocation, catching errors and panics
pub async fn isolate<F>(label: &str, invocation: F) -> HandlerOutcome
where
    F: Future<Output = HandlerResult>,
{
    let failure = match AssertUnwindSafe(invocation).catch_unwind().await {
        Ok(Ok(())) => return HandlerOutcome::Completed,
        Ok(Err(e)) => HandlerFailure::Error(e.to_string()),
        Err(panic) => HandlerFailure::Panic(panic_message(&*panic)),
    };

    tracing::error!(handler = %label, "Handler failed: {}", failure);
    HandlerOutcome::Failed(failure)
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
