#![cfg(feature = "server")]

pub mod config;
pub mod upstream;

use dioxus::prelude::ServerFnError;

use crate::shared::types::ApiProblem;

pub use config::{settings, Settings};
pub use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt, EnvFilter};

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn"));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

/// Upstream problems reach the browser as their display text; anything else
/// as the error chain.
pub fn to_server_error(e: anyhow::Error) -> ServerFnError {
    match e.downcast_ref::<ApiProblem>() {
        Some(problem) => ServerFnError::new(problem.to_string()),
        None => ServerFnError::new(format!("{e:#}")),
    }
}
