//! Hypha: an agent service that turns free-text requests into GitHub issues.
//!
//! Two agents are exposed over HTTP. The issue agent runs a bounded
//! tool-use loop against an OpenAI-compatible model with a single
//! `create_issue` tool backed by the GitHub API. The chat agent relays a
//! message to the model and returns its reply.

pub mod agent;
pub mod config;
pub mod error;
pub mod platform;
pub mod server;
pub mod shutdown;
pub mod workflow;
