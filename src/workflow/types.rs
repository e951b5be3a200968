use serde::Serialize;

/// Static discovery data for an agent endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct AgentDescriptor {
    pub name: &'static str,
    pub path: &'static str,
    pub description: &'static str,
    pub welcome: Welcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct Welcome {
    pub greeting: &'static str,
    pub prompts: Vec<&'static str>,
}
