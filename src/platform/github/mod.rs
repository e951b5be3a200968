mod client;

pub use client::GitHubPlatform;
