pub mod issue;
pub mod relay;
pub mod types;
