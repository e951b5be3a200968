pub mod engine;
pub mod openai;
pub mod prompt;
pub mod tools;
