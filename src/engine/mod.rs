pub mod engine;
pub mod error;
pub mod protocol;
pub mod story_client;
