//! Open Trivia DB question source.

mod client;
mod config;
mod entities;

pub use client::OpenTdbSource;
pub use config::TriviaConfig;
pub use entities::decode_entities;
