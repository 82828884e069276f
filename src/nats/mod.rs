pub mod client;
pub mod messages;
mod transcriber;

pub use client::NatsClient;
pub use messages::TranscriptMessage;
pub use transcriber::NatsTranscriber;
