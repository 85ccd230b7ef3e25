pub mod settings;

pub use settings::{KeyLogStrategy, LoggingConfig, Settings, UpstreamConfig};
