mod engine_command;

pub use engine_command::{apply_engine_command, EngineCommand, EngineCommandResult};
