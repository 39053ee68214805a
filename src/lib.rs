pub mod classify;
pub mod cli;
pub mod config;
pub mod emit;
pub mod error;
pub mod gen;
pub mod generate;
pub mod parser;
pub mod scanner;
pub mod types;
pub mod usage;

// Re-export commonly used types
pub use config::GenConfig;
pub use error::{Error, Result};
pub use gen::{CompletionState, FunctionCompletion, Suggestions};
pub use generate::{collect_modules, generate, render};
pub use parser::parse_module;
pub use scanner::load_modules;
pub use types::{Argument, ArgumentType, Function, Module, Token};
pub use usage::parse_usage;
