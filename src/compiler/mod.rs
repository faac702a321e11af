pub mod compiler;
pub mod instructions;
pub mod loader;

pub use compiler::{compile, CompileError, CompileErrorKind};
