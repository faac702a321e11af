pub mod compiler;
pub mod computer;
