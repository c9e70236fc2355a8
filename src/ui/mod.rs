pub mod input;
pub mod plain;
pub mod renderer;
