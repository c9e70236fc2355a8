pub mod cell;
pub mod grid;
pub mod hazard;
pub mod path;
pub mod safety;
