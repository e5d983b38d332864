pub mod board;
pub mod renderer;
pub mod runner;
pub mod terminal;
