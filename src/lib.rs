// Library exports for the corner-jump engine
// The game runner binary and the batch simulator both build on these modules

pub mod board;
pub mod bot;
pub mod config;
pub mod entry;
pub mod eval;
pub mod game;
pub mod movegen;
pub mod simulate;
pub mod strategy;
pub mod types;
