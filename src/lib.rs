//! Terminal Snake: a grid simulation (`engine`) plus the terminal adapters
//! that poll keys, pick a difficulty and draw the board.

pub mod config;
pub mod engine;
pub mod game;
pub mod input;
pub mod mode;
pub mod render;
pub mod snake;
pub mod term;

pub type TermInt = u16;
pub type TermCoords = (u16, u16);
