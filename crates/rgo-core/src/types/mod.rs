//! 盤面と棋譜コーデックで共有する基本型

mod color;
mod coord;

pub use color::Color;
pub use coord::{Coord, DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE};
