//! 囲碁棋譜のための盤面状態
//!
//! - [`types`]: 石の色 [`Color`](types::Color) and [`Coord`](types::Coord)
//! - [`board`]: [`BoardSnapshot`](board::BoardSnapshot), 1局面と直前の手
//! - [`history`]: [`BoardHistory`](history::BoardHistory), カーソル付きのスナップショット列
//!
//! 囲碁のルール（取り・コウ・合法手）は扱わず、棋譜に書かれた内容だけを保持する。

pub mod board;
pub mod history;
pub mod types;

pub use board::{BoardSnapshot, LastMove};
pub use history::BoardHistory;
pub use types::{Color, Coord, DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE};
