//! 2文字の座標トークン
//!
//! `aa` が左上の交点で、1文字目が列、2文字目が行。パスは `tt` と空トークンの
//! どちらでも読み、書き出しは常に空トークン。

use rgo_core::{Coord, DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE};

use crate::error::{SgfError, SgfResult};

/// 入力で受け付けるパスのリテラル
pub const PASS_TOKEN: &str = "tt";

/// 盤サイズ付きのトークンコーデック
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordCodec {
    board_size: u8,
}

impl CoordCodec {
    pub fn new(board_size: u8) -> CoordCodec {
        CoordCodec {
            board_size: board_size.clamp(1, MAX_BOARD_SIZE),
        }
    }

    #[inline]
    pub fn board_size(&self) -> u8 {
        self.board_size
    }

    /// トークンを解釈する。`Ok(None)` はパス。
    ///
    /// 盤の範囲内の2文字でないトークンは [`SgfError::MalformedToken`] になる。
    pub fn decode(&self, token: &str) -> SgfResult<Option<Coord>> {
        if token.is_empty() || token == PASS_TOKEN {
            return Ok(None);
        }
        let malformed = || SgfError::MalformedToken {
            token: token.to_string(),
        };
        let &[col, row] = token.as_bytes() else {
            return Err(malformed());
        };
        match (self.axis(col), self.axis(row)) {
            (Some(x), Some(y)) => Ok(Some(Coord::new(x, y))),
            _ => Err(malformed()),
        }
    }

    /// 座標をトークンにする（パスは空文字列）。
    ///
    /// どちらかの軸に対応する文字がない（`>= MAX_BOARD_SIZE`）場合は `None`。
    pub fn encode(&self, coord: Option<Coord>) -> Option<String> {
        encode(coord)
    }

    fn axis(&self, letter: u8) -> Option<u8> {
        letter.checked_sub(b'a').filter(|v| *v < self.board_size)
    }
}

impl Default for CoordCodec {
    fn default() -> Self {
        CoordCodec::new(DEFAULT_BOARD_SIZE)
    }
}

/// 盤サイズに依らず座標をトークンにする（パスは `""`）。
///
/// 文字があるのは [`MAX_BOARD_SIZE`] 未満の軸だけで、それ以上は `None`。
pub fn encode(coord: Option<Coord>) -> Option<String> {
    let Some(c) = coord else {
        return Some(String::new());
    };
    let mut token = String::with_capacity(2);
    token.push(letter(c.x())?);
    token.push(letter(c.y())?);
    Some(token)
}

#[inline]
fn letter(axis: u8) -> Option<char> {
    (axis < MAX_BOARD_SIZE).then(|| char::from(b'a' + axis))
}
