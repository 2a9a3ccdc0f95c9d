//! 盤面スナップショット
//!
//! [`BoardSnapshot`] は履歴中の1局面（各交点の石と、その局面を作った手）を表す。
//! 取りや合法手のルールはここでは適用しない。

use crate::types::{Color, Coord, MAX_BOARD_SIZE};

/// スナップショットを作った手。`coord == None` はパス。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastMove {
    pub color: Color,
    pub coord: Option<Coord>,
}

impl LastMove {
    #[inline]
    pub const fn is_pass(&self) -> bool {
        self.coord.is_none()
    }
}

/// 盤上の石と直前の手
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    size: u8,
    /// x優先、[`Coord::index`] 参照
    stones: Vec<Option<Color>>,
    last_move: Option<LastMove>,
}

impl BoardSnapshot {
    /// `size` 路の空の盤面。サイズは `1..=MAX_BOARD_SIZE` に丸める。
    pub fn empty(size: u8) -> BoardSnapshot {
        let size = size.clamp(1, MAX_BOARD_SIZE);
        BoardSnapshot {
            size,
            stones: vec![None; size as usize * size as usize],
            last_move: None,
        }
    }

    #[inline]
    pub fn size(&self) -> u8 {
        self.size
    }

    #[inline]
    pub fn contains(&self, coord: Coord) -> bool {
        coord.is_on_board(self.size)
    }

    /// `coord` の石。空点・盤外は `None`。
    pub fn stone_at(&self, coord: Coord) -> Option<Color> {
        if !self.contains(coord) {
            return None;
        }
        self.stones[coord.index(self.size)]
    }

    /// 交点に石を置く（または取り除く）。盤外なら `false`。
    pub fn set_stone(&mut self, coord: Coord, stone: Option<Color>) -> bool {
        if !self.contains(coord) {
            return false;
        }
        let idx = coord.index(self.size);
        self.stones[idx] = stone;
        true
    }

    #[inline]
    pub fn last_move(&self) -> Option<LastMove> {
        self.last_move
    }

    #[inline]
    pub fn set_last_move(&mut self, last_move: Option<LastMove>) {
        self.last_move = last_move;
    }

    /// 石のある交点（格納順）
    pub fn stones(&self) -> impl Iterator<Item = (Coord, Color)> + '_ {
        let size = self.size;
        self.stones
            .iter()
            .enumerate()
            .filter_map(move |(idx, stone)| stone.map(|c| (Coord::from_index(idx, size), c)))
    }

    /// 盤上の `color` の石の数
    pub fn count(&self, color: Color) -> usize {
        self.stones.iter().filter(|s| **s == Some(color)).count()
    }
}

impl Default for BoardSnapshot {
    fn default() -> Self {
        BoardSnapshot::empty(crate::types::DEFAULT_BOARD_SIZE)
    }
}
