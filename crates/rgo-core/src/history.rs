//! 一本道の手順履歴
//!
//! [`BoardHistory`] は初期局面から最終手までの全スナップショットと、前後に動かせる
//! カーソルを保持する。石はそのまま置くだけで、取り・コウ・合法手判定は行わない。

use log::{trace, warn};

use crate::board::{BoardSnapshot, LastMove};
use crate::types::{Color, Coord, DEFAULT_BOARD_SIZE};

/// スナップショット列とカーソル。インデックス0は常に初期局面。
#[derive(Debug, Clone)]
pub struct BoardHistory {
    size: u8,
    snapshots: Vec<BoardSnapshot>,
    cursor: usize,
}

impl BoardHistory {
    pub fn new(size: u8) -> BoardHistory {
        let baseline = BoardSnapshot::empty(size);
        BoardHistory {
            size: baseline.size(),
            snapshots: vec![baseline],
            cursor: 0,
        }
    }

    #[inline]
    pub fn size(&self) -> u8 {
        self.size
    }

    /// 全履歴を破棄し、空の盤面からやり直す
    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.snapshots.push(BoardSnapshot::empty(self.size));
        self.cursor = 0;
    }

    /// カーソル位置のスナップショット
    #[inline]
    pub fn current(&self) -> &BoardSnapshot {
        &self.snapshots[self.cursor]
    }

    /// 初期局面（着手前）のスナップショット
    #[inline]
    pub fn baseline(&self) -> &BoardSnapshot {
        &self.snapshots[0]
    }

    /// カーソル位置（0 = 初期局面）
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// 記録済みの手数（初期局面以降のスナップショット数）
    #[inline]
    pub fn move_count(&self) -> usize {
        self.snapshots.len() - 1
    }

    /// カーソルの次の手として `coord` に `color` の石を置く。
    ///
    /// カーソルより先の履歴は先に破棄する。盤外の座標は無視して `false` を返す。
    pub fn place(&mut self, coord: Coord, color: Color) -> bool {
        let size = self.size;
        if !coord.is_on_board(size) {
            warn!("ignoring {color} stone outside the {size}x{size} board at {coord}");
            return false;
        }
        let mut next = self.current().clone();
        next.set_stone(coord, Some(color));
        next.set_last_move(Some(LastMove {
            color,
            coord: Some(coord),
        }));
        self.push(next);
        true
    }

    /// カーソルの次の手として `color` のパスを記録する
    pub fn pass(&mut self, color: Color) {
        let mut next = self.current().clone();
        next.set_last_move(Some(LastMove { color, coord: None }));
        self.push(next);
    }

    /// 現局面を新しい初期局面にし、履歴を破棄する
    pub fn flatten(&mut self) {
        let mut baseline = self.current().clone();
        baseline.set_last_move(None);
        self.snapshots.clear();
        self.snapshots.push(baseline);
        self.cursor = 0;
    }

    /// カーソルを1手戻す。初期局面では `false`。
    pub fn previous(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// カーソルを1手進め、移動先のスナップショットを返す
    pub fn next(&mut self) -> Option<&BoardSnapshot> {
        if self.cursor + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.snapshots[self.cursor])
    }

    /// カーソルを初期局面に戻す
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// カーソル位置に関係なく、初期局面以降の全指し手
    pub fn moves(&self) -> impl Iterator<Item = LastMove> + '_ {
        self.snapshots.iter().skip(1).filter_map(|s| s.last_move())
    }

    fn push(&mut self, snapshot: BoardSnapshot) {
        self.snapshots.truncate(self.cursor + 1);
        trace!("history: move {} {:?}", self.snapshots.len(), snapshot.last_move());
        self.snapshots.push(snapshot);
        self.cursor += 1;
    }
}

impl Default for BoardHistory {
    fn default() -> Self {
        BoardHistory::new(DEFAULT_BOARD_SIZE)
    }
}
