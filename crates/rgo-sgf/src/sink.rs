//! コーデックと対局状態の所有者の間のインターフェース
//!
//! パーサは [`GameSink`] と [`PlayerNamesSink`] だけを呼び、ライターは
//! [`GameHistorySource`] だけを読む。[`BoardHistory`] は両方を実装する。

use rgo_core::{BoardHistory, BoardSnapshot, Color, Coord};

/// 棋譜から読んだイベントを棋譜順に受け取る
pub trait GameSink {
    /// 全状態を破棄する（走査開始前に1回だけ呼ばれる）
    fn clear(&mut self);

    /// `coord` に `color` の石を置く。盤外などで反映しなかった場合は `false`。
    fn place(&mut self, coord: Coord, color: Color) -> bool;

    /// `color` のパス
    fn pass(&mut self, color: Color);

    /// ここまでに置いた石を初期局面に取り込む
    fn commit_setup(&mut self);

    /// 1手戻す。先頭なら `false`。
    fn previous_move(&mut self) -> bool;

    /// 戻れなくなるまで戻す
    fn rewind_to_start(&mut self) {
        while self.previous_move() {}
    }
}

/// ライターが読む、前後に移動できるスナップショット列
pub trait GameHistorySource {
    /// 初期局面に移動する
    fn rewind_to_start(&mut self);

    /// 1つ進める。末尾なら `None`。
    fn step_forward(&mut self) -> Option<&BoardSnapshot>;

    fn current_snapshot(&self) -> &BoardSnapshot;
}

/// 棋譜中の対局者名の受け取り先
pub trait PlayerNamesSink {
    fn set_players(&mut self, white: &str, black: &str);
}

/// 解析で得た対局者名
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerNames {
    pub white: String,
    pub black: String,
}

impl PlayerNamesSink for PlayerNames {
    fn set_players(&mut self, white: &str, black: &str) {
        self.white = white.to_string();
        self.black = black.to_string();
    }
}

impl GameSink for BoardHistory {
    fn clear(&mut self) {
        BoardHistory::clear(self);
    }

    fn place(&mut self, coord: Coord, color: Color) -> bool {
        BoardHistory::place(self, coord, color)
    }

    fn pass(&mut self, color: Color) {
        BoardHistory::pass(self, color);
    }

    fn commit_setup(&mut self) {
        self.flatten();
    }

    fn previous_move(&mut self) -> bool {
        self.previous()
    }
}

impl GameHistorySource for BoardHistory {
    fn rewind_to_start(&mut self) {
        self.rewind();
    }

    fn step_forward(&mut self) -> Option<&BoardSnapshot> {
        self.next()
    }

    fn current_snapshot(&self) -> &BoardSnapshot {
        self.current()
    }
}
