//! 統合テスト共通ヘルパー

#![allow(dead_code)]

use rgo_core::{Color, Coord};
use rgo_sgf::GameSink;

/// [`RecordingSink`] が受け取った呼び出し
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkCall {
    Clear,
    Place(Coord, Color),
    Pass(Color),
    CommitSetup,
}

/// 全呼び出しを記録し、手のカーソルを追跡するシンク
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub calls: Vec<SinkCall>,
    pub cursor: usize,
    pub rewound: bool,
}

impl RecordingSink {
    /// 指し手を生む呼び出しのみ（順序どおり）
    pub fn moves(&self) -> Vec<SinkCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, SinkCall::Place(..) | SinkCall::Pass(_)))
            .cloned()
            .collect()
    }
}

impl GameSink for RecordingSink {
    fn clear(&mut self) {
        self.calls.push(SinkCall::Clear);
        self.cursor = 0;
    }

    fn place(&mut self, coord: Coord, color: Color) -> bool {
        self.calls.push(SinkCall::Place(coord, color));
        self.cursor += 1;
        true
    }

    fn pass(&mut self, color: Color) {
        self.calls.push(SinkCall::Pass(color));
        self.cursor += 1;
    }

    fn commit_setup(&mut self) {
        self.calls.push(SinkCall::CommitSetup);
        self.cursor = 0;
    }

    fn previous_move(&mut self) -> bool {
        self.rewound = true;
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }
}

pub fn c(x: u8, y: u8) -> Coord {
    Coord::new(x, y)
}
