//! 棋譜ライター
//!
//! 出力形式:
//!
//! ```text
//! (;KM[7.5]AP[rgo: 0.1.0];AB[dd][pp];AW[dp];B[qd];W[])
//! ```
//!
//! 置き石は初期局面から格納順に書き出し、以降のスナップショットは1つにつき1手のタグになる。

use log::warn;
use rgo_core::Color;
use serde::Deserialize;

use crate::coord;
use crate::sink::GameHistorySource;

/// 棋譜ヘッダに書き込む値
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HeaderFields {
    /// 小数点以下を最低1桁書く（`6` は `KM[6.0]`）
    pub komi: f64,
    /// `AP` プロパティのアプリケーション名
    pub application: String,
    /// `AP` プロパティのバージョン
    pub version: String,
    pub white_player: Option<String>,
    pub black_player: Option<String>,
}

impl Default for HeaderFields {
    fn default() -> Self {
        HeaderFields {
            komi: 7.5,
            application: "rgo".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            white_player: None,
            black_player: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordWriter {
    header: HeaderFields,
}

impl RecordWriter {
    pub fn new(header: HeaderFields) -> RecordWriter {
        RecordWriter { header }
    }

    #[inline]
    pub fn header(&self) -> &HeaderFields {
        &self.header
    }

    /// `history` を初期局面から最後のスナップショットまで書き出す。
    ///
    /// 終了後、`history` は最後のスナップショットを指している。
    pub fn write<H: GameHistorySource + ?Sized>(&self, history: &mut H) -> String {
        let header = &self.header;
        let mut out = format!(
            "(;KM[{}]AP[{}: {}]",
            format_komi(header.komi),
            escape(&header.application),
            escape(&header.version)
        );
        if let Some(name) = header.black_player.as_deref().filter(|n| !n.is_empty()) {
            push_property(&mut out, "PB", name);
        }
        if let Some(name) = header.white_player.as_deref().filter(|n| !n.is_empty()) {
            push_property(&mut out, "PW", name);
        }

        history.rewind_to_start();
        let mut setup: [Vec<_>; Color::NUM] = [Vec::new(), Vec::new()];
        for (c, color) in history.current_snapshot().stones() {
            match coord::encode(Some(c)) {
                Some(token) => setup[color.index()].push(token),
                None => warn!("{color} setup stone at {c} has no token, not written"),
            }
        }
        for (name, coords) in [("AB", &setup[0]), ("AW", &setup[1])] {
            if coords.is_empty() {
                continue;
            }
            out.push(';');
            out.push_str(name);
            for token in coords {
                out.push('[');
                out.push_str(token);
                out.push(']');
            }
        }

        while let Some(snapshot) = history.step_forward() {
            let Some(mv) = snapshot.last_move() else {
                continue;
            };
            let Some(token) = coord::encode(mv.coord) else {
                warn!("{} move {:?} has no token, not written", mv.color, mv.coord);
                continue;
            };
            out.push(';');
            out.push(mv.color.letter());
            out.push('[');
            out.push_str(&token);
            out.push(']');
        }

        out.push(')');
        out
    }
}

fn format_komi(komi: f64) -> String {
    if komi.fract() == 0.0 {
        format!("{komi:.1}")
    } else {
        komi.to_string()
    }
}

fn push_property(out: &mut String, name: &str, value: &str) {
    out.push_str(name);
    out.push('[');
    out.push_str(&escape(value));
    out.push(']');
}

/// タグ内容用に `]` と `\` をエスケープする
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
