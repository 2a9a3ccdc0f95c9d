//! `sgf_tool` の表示用整形

use rgo_core::{BoardHistory, BoardSnapshot, Color, Coord};
use rgo_sgf::{ParseReport, coord};

/// 解析結果の1行サマリ
pub fn describe_report(label: &str, report: &ParseReport) -> String {
    let mut line = format!(
        "{label}: {} | moves={} passes={} setup={}",
        report.style.label(),
        report.moves,
        report.passes,
        report.setup_stones
    );
    if report.skipped_tokens > 0 {
        line.push_str(&format!(" skipped={}", report.skipped_tokens));
    }
    if !report.black_player.is_empty() {
        line.push_str(&format!(" black={:?}", report.black_player));
    }
    if !report.white_player.is_empty() {
        line.push_str(&format!(" white={:?}", report.white_player));
    }
    line
}

fn token(c: Coord) -> String {
    coord::encode(Some(c)).unwrap_or_else(|| c.to_string())
}

/// 初期配置の石（例: `AB dd pp`）
pub fn setup_lines(baseline: &BoardSnapshot) -> Vec<String> {
    let mut lines = Vec::new();
    for color in [Color::Black, Color::White] {
        let coords: Vec<String> = baseline
            .stones()
            .filter(|(_, c)| *c == color)
            .map(|(coord, _)| token(coord))
            .collect();
        if !coords.is_empty() {
            lines.push(format!("A{} {}", color.letter(), coords.join(" ")));
        }
    }
    lines
}

/// 番号付きの指し手一覧（パスは `pass` と表示）
pub fn move_lines(history: &BoardHistory) -> Vec<String> {
    history
        .moves()
        .enumerate()
        .map(|(i, mv)| {
            let at = match mv.coord {
                Some(c) => token(c),
                None => "pass".to_string(),
            };
            format!("{:>3}. {} {}", i + 1, mv.color.letter(), at)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rgo_sgf::{PlayerNames, RecordParser};

    fn parsed(text: &str) -> (BoardHistory, ParseReport) {
        let mut history = BoardHistory::default();
        let mut names = PlayerNames::default();
        let report = RecordParser::default().parse(text, &mut history, &mut names).unwrap();
        (history, report)
    }

    #[test]
    fn describe_includes_names_and_skips() {
        let (_, report) = parsed("(;PB[Go Seigen];B[pd];W[zz];W[])");
        assert_eq!(
            describe_report("a.sgf", &report),
            "a.sgf: trailing-variations | moves=2 passes=1 setup=0 skipped=1 black=\"Go Seigen\""
        );
    }

    #[test]
    fn dump_lists_setup_and_moves() {
        let (history, _) = parsed("(;AB[dd][pp]AW[dp];W[pd];B[])");
        assert_eq!(setup_lines(history.baseline()), vec!["AB dd pp", "AW dp"]);
        assert_eq!(move_lines(&history), vec!["  1. W pd", "  2. B pass"]);
    }
}
