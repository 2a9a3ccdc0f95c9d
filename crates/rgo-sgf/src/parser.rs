//! ストリーミング棋譜パーサ
//!
//! 棋譜は左から右へ1回だけ走査する。タグを木構造に集めることはせず、保持するのは
//! 開いているタグ・その内容・括弧の深さだけ。完成した `NAME[content]` はその場で
//! [`GameSink`] に渡す。
//!
//! 変化の書き方は2種類を判別する（[`BranchStyle`] 参照）:
//!
//! ```text
//! NestedMain:         (;PB[..] (;B[aa];W[bb]) (;B[cc]) )
//! TrailingVariations: (;PB[..];B[aa] (;W[bb]) ;W[cc] )
//! ```

use std::mem;
use std::ops::ControlFlow;

use log::{debug, trace, warn};
use rgo_core::{Color, Coord, DEFAULT_BOARD_SIZE};
use serde::Deserialize;

use crate::coord::CoordCodec;
use crate::error::{SgfError, SgfResult, StructuralError};
use crate::sink::{GameSink, PlayerNamesSink};

/// 本譜と変化の位置関係
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchStyle {
    /// 本譜が外側の括弧の1段内側にあり、兄弟の変化が並ぶ。
    /// 最初の部分木が閉じた時点で解析を終える。
    NestedMain,
    /// 本譜が最上位にあり、変化の部分木が間に挟まる。
    /// 最上位より深いものは読み飛ばす。
    TrailingVariations,
}

impl BranchStyle {
    /// 検証済み棋譜の最後の `)` の直前の文字で判定する
    pub fn detect(record: &str) -> BranchStyle {
        let body = record.strip_suffix(')').unwrap_or(record);
        if body.ends_with(')') {
            BranchStyle::NestedMain
        } else {
            BranchStyle::TrailingVariations
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BranchStyle::NestedMain => "nested-main",
            BranchStyle::TrailingVariations => "trailing-variations",
        }
    }
}

/// ASCII以外を含むタグ内容の扱い
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentMode {
    /// マルチバイト文字と内容中の `(` `)` `;` を保持し、`\` エスケープを解釈する
    #[default]
    Preserve,
    /// 旧バイト単位リーダー互換: 非ASCII文字と内容中の `(` `)` `;` を捨て、
    /// `\` は通常の文字として扱う
    Legacy,
}

/// パーサ設定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    pub board_size: u8,
    pub content_mode: ContentMode,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            board_size: DEFAULT_BOARD_SIZE,
            content_mode: ContentMode::Preserve,
        }
    }
}

/// 解析結果のサマリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseReport {
    pub style: BranchStyle,
    /// シンクが受理した `B` / `W`（パスを含む）
    pub moves: usize,
    /// うちパスの数
    pub passes: usize,
    /// シンクが受理した `AB` / `AW` の石
    pub setup_stones: usize,
    /// 解釈できなかった座標トークンの数
    pub skipped_tokens: usize,
    pub white_player: String,
    pub black_player: String,
}

/// 棋譜パーサ（設定のみを保持）
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordParser {
    options: ParseOptions,
}

impl RecordParser {
    pub fn new(options: ParseOptions) -> RecordParser {
        RecordParser { options }
    }

    #[inline]
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// `text` を解析して `sink` に反映し、対局者名を `names` に渡す。
    ///
    /// `(` ... `)` で囲まれていない棋譜は `sink` に触れる前に拒否する。それ以外は
    /// `sink` をクリアし、認識したタグをすべて渡し、最後に履歴の先頭まで戻す。
    pub fn parse<S, N>(&self, text: &str, sink: &mut S, names: &mut N) -> SgfResult<ParseReport>
    where
        S: GameSink + ?Sized,
        N: PlayerNamesSink + ?Sized,
    {
        let record = validate(text)?;
        let style = BranchStyle::detect(record);
        debug!("record style: {}", style.label());

        sink.clear();
        let mut scanner = Scanner::new(self.options, style, sink);
        for ch in record.chars() {
            if scanner.feed(ch).is_break() {
                debug!("first subtree closed, remaining variations ignored");
                break;
            }
        }
        let report = scanner.finish(names);
        debug!(
            "parsed {} moves ({} passes), {} setup stones, {} skipped tokens",
            report.moves, report.passes, report.setup_stones, report.skipped_tokens
        );
        Ok(report)
    }
}

/// デフォルト設定で解析し、成否のみを返す
pub fn parse<S, N>(text: &str, sink: &mut S, names: &mut N) -> bool
where
    S: GameSink + ?Sized,
    N: PlayerNamesSink + ?Sized,
{
    RecordParser::default().parse(text, sink, names).is_ok()
}

/// 外側の括弧を検査し、前後の空白を除いた棋譜を返す
pub fn validate(text: &str) -> Result<&str, StructuralError> {
    let record = text.trim();
    if record.is_empty() {
        return Err(StructuralError::Empty);
    }
    if !record.starts_with('(') {
        return Err(StructuralError::MissingOpenParen);
    }
    if !record.ends_with(')') {
        return Err(StructuralError::MissingCloseParen);
    }
    Ok(record)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    OutsideTag,
    InTagName,
    InTagContent { escaped: bool },
    /// Bracket content inside a skipped variation: read past, never dispatched.
    SkippedContent { escaped: bool },
}

/// パーサが扱うプロパティ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Property {
    Move(Color),
    Setup(Color),
    Player(Color),
    Other,
}

impl Property {
    fn from_name(name: &str) -> Property {
        match name {
            "B" => Property::Move(Color::Black),
            "W" => Property::Move(Color::White),
            "AB" => Property::Setup(Color::Black),
            "AW" => Property::Setup(Color::White),
            "PB" => Property::Player(Color::Black),
            "PW" => Property::Player(Color::White),
            _ => Property::Other,
        }
    }
}

struct Scanner<'a, S: ?Sized> {
    codec: CoordCodec,
    mode: ContentMode,
    style: BranchStyle,
    depth: u32,
    state: ScanState,
    name: String,
    /// Survives across bracket groups so `AB[aa][bb]` dispatches twice.
    current_tag: Option<String>,
    content: String,
    report: ParseReport,
    sink: &'a mut S,
}

impl<'a, S: GameSink + ?Sized> Scanner<'a, S> {
    fn new(options: ParseOptions, style: BranchStyle, sink: &'a mut S) -> Self {
        Scanner {
            codec: CoordCodec::new(options.board_size),
            mode: options.content_mode,
            style,
            depth: 0,
            state: ScanState::OutsideTag,
            name: String::new(),
            current_tag: None,
            content: String::new(),
            report: ParseReport {
                style,
                moves: 0,
                passes: 0,
                setup_stones: 0,
                skipped_tokens: 0,
                white_player: String::new(),
                black_player: String::new(),
            },
            sink,
        }
    }

    /// 変化の部分木の中（タグは読まない）
    #[inline]
    fn gated(&self) -> bool {
        self.depth > 1 && self.style == BranchStyle::TrailingVariations
    }

    fn feed(&mut self, ch: char) -> ControlFlow<()> {
        if !ch.is_ascii() {
            // never punctuation, never part of a tag name
            match self.state {
                ScanState::InTagContent { .. } if self.mode == ContentMode::Preserve => {
                    self.content.push(ch);
                    self.state = ScanState::InTagContent { escaped: false };
                }
                ScanState::SkippedContent { .. } => {
                    self.state = ScanState::SkippedContent { escaped: false };
                }
                _ => {}
            }
            return ControlFlow::Continue(());
        }

        match self.state {
            ScanState::InTagContent { escaped } => {
                self.feed_content(ch, escaped);
                return ControlFlow::Continue(());
            }
            ScanState::SkippedContent { escaped } => {
                self.state = match ch {
                    _ if escaped => ScanState::SkippedContent { escaped: false },
                    '\\' => ScanState::SkippedContent { escaped: true },
                    ']' => ScanState::OutsideTag,
                    _ => ScanState::SkippedContent { escaped: false },
                };
                return ControlFlow::Continue(());
            }
            ScanState::OutsideTag | ScanState::InTagName => {}
        }

        match ch {
            '(' => self.depth += 1,
            ')' => {
                self.depth = self.depth.saturating_sub(1);
                if self.style == BranchStyle::NestedMain {
                    return ControlFlow::Break(());
                }
            }
            '[' if !self.gated() => self.open_tag(),
            // Legacy tracks no brackets in skipped subtrees
            '[' if self.mode == ContentMode::Preserve => {
                self.state = ScanState::SkippedContent { escaped: false };
            }
            ']' if !self.gated() => {
                // stray close bracket: nothing to dispatch
                self.name.clear();
                self.state = ScanState::OutsideTag;
            }
            ';' | ' ' | '\t' | '\r' | '\n' => {}
            _ if !self.gated() => {
                self.name.push(ch);
                self.state = ScanState::InTagName;
            }
            _ => {}
        }
        ControlFlow::Continue(())
    }

    fn feed_content(&mut self, ch: char, escaped: bool) {
        let preserve = self.mode == ContentMode::Preserve;
        if escaped {
            self.content.push(ch);
            self.state = ScanState::InTagContent { escaped: false };
            return;
        }
        match ch {
            '\\' if preserve => self.state = ScanState::InTagContent { escaped: true },
            ']' => self.close_tag(),
            '(' | ')' | ';' if !preserve => {}
            _ => self.content.push(ch),
        }
    }

    fn open_tag(&mut self) {
        if !self.name.is_empty() {
            self.current_tag = Some(mem::take(&mut self.name));
        }
        self.content.clear();
        self.state = ScanState::InTagContent { escaped: false };
    }

    fn close_tag(&mut self) {
        self.state = ScanState::OutsideTag;
        self.name.clear();
        let content = mem::take(&mut self.content);
        match self.current_tag.as_deref().map(Property::from_name) {
            Some(property) => self.dispatch(property, content),
            None => trace!("content {content:?} has no tag name, ignored"),
        }
    }

    fn dispatch(&mut self, property: Property, content: String) {
        trace!("dispatch {property:?} [{content}]");
        match property {
            Property::Move(color) => {
                let Some(coord) = self.decode(&content) else {
                    return;
                };
                if !self.play(coord, color) {
                    debug!("{color} move [{content}] rejected by the sink");
                    return;
                }
                self.report.moves += 1;
                if coord.is_none() {
                    self.report.passes += 1;
                }
            }
            Property::Setup(color) => {
                let Some(coord) = self.decode(&content) else {
                    return;
                };
                if self.play(coord, color) {
                    self.report.setup_stones += 1;
                } else {
                    debug!("{color} setup stone [{content}] rejected by the sink");
                }
                self.sink.commit_setup();
            }
            Property::Player(Color::White) => self.report.white_player = content,
            Property::Player(Color::Black) => self.report.black_player = content,
            Property::Other => {}
        }
    }

    /// 読み飛ばした場合は `None`、パスは `Some(None)`
    fn decode(&mut self, token: &str) -> Option<Option<Coord>> {
        match self.codec.decode(token) {
            Ok(coord) => Some(coord),
            Err(err @ SgfError::MalformedToken { .. }) => {
                warn!("skipping tag: {err}");
                self.report.skipped_tokens += 1;
                None
            }
            Err(err) => {
                warn!("skipping tag: {err}");
                None
            }
        }
    }

    /// シンクが石を受理しなかった場合は `false`
    fn play(&mut self, coord: Option<Coord>, color: Color) -> bool {
        match coord {
            Some(coord) => self.sink.place(coord, color),
            None => {
                self.sink.pass(color);
                true
            }
        }
    }

    fn finish<N: PlayerNamesSink + ?Sized>(self, names: &mut N) -> ParseReport {
        names.set_players(&self.report.white_player, &self.report.black_player);
        self.sink.rewind_to_start();
        self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::PlayerNames;
    use rgo_core::BoardHistory;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Event {
        Clear,
        Place(u8, u8, Color),
        Pass(Color),
        Commit,
        Rewind,
    }

    #[derive(Default)]
    struct Recorder {
        events: Vec<Event>,
        position: usize,
    }

    impl GameSink for Recorder {
        fn clear(&mut self) {
            self.events.push(Event::Clear);
            self.position = 0;
        }
        fn place(&mut self, coord: Coord, color: Color) -> bool {
            self.events.push(Event::Place(coord.x(), coord.y(), color));
            self.position += 1;
            true
        }
        fn pass(&mut self, color: Color) {
            self.events.push(Event::Pass(color));
            self.position += 1;
        }
        fn commit_setup(&mut self) {
            self.events.push(Event::Commit);
            self.position = 0;
        }
        fn previous_move(&mut self) -> bool {
            if self.position == 0 {
                return false;
            }
            self.position -= 1;
            true
        }
        fn rewind_to_start(&mut self) {
            while self.previous_move() {}
            self.events.push(Event::Rewind);
        }
    }

    fn run(text: &str) -> (SgfResult<ParseReport>, Recorder, PlayerNames) {
        let mut sink = Recorder::default();
        let mut names = PlayerNames::default();
        let result = RecordParser::default().parse(text, &mut sink, &mut names);
        (result, sink, names)
    }

    #[test]
    fn detect_branch_style() {
        assert_eq!(BranchStyle::detect("(;B[aa](;W[bb]))"), BranchStyle::NestedMain);
        assert_eq!(BranchStyle::detect("(;B[aa])"), BranchStyle::TrailingVariations);
        assert_eq!(BranchStyle::detect("()"), BranchStyle::TrailingVariations);
    }

    #[test]
    fn validate_rejects_unwrapped_text() {
        assert_eq!(validate(";B[aa]"), Err(StructuralError::MissingOpenParen));
        assert_eq!(validate("(;B[aa]"), Err(StructuralError::MissingCloseParen));
        assert_eq!(validate("   \n"), Err(StructuralError::Empty));
        assert_eq!(validate("  (;B[aa])\n"), Ok("(;B[aa])"));
    }

    #[test]
    fn structural_failure_touches_nothing() {
        let (result, sink, _) = run(";B[aa]");
        assert!(matches!(result, Err(SgfError::Structural(_))));
        assert!(sink.events.is_empty());
    }

    #[test]
    fn trailing_main_line() {
        let (result, sink, names) = run("(;B[aa];W[bb])");
        let report = result.unwrap();
        assert_eq!(report.style, BranchStyle::TrailingVariations);
        assert_eq!(report.moves, 2);
        assert_eq!(
            sink.events,
            vec![
                Event::Clear,
                Event::Place(0, 0, Color::Black),
                Event::Place(1, 1, Color::White),
                Event::Rewind,
            ]
        );
        assert_eq!(sink.position, 0);
        assert_eq!(names, PlayerNames::default());
    }

    #[test]
    fn nested_main_stops_after_first_subtree() {
        let (result, sink, names) = run("(;PW[Alice];PB[Bob](;B[cc])(;B[dd]))");
        assert_eq!(result.unwrap().style, BranchStyle::NestedMain);
        assert_eq!(
            sink.events,
            vec![Event::Clear, Event::Place(2, 2, Color::Black), Event::Rewind]
        );
        assert_eq!(names.white, "Alice");
        assert_eq!(names.black, "Bob");
    }

    #[test]
    fn trailing_variations_are_skipped() {
        let (_, sink, _) = run("(;B[aa](;W[bb];B[cc]);W[dd])");
        assert_eq!(
            sink.events,
            vec![
                Event::Clear,
                Event::Place(0, 0, Color::Black),
                Event::Place(3, 3, Color::White),
                Event::Rewind,
            ]
        );
    }

    #[test]
    fn brackets_in_skipped_variations_keep_depth() {
        let (result, sink, _) = run("(;B[aa](;C[smile :)];W[bb]);W[cc])");
        assert_eq!(result.unwrap().moves, 2);
        assert_eq!(
            sink.events,
            vec![
                Event::Clear,
                Event::Place(0, 0, Color::Black),
                Event::Place(2, 2, Color::White),
                Event::Rewind,
            ]
        );

        let (_, sink, _) = run(r"(;B[aa](;C[a\] (x];W[bb]);W[cc])");
        assert_eq!(
            sink.events,
            vec![
                Event::Clear,
                Event::Place(0, 0, Color::Black),
                Event::Place(2, 2, Color::White),
                Event::Rewind,
            ]
        );
    }

    #[test]
    fn legacy_mode_counts_parentheses_in_skipped_brackets() {
        let parser = RecordParser::new(ParseOptions {
            content_mode: ContentMode::Legacy,
            ..ParseOptions::default()
        });
        let mut sink = Recorder::default();
        let mut names = PlayerNames::default();
        parser
            .parse("(;B[aa](;C[smile :)];W[bb]);W[cc])", &mut sink, &mut names)
            .unwrap();
        assert_eq!(sink.events[2], Event::Place(1, 1, Color::White));
    }

    #[test]
    fn stray_close_paren_saturates_depth() {
        let (result, sink, _) = run("())(;B[aa])");
        assert_eq!(result.unwrap().style, BranchStyle::TrailingVariations);
        assert_eq!(
            sink.events,
            vec![Event::Clear, Event::Place(0, 0, Color::Black), Event::Rewind]
        );

        // depth bottoms out at zero, so the variation below is still skipped
        let (_, sink, _) = run("()))(;B[aa](;W[bb]);W[cc])");
        assert_eq!(
            sink.events,
            vec![
                Event::Clear,
                Event::Place(0, 0, Color::Black),
                Event::Place(2, 2, Color::White),
                Event::Rewind,
            ]
        );
    }

    #[test]
    fn moves_rejected_by_sink_are_not_counted() {
        let mut history = BoardHistory::new(9);
        let mut names = PlayerNames::default();
        let report = RecordParser::default()
            .parse("(;AB[qq][cc];B[pd];W[dd])", &mut history, &mut names)
            .unwrap();
        assert_eq!(report.moves, 1);
        assert_eq!(report.setup_stones, 1);
        assert_eq!(history.move_count(), 1);
        assert_eq!(history.baseline().count(Color::Black), 1);
    }

    #[test]
    fn both_pass_forms_pass() {
        for text in ["(;B[])", "(;B[tt])"] {
            let (result, sink, _) = run(text);
            assert_eq!(result.unwrap().passes, 1);
            assert_eq!(
                sink.events,
                vec![Event::Clear, Event::Pass(Color::Black), Event::Rewind]
            );
        }
    }

    #[test]
    fn setup_dispatches_once_per_bracket() {
        let (result, sink, _) = run("(;AB[aa][bb])");
        assert_eq!(result.unwrap().setup_stones, 2);
        assert_eq!(
            sink.events,
            vec![
                Event::Clear,
                Event::Place(0, 0, Color::Black),
                Event::Commit,
                Event::Place(1, 1, Color::Black),
                Event::Commit,
                Event::Rewind,
            ]
        );
    }

    #[test]
    fn whitespace_between_brackets_keeps_tag() {
        let (_, sink, _) = run("(;AW[aa]\n  [ab]\r\n;B[cc])");
        assert_eq!(
            sink.events,
            vec![
                Event::Clear,
                Event::Place(0, 0, Color::White),
                Event::Commit,
                Event::Place(0, 1, Color::White),
                Event::Commit,
                Event::Place(2, 2, Color::Black),
                Event::Rewind,
            ]
        );
    }

    #[test]
    fn unknown_tags_are_ignored() {
        let (result, sink, _) = run("(;FF[4]GM[1]SZ[19]KM[6.5]C[hello];B[pd]C[nice move])");
        assert_eq!(result.unwrap().moves, 1);
        assert_eq!(
            sink.events,
            vec![Event::Clear, Event::Place(15, 3, Color::Black), Event::Rewind]
        );
    }

    #[test]
    fn content_before_any_tag_name_is_ignored() {
        let (result, sink, _) = run("([aa];B[bb])");
        assert!(result.is_ok());
        assert_eq!(
            sink.events,
            vec![Event::Clear, Event::Place(1, 1, Color::Black), Event::Rewind]
        );
    }

    #[test]
    fn malformed_tokens_are_skipped() {
        let (result, sink, _) = run("(;B[abc];W[zz];B[dd])");
        let report = result.unwrap();
        assert_eq!(report.skipped_tokens, 2);
        assert_eq!(report.moves, 1);
        assert_eq!(
            sink.events,
            vec![Event::Clear, Event::Place(3, 3, Color::Black), Event::Rewind]
        );
    }

    #[test]
    fn multibyte_names_preserved_by_default() {
        let (_, _, names) = run("(;PB[本因坊秀策];PW[José (9p)];B[aa])");
        assert_eq!(names.black, "本因坊秀策");
        assert_eq!(names.white, "José (9p)");
    }

    #[test]
    fn legacy_mode_drops_multibyte_text() {
        let parser = RecordParser::new(ParseOptions {
            content_mode: ContentMode::Legacy,
            ..ParseOptions::default()
        });
        let mut sink = Recorder::default();
        let mut names = PlayerNames::default();
        parser
            .parse("(;PB[本因坊 Shusaku];PW[José (9p)];B[aa])", &mut sink, &mut names)
            .unwrap();
        assert_eq!(names.black, " Shusaku");
        assert_eq!(names.white, "Jos 9p");
        assert_eq!(sink.events[1], Event::Place(0, 0, Color::Black));
    }

    #[test]
    fn multibyte_text_never_matches_punctuation() {
        // full-width brackets and parentheses are content, not syntax
        let (result, sink, names) = run("(;PW[（黒）［白］];B[aa])");
        assert_eq!(result.unwrap().style, BranchStyle::TrailingVariations);
        assert_eq!(names.white, "（黒）［白］");
        assert_eq!(sink.events[1], Event::Place(0, 0, Color::Black));
    }

    #[test]
    fn escaped_bracket_stays_in_content() {
        let (_, _, names) = run(r"(;PB[A\]B\\C];B[aa])");
        assert_eq!(names.black, r"A]B\C");
    }

    #[test]
    fn stray_close_bracket_dispatches_nothing() {
        let (_, sink, _) = run("(;B[aa]];W[bb])");
        assert_eq!(
            sink.events,
            vec![
                Event::Clear,
                Event::Place(0, 0, Color::Black),
                Event::Place(1, 1, Color::White),
                Event::Rewind,
            ]
        );
    }

    #[test]
    fn smaller_board_rejects_far_coordinates() {
        let parser = RecordParser::new(ParseOptions {
            board_size: 9,
            ..ParseOptions::default()
        });
        let mut sink = Recorder::default();
        let mut names = PlayerNames::default();
        let report = parser.parse("(;B[ii];W[jj])", &mut sink, &mut names).unwrap();
        assert_eq!(report.moves, 1);
        assert_eq!(report.skipped_tokens, 1);
    }

    #[test]
    fn boolean_entry_point() {
        let mut sink = Recorder::default();
        let mut names = PlayerNames::default();
        assert!(parse("(;B[aa])", &mut sink, &mut names));
        assert!(!parse("B[aa]", &mut sink, &mut names));
    }
}
