//! SGF棋譜コーデック
//!
//! 棋譜の最初の1局から指し手・置き石・対局者名を読み込み、履歴を正規形で書き出す。
//!
//! ```
//! use rgo_core::{BoardHistory, Coord};
//! use rgo_sgf::{PlayerNames, RecordParser, RecordWriter};
//!
//! let mut history = BoardHistory::default();
//! let mut names = PlayerNames::default();
//! let report = RecordParser::default()
//!     .parse("(;PB[Black];PW[White];B[pd];W[dp];B[])", &mut history, &mut names)
//!     .unwrap();
//! assert_eq!(report.moves, 3);
//! assert_eq!(names.black, "Black");
//! assert_eq!(history.cursor(), 0);
//! assert_eq!(history.moves().next().map(|m| m.coord), Some(Some(Coord::new(15, 3))));
//!
//! let text = RecordWriter::default().write(&mut history);
//! assert!(text.ends_with(";B[pd];W[dp];B[])"));
//! ```

pub mod coord;
pub mod error;
pub mod file;
pub mod parser;
pub mod sink;
pub mod writer;

pub use coord::{CoordCodec, PASS_TOKEN};
pub use error::{SgfError, SgfResult, StructuralError};
pub use file::{load, read_record, save};
pub use parser::{BranchStyle, ContentMode, ParseOptions, ParseReport, RecordParser, parse};
pub use sink::{GameHistorySource, GameSink, PlayerNames, PlayerNamesSink};
pub use writer::{HeaderFields, RecordWriter};
