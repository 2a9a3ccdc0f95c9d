//! 棋譜ファイルの読み書き

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::{debug, warn};

use crate::error::{SgfError, SgfResult};
use crate::parser::RecordParser;
use crate::sink::{GameHistorySource, GameSink, PlayerNamesSink};
use crate::writer::RecordWriter;

/// 棋譜ファイルをテキストとして読み込む。
///
/// ファイルが存在しない・権限がない・空の場合は `Ok(None)`。その他のI/Oエラーは返す。
/// 不正なUTF-8は置換し、先頭のBOMは除去する。
pub fn read_record<P: AsRef<Path>>(path: P) -> SgfResult<Option<String>> {
    let path = path.as_ref();
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if matches!(err.kind(), ErrorKind::NotFound | ErrorKind::PermissionDenied) => {
            debug!("cannot read {}: {err}", path.display());
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };
    let text = String::from_utf8_lossy(&bytes);
    let text = text.strip_prefix('\u{feff}').unwrap_or(&*text);
    if text.is_empty() {
        debug!("{} is empty", path.display());
        return Ok(None);
    }
    Ok(Some(text.to_string()))
}

/// 棋譜ファイルを `sink` に読み込む。
///
/// ファイルがない・読めない・空、または外側の括弧の検査に失敗した場合は `Ok(false)` で、
/// そのとき `sink` には何も送られない。
pub fn load<P, S, N>(
    path: P,
    parser: &RecordParser,
    sink: &mut S,
    names: &mut N,
) -> SgfResult<bool>
where
    P: AsRef<Path>,
    S: GameSink + ?Sized,
    N: PlayerNamesSink + ?Sized,
{
    let path = path.as_ref();
    let Some(text) = read_record(path)? else {
        return Ok(false);
    };
    match parser.parse(&text, sink, names) {
        Ok(_) => Ok(true),
        Err(SgfError::Structural(err)) => {
            warn!("{}: {err}", path.display());
            Ok(false)
        }
        Err(err) => Err(err),
    }
}

/// `history` を `path` に書き出す（既存ファイルは上書き）
pub fn save<P, H>(path: P, writer: &RecordWriter, history: &mut H) -> SgfResult<()>
where
    P: AsRef<Path>,
    H: GameHistorySource + ?Sized,
{
    let text = writer.write(history);
    fs::write(path.as_ref(), text)?;
    Ok(())
}
