//! 棋譜の読み書きのエラー型

/// タグを読む前に検出する、棋譜の外形の問題
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuralError {
    /// 空白除去後に何も残らない
    #[error("record is empty")]
    Empty,

    /// 先頭の非空白文字が `(` でない
    #[error("record does not start with '('")]
    MissingOpenParen,

    /// 末尾の非空白文字が `)` でない
    #[error("record does not end with ')'")]
    MissingCloseParen,
}

/// Record codec errors
#[derive(thiserror::Error, Debug)]
pub enum SgfError {
    /// 外側の括弧が不正
    #[error("malformed record: {0}")]
    Structural(#[from] StructuralError),

    /// 長さが不正、または盤の範囲外の座標トークン
    #[error("malformed coordinate token {token:?}")]
    MalformedToken { token: String },

    /// ファイルI/Oエラー
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SgfError {
    /// I/Oやトークンではなく棋譜の外形に起因するエラーか
    pub fn is_structural(&self) -> bool {
        matches!(self, SgfError::Structural(_))
    }
}

/// 棋譜操作の結果型
pub type SgfResult<T> = Result<T, SgfError>;
