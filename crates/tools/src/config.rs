//! ツール設定
//!
//! 任意のTOMLファイルから読み込み、コマンドライン引数で上書きする。
//!
//! ```toml
//! [parse]
//! board_size = 19
//! content_mode = "legacy"
//!
//! [header]
//! komi = 6.5
//! application = "my-editor"
//! version = "2.0"
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use rgo_sgf::{HeaderFields, ParseOptions};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    pub parse: ParseOptions,
    pub header: HeaderFields,
}

impl ToolConfig {
    /// `path` を読み込む。未指定時はデフォルト値を返す。
    pub fn load(path: Option<&Path>) -> Result<ToolConfig> {
        let Some(path) = path else {
            return Ok(ToolConfig::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
    }
}
