//! SGF棋譜ツール
//!
//! - `check`: 棋譜を解析して結果を表示
//! - `normalize`: 棋譜を正規形で書き直す
//! - `dump`: 初期配置と指し手一覧を表示

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use log::{info, warn};
use rgo_core::{BoardHistory, MAX_BOARD_SIZE};
use rgo_sgf::{ContentMode, PlayerNames, RecordParser, RecordWriter, SgfError};
use tools::common::io::{read_text, write_text};
use tools::config::ToolConfig;
use tools::summary::{describe_report, move_lines, setup_lines};

#[derive(Parser, Debug)]
#[command(name = "sgf_tool")]
#[command(about = "Check, normalize and dump SGF game records")]
struct Cli {
    /// 設定ファイル（TOML、[parse] / [header] セクション）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 座標検証に使う盤サイズ
    #[arg(long, global = true)]
    board_size: Option<u8>,

    /// 非ASCII文字を捨てる旧リーダー互換モード
    #[arg(long, global = true, default_value_t = false)]
    legacy: bool,

    /// 正規化出力に書き込むコミ
    #[arg(long, global = true)]
    komi: Option<f64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 棋譜を解析し、1ファイル1行で結果を表示
    Check {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// 棋譜を読み込み正規形で書き出す（`-` で標準入出力）
    Normalize {
        input: PathBuf,
        output: PathBuf,

        /// 対局者名を出力に含めない
        #[arg(long, default_value_t = false)]
        drop_names: bool,
    },
    /// 初期配置と指し手を表示
    Dump { file: PathBuf },
}

fn build_config(cli: &Cli) -> Result<ToolConfig> {
    let mut cfg = ToolConfig::load(cli.config.as_deref())?;
    if let Some(size) = cli.board_size {
        if size == 0 || size > MAX_BOARD_SIZE {
            bail!("--board-size must be between 1 and {MAX_BOARD_SIZE}");
        }
        cfg.parse.board_size = size;
    }
    if cli.legacy {
        cfg.parse.content_mode = ContentMode::Legacy;
    }
    if let Some(komi) = cli.komi {
        cfg.header.komi = komi;
    }
    Ok(cfg)
}

/// 1ファイルを新しい履歴に読み込む
fn parse_file(
    path: &Path,
    parser: &RecordParser,
) -> Result<(BoardHistory, PlayerNames, rgo_sgf::ParseReport)> {
    let text = read_text(path).with_context(|| format!("failed to read {}", path.display()))?;
    if text.is_empty() {
        bail!("{} is empty", path.display());
    }
    let mut history = BoardHistory::new(parser.options().board_size);
    let mut names = PlayerNames::default();
    let report = parser
        .parse(&text, &mut history, &mut names)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok((history, names, report))
}

fn run_check(files: &[PathBuf], parser: &RecordParser) -> Result<()> {
    let mut failed = 0usize;
    for path in files {
        match parse_file(path, parser) {
            Ok((_, _, report)) => {
                println!("{}", describe_report(&path.display().to_string(), &report));
            }
            Err(err) => {
                failed += 1;
                if err.downcast_ref::<SgfError>().is_some_and(SgfError::is_structural) {
                    println!("{}: not a record ({err:#})", path.display());
                } else {
                    println!("{}: error ({err:#})", path.display());
                }
            }
        }
    }
    info!("checked {} file(s), {failed} failed", files.len());
    if failed > 0 {
        bail!("{failed} of {} record(s) could not be parsed", files.len());
    }
    Ok(())
}

fn run_normalize(
    input: &Path,
    output: &Path,
    drop_names: bool,
    cfg: &ToolConfig,
    parser: &RecordParser,
) -> Result<()> {
    let (mut history, names, report) = parse_file(input, parser)?;
    if report.skipped_tokens > 0 {
        warn!("{}: {} malformed token(s) dropped", input.display(), report.skipped_tokens);
    }
    let mut header = cfg.header.clone();
    if !drop_names {
        header.white_player.get_or_insert(names.white);
        header.black_player.get_or_insert(names.black);
    }
    let text = RecordWriter::new(header).write(&mut history);
    write_text(output, &text).with_context(|| format!("failed to write {}", output.display()))?;
    info!(
        "normalized {} -> {} ({} moves)",
        input.display(),
        output.display(),
        history.move_count()
    );
    Ok(())
}

fn run_dump(file: &Path, parser: &RecordParser) -> Result<()> {
    let (history, names, report) = parse_file(file, parser)?;
    println!("style: {}", report.style.label());
    if !names.black.is_empty() {
        println!("black: {}", names.black);
    }
    if !names.white.is_empty() {
        println!("white: {}", names.white);
    }
    for line in setup_lines(history.baseline()) {
        println!("{line}");
    }
    for line in move_lines(&history) {
        println!("{line}");
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    let cfg = build_config(&cli)?;
    let parser = RecordParser::new(cfg.parse);

    match &cli.command {
        Command::Check { files } => run_check(files, &parser),
        Command::Normalize {
            input,
            output,
            drop_names,
        } => run_normalize(input, output, *drop_names, &cfg, &parser),
        Command::Dump { file } => run_dump(file, &parser),
    }
}
