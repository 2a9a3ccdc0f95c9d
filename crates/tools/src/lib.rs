//! `sgf_tool` バイナリの補助モジュール

pub mod common;
pub mod config;
pub mod summary;
