//! 错误类型
//!
//! 核心计算只有一类失败：输入非法。scale 包装器额外会遇到外部搜索程序的错误。

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{name} must be {bound}, got {value}")]
    OutOfBounds {
        name: &'static str,
        value: u64,
        bound: &'static str,
    },

    #[error("level {level}: {name} must be {bound}, got {value}")]
    LevelOutOfBounds {
        level: usize,
        name: &'static str,
        value: u64,
        bound: &'static str,
    },

    #[error("widths and weights must have the same length ({widths} vs {weights})")]
    LengthMismatch { widths: usize, weights: usize },

    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("malformed input {input:?}: {reason}")]
    Malformed { input: String, reason: String },

    #[error("terminal {index} is out of range for {terms} terminals")]
    IndexOutOfRange { index: u64, terms: u64 },

    #[error("offset {offset} must have magnitude below {terms}")]
    OffsetOutOfRange { offset: i64, terms: u64 },

    #[error("digit {digit} at position {position} exceeds radix {radix}")]
    DigitOutOfRange {
        position: usize,
        digit: u64,
        radix: u64,
    },

    #[error("{0} overflows a 64-bit count")]
    Overflow(&'static str),

    #[error("failed to run search tool: {0}")]
    Io(#[from] std::io::Error),

    #[error("search tool failed: {0}")]
    SearchTool(String),

    #[error("no feasible topology exists at radix {radix}")]
    Infeasible { radix: u64 },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, Error>;
