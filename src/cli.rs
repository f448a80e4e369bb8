//! 各命令行工具共用的辅助函数

use std::io::{self, Write};

use crate::error::{Error, Result};

/// 初始化 tracing 日志，输出到 stderr，保证 stdout 只有报告本身。
///
/// `RUST_LOG` 优先；未设置时默认 `warn`，`verbose` 时为 `debug`。
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .try_init();
}

/// 解析逗号分隔的整数列表，例如 `4,4,8`
pub fn parse_list(raw: &str) -> Result<Vec<u64>> {
    raw.split(',')
        .map(|v| {
            v.trim().parse::<u64>().map_err(|e| Error::Malformed {
                input: raw.to_string(),
                reason: format!("{v:?} is not an integer ({e})"),
            })
        })
        .collect()
}

/// `-v` 时把解析后的参数以 JSON 形式回显到 stdout
pub fn echo_args<T: serde::Serialize>(args: &T) {
    echo_args_to(std::io::stdout().lock(), args);
}

/// 同 [`echo_args`]，写到指定输出。stdout 本身是 JSON 时用 stderr。
pub fn echo_args_to<T: serde::Serialize, W: Write>(mut out: W, args: &T) {
    let written = serde_json::to_string(args)
        .map_err(io::Error::from)
        .and_then(|json| writeln!(out, "{json}"));
    if let Err(err) = written {
        tracing::warn!(%err, "failed to echo arguments");
    }
}
