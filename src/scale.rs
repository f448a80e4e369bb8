//! 规模扫描
//!
//! 对每个路由器端口数（radix），借助外部 HyperX 搜索程序做二分查找，
//! 找出满足对分带宽约束时能构建的最大网络。各 radix 之间互不依赖，
//! 在固定大小的 rayon 线程池上并行执行，结果按 radix 归集。

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Command;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// 搜索程序找到的一个可行拓扑
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub terminals: u64,
    pub routers: u64,
    pub channels: u64,
}

/// 查询在给定 radix 下是否存在至少 `min_terminals` 个终端的拓扑。
/// 返回 `Ok(None)` 表示不可行，这是正常结果而非错误。
pub trait SearchProbe: Sync {
    fn probe(&self, radix: u64, min_terminals: u64) -> Result<Option<SearchHit>>;
}

/// 通过子进程调用外部搜索程序
#[derive(Debug, Clone)]
pub struct ExternalSearch {
    pub exe: PathBuf,
    pub min_bandwidth: f64,
    pub max_dimensions: u64,
    pub min_concentration: Option<u64>,
    pub max_concentration: Option<u64>,
}

impl ExternalSearch {
    pub fn command(&self, radix: u64, min_terminals: u64) -> Command {
        let mut cmd = Command::new(&self.exe);
        cmd.arg("--maxradix")
            .arg(radix.to_string())
            .arg("--minterminals")
            .arg(min_terminals.to_string())
            .arg("--minbandwidth")
            .arg(self.min_bandwidth.to_string())
            .arg("--maxdimensions")
            .arg(self.max_dimensions.to_string())
            .arg("--maxresults")
            .arg("1");
        if let Some(min) = self.min_concentration {
            cmd.arg("--minconcentration").arg(min.to_string());
        }
        if let Some(max) = self.max_concentration {
            cmd.arg("--maxconcentration").arg(max.to_string());
        }
        cmd
    }
}

impl SearchProbe for ExternalSearch {
    fn probe(&self, radix: u64, min_terminals: u64) -> Result<Option<SearchHit>> {
        let output = self.command(radix, min_terminals).output()?;
        if !output.status.success() {
            return Err(Error::SearchTool(format!(
                "{} exited with {}: {}",
                self.exe.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        parse_search_output(&String::from_utf8_lossy(&output.stdout))
    }
}

/// 解析搜索程序的输出：第一行是表头，第二行（若存在）是最优结果。
/// 终端数、路由器数、链路数分别位于第 6、7、9 个字段。
pub fn parse_search_output(stdout: &str) -> Result<Option<SearchHit>> {
    let Some(line) = stdout.lines().nth(1).filter(|l| !l.trim().is_empty()) else {
        return Ok(None);
    };
    let fields: Vec<&str> = line.split_whitespace().collect();
    let field = |idx: usize, name: &str| -> Result<u64> {
        let raw = fields.get(idx).ok_or_else(|| {
            Error::SearchTool(format!("result line has no {name} field: {line:?}"))
        })?;
        raw.parse()
            .map_err(|_| Error::SearchTool(format!("{name} field {raw:?} is not a count")))
    };
    Ok(Some(SearchHit {
        terminals: field(5, "terminals")?,
        routers: field(6, "routers")?,
        channels: field(8, "channels")?,
    }))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleRow {
    pub radix: u64,
    pub terminals: u64,
    pub routers: u64,
    pub channels: u64,
    pub terminals_per_router: f64,
    pub channels_per_terminal: f64,
}

impl ScaleRow {
    pub const CSV_HEADER: &'static str = "radix,terms,routers,channels,terms/router,channels/term";

    pub fn new(radix: u64, hit: SearchHit) -> Self {
        Self {
            radix,
            terminals: hit.terminals,
            routers: hit.routers,
            channels: hit.channels,
            terminals_per_router: hit.terminals as f64 / hit.routers as f64,
            channels_per_terminal: hit.channels as f64 / hit.terminals as f64,
        }
    }

    pub fn csv_line(&self) -> String {
        format!(
            "{},{},{},{},{},{}",
            self.radix,
            self.terminals,
            self.routers,
            self.channels,
            self.terminals_per_router,
            self.channels_per_terminal
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleOpts {
    pub min_radix: u64,
    pub max_radix: u64,
    pub max_dimensions: u64,
    /// 线程池大小
    pub cores: usize,
}

impl ScaleOpts {
    pub fn validate(&self) -> Result<()> {
        if self.min_radix < 2 {
            return Err(Error::OutOfBounds {
                name: "minradix",
                value: self.min_radix,
                bound: "greater than 1",
            });
        }
        if self.max_radix < self.min_radix {
            return Err(Error::OutOfBounds {
                name: "maxradix",
                value: self.max_radix,
                bound: "at least minradix",
            });
        }
        if self.max_dimensions == 0 {
            return Err(Error::OutOfBounds {
                name: "maxdimensions",
                value: self.max_dimensions,
                bound: "greater than 0",
            });
        }
        Ok(())
    }
}

/// 二分查找给定 radix 下可行的最大终端数。
///
/// 搜索区间为 `[2, radix^(max_dimensions+1)]`，上界本身必须不可行。
/// 结果中的终端数取自搜索程序的输出，而不是二分的中点。
#[tracing::instrument(skip(probe))]
pub fn largest_network<P: SearchProbe + ?Sized>(
    probe: &P,
    radix: u64,
    max_dimensions: u64,
) -> Result<ScaleRow> {
    let bound = u32::try_from(max_dimensions.saturating_add(1))
        .ok()
        .and_then(|exp| radix.checked_pow(exp))
        .ok_or(Error::Overflow("search upper bound"))?;
    if probe.probe(radix, bound)?.is_some() {
        return Err(Error::SearchTool(format!(
            "{bound} terminals should be unreachable at radix {radix}"
        )));
    }

    let mut bot = 2_u64;
    let mut top = bound - 1;
    let mut best = probe.probe(radix, bot)?.ok_or(Error::Infeasible { radix })?;
    while bot < top {
        let mid = bot + (top - bot).div_ceil(2);
        let hit = probe.probe(radix, mid)?;
        debug!(bot, top, mid, feasible = hit.is_some(), "bisect");
        match hit {
            Some(hit) => {
                bot = mid;
                best = hit;
            }
            None => top = mid - 1,
        }
    }

    let row = ScaleRow::new(radix, best);
    info!(
        terminals = row.terminals,
        routers = row.routers,
        channels = row.channels,
        "largest network found"
    );
    Ok(row)
}

/// 对 `[min_radix, max_radix]` 中每个 radix 执行一次 [`largest_network`]。
/// 每个任务只写入自己 radix 对应的条目。
pub fn scale<P: SearchProbe + ?Sized>(probe: &P, opts: &ScaleOpts) -> Result<BTreeMap<u64, ScaleRow>> {
    opts.validate()?;
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(opts.cores.max(1))
        .thread_name(|idx| format!("scale-{idx}"))
        .build()?;
    info!(cores = pool.current_num_threads(), "scanning radices {}..={}", opts.min_radix, opts.max_radix);

    pool.install(|| {
        (opts.min_radix..=opts.max_radix)
            .into_par_iter()
            .map(|radix| largest_network(probe, radix, opts.max_dimensions).map(|row| (radix, row)))
            .collect()
    })
}
