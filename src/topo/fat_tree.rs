//! Fat-tree 度量
//!
//! 多级折叠 fat-tree。第 0 级最靠近终端，每一级给出向下端口数 `down`
//! 和向上端口数 `up`；最高一级没有向上端口（`up = 0`）。
//! 紧凑写法：`down1xup1-down2xup2-...-downN`，例如 `8x4-6x3-10`。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::checked;
use crate::error::{Error, Result};
use crate::report::{self, Report};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FatTreeLevel {
    pub down: u64,
    #[serde(default)]
    pub up: u64,
}

impl FatTreeLevel {
    pub fn radix(&self) -> u64 {
        self.down.saturating_add(self.up)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FatTreeParams {
    pub levels: Vec<FatTreeLevel>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FatTreeMetrics {
    pub levels: usize,
    pub terminals: u64,
    /// 每级路由器总数
    pub routers: Vec<u64>,
    pub total_routers: u64,
    /// 每级路由器端口数
    pub radix: Vec<u64>,
    /// 每级向下的链路数
    pub channels: Vec<u64>,
    pub total_channels: u64,
    /// 第 1 级及以上的累计对分带宽（到该级为止的最小值）
    pub bisections: Vec<f64>,
}

impl FatTreeParams {
    pub fn new(levels: Vec<FatTreeLevel>) -> Self {
        Self { levels }
    }

    pub fn validate(&self) -> Result<()> {
        if self.levels.is_empty() {
            return Err(Error::Empty("fat-tree levels"));
        }
        let top = self.levels.len() - 1;
        for (level, l) in self.levels.iter().enumerate() {
            if l.down == 0 {
                return Err(Error::LevelOutOfBounds {
                    level,
                    name: "down ports",
                    value: l.down,
                    bound: "greater than 0",
                });
            }
            if level < top && l.up == 0 {
                return Err(Error::LevelOutOfBounds {
                    level,
                    name: "up ports",
                    value: l.up,
                    bound: "greater than 0",
                });
            }
            if level == top && l.up != 0 {
                return Err(Error::LevelOutOfBounds {
                    level,
                    name: "up ports",
                    value: l.up,
                    bound: "0 at the top level",
                });
            }
        }
        Ok(())
    }

    pub fn compute(&self) -> Result<FatTreeMetrics> {
        self.validate()?;
        let n = self.levels.len();

        // 每组（以某级路由器为根的子树）的终端数与该级路由器数
        let mut terms_per_group = Vec::with_capacity(n);
        let mut routers_per_group = Vec::with_capacity(n);
        let mut terms = 1_u64;
        let mut group_routers = 1_u64;
        for (level, l) in self.levels.iter().enumerate() {
            terms = checked("terminals", terms.checked_mul(l.down))?;
            terms_per_group.push(terms);
            routers_per_group.push(group_routers);
            if level + 1 < n {
                group_routers = checked("routers per group", group_routers.checked_mul(l.up))?;
            }
        }

        let mut routers = Vec::with_capacity(n);
        let mut channels = Vec::with_capacity(n);
        let mut bisections = Vec::with_capacity(n.saturating_sub(1));
        let mut tightest = f64::INFINITY;
        for (level, l) in self.levels.iter().enumerate() {
            let groups = terms / terms_per_group[level];
            let at_level = checked("routers", groups.checked_mul(routers_per_group[level]))?;
            routers.push(at_level);
            channels.push(checked("channels", l.down.checked_mul(at_level))?);
            if level > 0 {
                let this = (l.down as f64 * routers_per_group[level] as f64)
                    / terms_per_group[level] as f64;
                tightest = tightest.min(this);
                bisections.push(tightest);
            }
        }

        let metrics = FatTreeMetrics {
            levels: n,
            terminals: terms,
            total_routers: sum("routers", &routers)?,
            total_channels: sum("channels", &channels)?,
            routers,
            radix: self.levels.iter().map(FatTreeLevel::radix).collect(),
            channels,
            bisections,
        };
        debug!(ports = %self, ?metrics, "fat-tree metrics");
        Ok(metrics)
    }

    pub fn report(&self) -> Result<Report> {
        let m = self.compute()?;
        let mut out = Report::new();
        out.push("Levels", m.levels.to_string())
            .push("Ports", self.to_string())
            .push("Terminals", m.terminals.to_string())
            .push("Routers", report::list(&m.routers))
            .push("TotalRouters", m.total_routers.to_string())
            .push("Radix", report::list(&m.radix))
            .push("Channels", report::list(&m.channels))
            .push("TotalChannels", m.total_channels.to_string())
            .push("Bisection", report::percent_list(&m.bisections));
        Ok(out)
    }
}

fn sum(what: &'static str, values: &[u64]) -> Result<u64> {
    values
        .iter()
        .try_fold(0_u64, |acc, v| acc.checked_add(*v))
        .ok_or(Error::Overflow(what))
}

impl FromStr for FatTreeParams {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let malformed = |reason: &str| Error::Malformed {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let parts: Vec<&str> = s.split('-').collect();
        let top = parts.len() - 1;
        let mut levels = Vec::with_capacity(parts.len());
        for (idx, part) in parts.iter().enumerate() {
            let values = part
                .split('x')
                .map(|v| v.trim().parse::<u64>())
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|e| malformed(&format!("{part:?} is not a port count ({e})")))?;
            if values.iter().any(|v| *v == 0) {
                return Err(malformed("only values greater than 0 are valid"));
            }
            let level = match (idx == top, values.as_slice()) {
                (true, [down]) => FatTreeLevel { down: *down, up: 0 },
                (true, _) => return Err(malformed("the last level must be a single value")),
                (false, [down, up]) => FatTreeLevel { down: *down, up: *up },
                (false, _) => return Err(malformed("all non-last levels must have two values")),
            };
            levels.push(level);
        }
        Ok(FatTreeParams { levels })
    }
}

impl fmt::Display for FatTreeParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let top = self.levels.len().saturating_sub(1);
        for (idx, l) in self.levels.iter().enumerate() {
            if idx > 0 {
                f.write_str("-")?;
            }
            if idx == top {
                write!(f, "{}", l.down)?;
            } else {
                write!(f, "{}x{}", l.down, l.up)?;
            }
        }
        Ok(())
    }
}
