//! 拓扑度量计算
//!
//! 每种拓扑族（dragonfly、fat-tree、HyperX）一个子模块，
//! 各自负责参数校验、度量推导和报告生成。

pub mod dragonfly;
pub mod fat_tree;
pub mod hyperx;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::report::Report;

pub use dragonfly::{DragonflyMetrics, DragonflyParams};
pub use fat_tree::{FatTreeLevel, FatTreeMetrics, FatTreeParams};
pub use hyperx::{HyperxMetrics, HyperxParams};

/// 无序对数量 `n(n-1)/2`，即 n 个节点全连接所需的链路数。
/// 结果超出 u64 时饱和为 `u64::MAX`。
pub fn tri(n: u64) -> u64 {
    checked_tri(n).unwrap_or(u64::MAX)
}

/// 同 [`tri`]，结果超出 u64 时返回 `None`
pub fn checked_tri(n: u64) -> Option<u64> {
    let (lhs, rhs) = if n % 2 == 0 {
        (n / 2, n.saturating_sub(1))
    } else {
        (n, n / 2)
    };
    lhs.checked_mul(rhs)
}

/// 一个完整给定的拓扑实例
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TopologyParameters {
    Dragonfly(DragonflyParams),
    FatTree(FatTreeParams),
    Hyperx(HyperxParams),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DerivedMetrics {
    Dragonfly(DragonflyMetrics),
    FatTree(FatTreeMetrics),
    Hyperx(HyperxMetrics),
}

impl DerivedMetrics {
    pub fn terminals(&self) -> u64 {
        match self {
            DerivedMetrics::Dragonfly(m) => m.terminals,
            DerivedMetrics::FatTree(m) => m.terminals,
            DerivedMetrics::Hyperx(m) => m.terminals,
        }
    }

    pub fn routers(&self) -> u64 {
        match self {
            DerivedMetrics::Dragonfly(m) => m.routers,
            DerivedMetrics::FatTree(m) => m.total_routers,
            DerivedMetrics::Hyperx(m) => m.routers,
        }
    }
}

impl TopologyParameters {
    pub fn validate(&self) -> Result<()> {
        match self {
            TopologyParameters::Dragonfly(p) => p.validate(),
            TopologyParameters::FatTree(p) => p.validate(),
            TopologyParameters::Hyperx(p) => p.validate(),
        }
    }

    pub fn compute(&self) -> Result<DerivedMetrics> {
        Ok(match self {
            TopologyParameters::Dragonfly(p) => DerivedMetrics::Dragonfly(p.compute()?),
            TopologyParameters::FatTree(p) => DerivedMetrics::FatTree(p.compute()?),
            TopologyParameters::Hyperx(p) => DerivedMetrics::Hyperx(p.compute()?),
        })
    }

    /// 校验、计算并生成报告
    pub fn report(&self) -> Result<Report> {
        match self {
            TopologyParameters::Dragonfly(p) => p.report(),
            TopologyParameters::FatTree(p) => p.report(),
            TopologyParameters::Hyperx(p) => p.report(),
        }
    }
}

pub(crate) fn require(name: &'static str, value: u64, min: u64, bound: &'static str) -> Result<()> {
    if value < min {
        return Err(Error::OutOfBounds { name, value, bound });
    }
    Ok(())
}

/// 乘积，溢出时报错
pub(crate) fn product(what: &'static str, values: impl IntoIterator<Item = u64>) -> Result<u64> {
    values
        .into_iter()
        .try_fold(1_u64, |acc, v| acc.checked_mul(v))
        .ok_or(Error::Overflow(what))
}

pub(crate) fn checked(what: &'static str, value: Option<u64>) -> Result<u64> {
    value.ok_or(Error::Overflow(what))
}
