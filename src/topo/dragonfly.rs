//! Dragonfly 度量
//!
//! 组内路由器全连接（local），组与组之间全连接（global），
//! 每个路由器挂 `concentration` 个终端。

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{checked, checked_tri, require};
use crate::error::Result;
use crate::report::{self, Report};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragonflyParams {
    /// 组数
    pub global_width: u64,
    /// 每对组之间的链路数
    pub global_weight: u64,
    /// 每组路由器数
    pub local_width: u64,
    /// 组内每对路由器之间的链路数
    pub local_weight: u64,
    pub concentration: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DragonflyMetrics {
    pub terminals: u64,
    pub routers: u64,
    pub radix: u64,
    /// `[terminal, local, global]`
    pub channels: [u64; 3],
    /// `[global, local]`
    pub bisections: [f64; 2],
}

impl DragonflyParams {
    pub fn validate(&self) -> Result<()> {
        require("global width", self.global_width, 2, "greater than 1")?;
        require("global weight", self.global_weight, 1, "at least 1")?;
        require("local width", self.local_width, 2, "greater than 1")?;
        require("local weight", self.local_weight, 1, "at least 1")?;
        require("concentration", self.concentration, 1, "greater than 0")?;
        Ok(())
    }

    pub fn compute(&self) -> Result<DragonflyMetrics> {
        self.validate()?;
        let g = self.global_width;
        let h = self.global_weight;
        let a = self.local_width;
        let p = self.local_weight;
        let k = self.concentration;

        let routers = checked("routers", a.checked_mul(g))?;
        let terminals = checked("terminals", routers.checked_mul(k))?;

        // 每组的 global 链路平均分摊到组内 a 个路由器上，向上取整
        let global_ports = checked("global ports", (g - 1).checked_mul(h))?.div_ceil(a);
        let local_ports = checked("local ports", (a - 1).checked_mul(p))?;
        let radix = checked(
            "radix",
            k.checked_add(local_ports)
                .and_then(|r| r.checked_add(global_ports)),
        )?;

        let local_channels = checked(
            "local channels",
            checked_tri(a)
                .and_then(|pairs| pairs.checked_mul(g))
                .and_then(|c| c.checked_mul(p)),
        )?;
        let global_channels = checked(
            "global channels",
            checked_tri(g).and_then(|pairs| pairs.checked_mul(h)),
        )?;

        let bisections = [
            (g as f64 * h as f64) / (2.0 * k as f64 * a as f64),
            (a as f64 * p as f64) / (2.0 * k as f64),
        ];

        let metrics = DragonflyMetrics {
            terminals,
            routers,
            radix,
            channels: [terminals, local_channels, global_channels],
            bisections,
        };
        debug!(params = ?self, ?metrics, "dragonfly metrics");
        Ok(metrics)
    }

    pub fn report(&self) -> Result<Report> {
        let m = self.compute()?;
        let mut out = Report::new();
        out.push("GlobalWidth", self.global_width.to_string())
            .push("GlobalWeight", self.global_weight.to_string())
            .push("LocalWidth", self.local_width.to_string())
            .push("LocalWeight", self.local_weight.to_string())
            .push("Concentration", self.concentration.to_string())
            .push("Terminals", m.terminals.to_string())
            .push("Routers", m.routers.to_string())
            .push("Radix", m.radix.to_string())
            .push("Channels", report::list(&m.channels))
            .push("Bisections", report::fixed_list(&m.bisections, 5));
        Ok(out)
    }
}
