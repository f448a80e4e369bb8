//! HyperX（广义超立方）度量
//!
//! 每一维内路由器全连接，同一维每对路由器之间有 `weight` 条链路。

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{checked, checked_tri, product, require};
use crate::error::{Error, Result};
use crate::report::{self, Report};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HyperxParams {
    pub widths: Vec<u64>,
    pub weights: Vec<u64>,
    pub concentration: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HyperxMetrics {
    pub dimensions: usize,
    pub terminals: u64,
    pub routers: u64,
    pub radix: u64,
    /// 终端链路在前，随后每维一个
    pub channels: Vec<u64>,
    /// 每维一个
    pub bisections: Vec<f64>,
}

impl HyperxParams {
    pub fn new(widths: Vec<u64>, weights: Vec<u64>, concentration: u64) -> Self {
        Self {
            widths,
            weights,
            concentration,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.widths.is_empty() {
            return Err(Error::Empty("widths"));
        }
        if self.widths.len() != self.weights.len() {
            return Err(Error::LengthMismatch {
                widths: self.widths.len(),
                weights: self.weights.len(),
            });
        }
        for width in &self.widths {
            require("width", *width, 2, "greater than 1")?;
        }
        for weight in &self.weights {
            require("weight", *weight, 1, "greater than 0")?;
        }
        require("concentration", self.concentration, 1, "greater than 0")
    }

    pub fn compute(&self) -> Result<HyperxMetrics> {
        self.validate()?;
        let conc = self.concentration;

        let routers = product("routers", self.widths.iter().copied())?;
        let terminals = checked("terminals", routers.checked_mul(conc))?;

        let mut radix = conc;
        let mut channels = Vec::with_capacity(self.widths.len() + 1);
        let mut bisections = Vec::with_capacity(self.widths.len());
        channels.push(terminals);
        for (dim, (&width, &weight)) in self.widths.iter().zip(&self.weights).enumerate() {
            radix = checked(
                "radix",
                (width - 1)
                    .checked_mul(weight)
                    .and_then(|ports| radix.checked_add(ports)),
            )?;
            bisections.push((width as f64 * weight as f64) / (2.0 * conc as f64));

            // 本维的全连接在其余各维的每个组合上各复制一份
            let others = self
                .widths
                .iter()
                .enumerate()
                .filter(|(other, _)| *other != dim)
                .map(|(_, w)| *w);
            let replicas = product("channels", others)?;
            channels.push(checked(
                "channels",
                checked_tri(width)
                    .and_then(|pairs| pairs.checked_mul(weight))
                    .and_then(|c| c.checked_mul(replicas)),
            )?);
        }

        let metrics = HyperxMetrics {
            dimensions: self.widths.len(),
            terminals,
            routers,
            radix,
            channels,
            bisections,
        };
        debug!(params = ?self, ?metrics, "hyperx metrics");
        Ok(metrics)
    }

    pub fn report(&self) -> Result<Report> {
        let m = self.compute()?;
        let mut out = Report::new();
        out.push("Dimensions", m.dimensions.to_string())
            .push("Widths", report::list(&self.widths))
            .push("Weights", report::list(&self.weights))
            .push("Concentration", self.concentration.to_string())
            .push("Terminals", m.terminals.to_string())
            .push("Routers", m.routers.to_string())
            .push("Radix", m.radix.to_string())
            .push("Channels", report::list(&m.channels))
            .push("Bisections", report::fixed_list(&m.bisections, 5));
        Ok(out)
    }
}
