//! 终端编号与坐标之间的互相转换
//!
//! 坐标是一个混合进制数：最低位的基数是 concentration（终端在路由器上的本地编号），
//! 之后依次是各维的宽度。线性编号可以带一个循环偏移。

use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::topo::product;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoordinateSpace {
    concentration: u64,
    widths: Vec<u64>,
    terms: u64,
}

/// 坐标各维输出的先后顺序。本地编号在小端格式中位于最前，在大端格式中位于最后。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DigitOrder {
    #[default]
    LittleEndian,
    BigEndian,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Coordinate {
    /// 路由器上的本地终端编号
    pub local: u64,
    /// 各维坐标，按维度输入顺序（最低位在前）
    pub dims: Vec<u64>,
    pub order: DigitOrder,
}

impl CoordinateSpace {
    pub fn new(concentration: u64, widths: Vec<u64>) -> Result<Self> {
        if concentration == 0 {
            return Err(Error::OutOfBounds {
                name: "concentration",
                value: concentration,
                bound: "greater than 0",
            });
        }
        if let Some(&width) = widths.iter().find(|w| **w < 2) {
            return Err(Error::OutOfBounds {
                name: "width",
                value: width,
                bound: "greater than 1",
            });
        }
        let terms = product(
            "terminals",
            std::iter::once(concentration).chain(widths.iter().copied()),
        )?;
        Ok(Self {
            concentration,
            widths,
            terms,
        })
    }

    pub fn concentration(&self) -> u64 {
        self.concentration
    }

    pub fn widths(&self) -> &[u64] {
        &self.widths
    }

    pub fn terms(&self) -> u64 {
        self.terms
    }

    /// 各位的基数：`[concentration, width_0, width_1, ...]`
    pub fn radices(&self) -> impl Iterator<Item = u64> + '_ {
        std::iter::once(self.concentration).chain(self.widths.iter().copied())
    }

    /// 校验编号与偏移，并返回 `(index + offset) mod terms`。
    pub fn wrap(&self, index: u64, offset: i64) -> Result<u64> {
        if index >= self.terms {
            return Err(Error::IndexOutOfRange {
                index,
                terms: self.terms,
            });
        }
        if offset.unsigned_abs() >= self.terms {
            return Err(Error::OffsetOutOfRange {
                offset,
                terms: self.terms,
            });
        }
        let wrapped = (i128::from(index) + i128::from(offset)).rem_euclid(i128::from(self.terms));
        // 0 <= wrapped < terms <= u64::MAX
        Ok(wrapped as u64)
    }
}

pub fn index_to_coordinate(
    space: &CoordinateSpace,
    index: u64,
    offset: i64,
    order: DigitOrder,
) -> Result<Coordinate> {
    let mut rem = space.wrap(index, offset)?;
    let mut digits = space.radices().map(|radix| {
        let digit = rem % radix;
        rem /= radix;
        digit
    });
    // radices 至少包含 concentration 一项
    let local = digits.next().unwrap_or(0);
    let dims = digits.collect();
    Ok(Coordinate { local, dims, order })
}

/// 混合进制还原：`index = Σ digit_i · Π_{j<i} radix_j`
pub fn coordinate_to_index(space: &CoordinateSpace, coord: &Coordinate) -> Result<u64> {
    if coord.dims.len() != space.widths.len() {
        return Err(Error::Malformed {
            input: coord.to_string(),
            reason: format!(
                "expected {} dimensions, got {}",
                space.widths.len(),
                coord.dims.len()
            ),
        });
    }
    let mut index = 0_u64;
    let mut stride = 1_u64;
    for (position, (digit, radix)) in coord.digits().zip(space.radices()).enumerate() {
        if digit >= radix {
            return Err(Error::DigitOutOfRange {
                position,
                digit,
                radix,
            });
        }
        // index < terms 恒成立，因此不会溢出
        index += digit * stride;
        stride = stride.saturating_mul(radix);
    }
    Ok(index)
}

impl Coordinate {
    /// 最低位在前的全部数位（本地编号在首位）
    pub fn digits(&self) -> impl Iterator<Item = u64> + '_ {
        std::iter::once(self.local).chain(self.dims.iter().copied())
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.order {
            DigitOrder::LittleEndian => write!(f, "{}-{}", self.local, join(self.dims.iter())),
            DigitOrder::BigEndian => write!(f, "{}-{}", join(self.dims.iter().rev()), self.local),
        }
    }
}

fn join<'a>(dims: impl Iterator<Item = &'a u64>) -> String {
    dims.map(ToString::to_string).collect::<Vec<_>>().join(",")
}
