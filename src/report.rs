//! 报告渲染
//!
//! 所有计算器共用的两行输出：第一行是标签，第二行是对应的值。
//! 每一列的宽度取标签和值中较长者，左对齐，列之间用单个空格分隔。

use std::fmt::Display;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    columns: Vec<(String, String)>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一列
    pub fn push(&mut self, label: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.columns.push((label.into(), value.into()));
        self
    }

    pub fn columns(&self) -> &[(String, String)] {
        &self.columns
    }

    pub fn header_line(&self) -> String {
        self.line(|(label, _)| label)
    }

    pub fn value_line(&self) -> String {
        self.line(|(_, value)| value)
    }

    /// 渲染为两行文本（末尾带换行）
    pub fn render(&self) -> String {
        format!("{}\n{}\n", self.header_line(), self.value_line())
    }

    fn line<'a>(&'a self, pick: impl Fn(&'a (String, String)) -> &'a String) -> String {
        self.columns
            .iter()
            .map(|column| {
                let width = column.0.chars().count().max(column.1.chars().count());
                format!("{:<width$}", pick(column))
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// `[v1,v2,...]`
pub fn list<T: Display>(values: &[T]) -> String {
    let inner = values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");
    format!("[{inner}]")
}

/// 定点小数列表，例如 `[0.25000,1.00000]`
pub fn fixed_list(values: &[f64], decimals: usize) -> String {
    let inner = values
        .iter()
        .map(|v| format!("{v:.decimals$}"))
        .collect::<Vec<_>>()
        .join(",");
    format!("[{inner}]")
}

/// 百分比列表，比例乘以 100 后保留两位小数，例如 `[50.00%]`
pub fn percent_list(ratios: &[f64]) -> String {
    let inner = ratios
        .iter()
        .map(|r| format!("{:.2}%", r * 100.0))
        .collect::<Vec<_>>()
        .join(",");
    format!("[{inner}]")
}
