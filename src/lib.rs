pub mod cli;
pub mod coord;
pub mod error;
pub mod report;
pub mod scale;
pub mod topo;

pub use error::{Error, Result};

#[cfg(test)]
mod test;
