use crate::error::{QpError, QpResult};
use std::collections::BTreeMap;

pub const ZERO_THRESHOLD: f64 = 1e-15;

#[derive(Debug, Clone, PartialEq)]
pub struct TripletMatrix {
    pub nrows: usize,
    pub ncols: usize,
    pub rows: Vec<usize>,
    pub cols: Vec<usize>,
    pub values: Vec<f64>,
}

impl TripletMatrix {
    pub fn from_map(
        nrows: usize,
        ncols: usize,
        map: &BTreeMap<(usize, usize), f64>,
    ) -> QpResult<Self> {
        let mut rows = Vec::with_capacity(map.len());
        let mut cols = Vec::with_capacity(map.len());
        let mut values = Vec::with_capacity(map.len());
        for (&(row, col), &value) in map {
            if value.abs() <= ZERO_THRESHOLD || value.is_nan() {
                continue;
            }
            if value.is_infinite() {
                return Err(QpError::NonFinite {
                    what: "matrix entry",
                    value,
                });
            }
            rows.push(row);
            cols.push(col);
            values.push(value);
        }
        Ok(Self {
            nrows,
            ncols,
            rows,
            cols,
            values,
        })
    }

    pub fn nnz(&self) -> usize {
        self.values.len()
    }
}
