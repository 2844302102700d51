use super::{KeyCounter, Method};
use crate::config::KeyspaceParams;
use crate::error::KsResult;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use std::time::Instant;
use tracing::{debug, info};

/// Square matrix of exact counts, stored row-major.
///
/// Entry `(i, j)` of the adjacency matrix raised to `k` is the number of
/// keys with `k + 1` cuts that start at depth `i`, end at depth `j` and keep
/// every adjacent pair within MACS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountMatrix {
    size: usize,
    cells: Vec<BigUint>,
}

impl CountMatrix {
    pub fn identity(size: usize) -> Self {
        let mut cells = vec![BigUint::zero(); size * size];
        for i in 0..size {
            cells[i * size + i] = BigUint::one();
        }
        Self { size, cells }
    }

    /// `1` where `|i - j| <= macs`, else `0`.
    pub fn adjacency(depths: usize, macs: usize) -> Self {
        let mut cells = Vec::with_capacity(depths * depths);
        for i in 0..depths {
            for j in 0..depths {
                cells.push(if i.abs_diff(j) <= macs {
                    BigUint::one()
                } else {
                    BigUint::zero()
                });
            }
        }
        Self {
            size: depths,
            cells,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> &BigUint {
        &self.cells[row * self.size + col]
    }

    pub fn mul(&self, rhs: &CountMatrix) -> CountMatrix {
        assert_eq!(self.size, rhs.size, "matrix dimensions differ");
        let n = self.size;
        let mut out = vec![BigUint::zero(); n * n];
        for i in 0..n {
            for k in 0..n {
                let a = &self.cells[i * n + k];
                if a.is_zero() {
                    continue;
                }
                for j in 0..n {
                    let b = &rhs.cells[k * n + j];
                    if !b.is_zero() {
                        out[i * n + j] += a * b;
                    }
                }
            }
        }
        CountMatrix { size: n, cells: out }
    }

    /// Exponentiation by repeated squaring.
    pub fn pow(&self, mut exp: usize) -> CountMatrix {
        let mut result = CountMatrix::identity(self.size);
        let mut base = self.clone();
        while exp > 0 {
            if exp & 1 == 1 {
                result = result.mul(&base);
            }
            exp >>= 1;
            if exp > 0 {
                base = base.mul(&base);
            }
        }
        result
    }

    pub fn sum(&self) -> BigUint {
        self.cells.iter().sum()
    }
}

/// Counts keys under the MACS rule alone.
pub struct TransferMatrixCounter;

impl KeyCounter for TransferMatrixCounter {
    fn method(&self) -> Method {
        Method::Matrix
    }

    fn count(&self, params: &KeyspaceParams) -> KsResult<BigUint> {
        params.validate()?;
        if params.positions == 0 {
            return Ok(BigUint::one());
        }

        let start = Instant::now();
        let adjacency = CountMatrix::adjacency(params.depths, params.macs);
        debug!(
            "Adjacency matrix {}x{}, raising to power {}",
            params.depths,
            params.depths,
            params.positions - 1
        );
        let total = adjacency.pow(params.positions - 1).sum();

        info!(
            "Transfer matrix ({}): {} keys in {:.2?}",
            params,
            total,
            start.elapsed()
        );
        Ok(total)
    }
}
