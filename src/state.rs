use crate::error::SimError;

/// Convert interior/ghost coordinates to a flat index on the padded grid.
/// Row-major: `i` walks along a row, `j` selects the row. Valid for
/// `0 <= i, j <= n + 1`.
#[inline(always)]
pub const fn idx(i: usize, j: usize, n: usize) -> usize {
    i + j * (n + 2)
}

/// Number of cells in a padded `(n+2) x (n+2)` field.
#[inline(always)]
pub const fn padded_len(n: usize) -> usize {
    (n + 2) * (n + 2)
}

/// Allocate a zeroed field, reporting allocation failure instead of aborting.
pub fn alloc_field(n: usize) -> Result<Vec<f64>, SimError> {
    let cells = padded_len(n);
    let mut field = Vec::new();
    field
        .try_reserve_exact(cells)
        .map_err(|source| SimError::Allocation { resolution: n, cells, source })?;
    field.resize(cells, 0.0);
    Ok(field)
}

/// Two storage buffers whose `current` / `previous` roles are exchanged by
/// flipping an index. Swapping never moves or copies field data.
#[derive(Debug, Clone)]
pub struct FieldPair {
    bufs: [Vec<f64>; 2],
    cur: usize,
}

impl FieldPair {
    pub fn new(n: usize) -> Result<Self, SimError> {
        Ok(Self { bufs: [alloc_field(n)?, alloc_field(n)?], cur: 0 })
    }

    pub fn swap(&mut self) {
        self.cur ^= 1;
    }

    pub fn current(&self) -> &[f64] {
        &self.bufs[self.cur]
    }

    pub fn current_mut(&mut self) -> &mut [f64] {
        &mut self.bufs[self.cur]
    }

    pub fn previous(&self) -> &[f64] {
        &self.bufs[self.cur ^ 1]
    }

    /// Borrow `(current, previous)` at once: the write target and its source.
    pub fn split_mut(&mut self) -> (&mut [f64], &[f64]) {
        let (a, b) = self.bufs.split_at_mut(1);
        if self.cur == 0 {
            (a[0].as_mut_slice(), b[0].as_slice())
        } else {
            (b[0].as_mut_slice(), a[0].as_slice())
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.bufs[0].len()
    }
}
