use ndarray::{s, ArcArray2, Array2, ArrayView1, ArrayView2, Axis};

/// Homogeneous cell array: every cell references the same number of points.
///
/// Stored as rows of `[count, index_0, ..., index_count-1]`, so a vertex cell is
/// `(1, i)` and a line cell is `(2, a, b)`. The rows are reference counted, cloning
/// a cell array does not copy them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellArray {
    cells: ArcArray2<usize>,
}

impl CellArray {
    /// Vertex cells `(1, 0), (1, 1), ..., (1, count - 1)`.
    pub fn vertices(count: usize) -> Self {
        Self {
            cells: Array2::from_shape_fn((count, 2), |(i, k)| if k == 0 { 1 } else { i })
                .into_shared(),
        }
    }

    /// Line cells, one per `(a, b)` pair.
    pub fn lines<I>(pairs: I) -> Self
    where
        I: ExactSizeIterator<Item = (usize, usize)>,
    {
        let mut cells = Array2::<usize>::zeros((pairs.len(), 3));
        for (mut cell, (a, b)) in cells.axis_iter_mut(Axis(0)).zip(pairs) {
            cell[0] = 2;
            cell[1] = a;
            cell[2] = b;
        }
        Self {
            cells: cells.into_shared(),
        }
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of points referenced by each cell.
    pub fn points_per_cell(&self) -> usize {
        self.cells.ncols().saturating_sub(1)
    }

    /// Point indices of the cell `index`, without the count prefix.
    pub fn cell(&self, index: usize) -> ArrayView1<usize> {
        self.cells.slice(s![index, 1..])
    }

    /// Iterates the point indices of each cell.
    pub fn iter(&self) -> impl Iterator<Item = ArrayView1<usize>> + '_ {
        self.cells.axis_iter(Axis(0)).map(|cell| cell.slice_move(s![1..]))
    }

    /// The raw rows including the count prefix.
    pub fn as_array(&self) -> ArrayView2<usize> {
        self.cells.view()
    }

    /// Owned rows, copied only when the storage is shared.
    pub fn into_array(self) -> Array2<usize> {
        self.cells.into_owned()
    }
}

/// Keeps the largest vertex cell array built so far.
///
/// Vertex cells for `n` points are the prefix of the cells for any `m >= n`
/// points, so a rebuild with fewer points returns a view of that prefix sharing
/// the cached storage.
/// The cache is single owner, sharing it between threads needs external locking.
#[derive(Clone, Debug, Default)]
pub struct VertexCellCache {
    cells: Option<ArcArray2<usize>>,
}

impl VertexCellCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Vertex cells for `count` points.
    pub fn get(&mut self, count: usize) -> CellArray {
        if let Some(cells) = self.cells.as_ref().filter(|cells| cells.nrows() >= count) {
            tracing::trace!(count, capacity = cells.nrows(), "reusing vertex cells");
            return CellArray {
                cells: cells.clone().slice_move(s![..count, ..]),
            };
        }

        let fresh = CellArray::vertices(count);
        self.cells = Some(fresh.cells.clone());
        fresh
    }

    /// Number of vertex cells held, 0 if nothing was built yet.
    pub fn capacity(&self) -> usize {
        self.cells.as_ref().map_or(0, |cells| cells.nrows())
    }

    pub fn clear(&mut self) {
        self.cells = None;
    }
}
