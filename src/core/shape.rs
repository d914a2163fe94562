/// `dim` attribute of a host value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dim {
    dims: Vec<usize>,
}

impl Dim {
    #[inline]
    pub fn new(dims: Vec<usize>) -> Self {
        Self { dims }
    }

    #[inline]
    pub fn matrix(rows: usize, cols: usize) -> Self {
        Self { dims: vec![rows, cols] }
    }

    #[inline]
    pub fn square(n: usize) -> Self {
        Self::matrix(n, n)
    }

    #[inline]
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Number of cells, `None` on overflow
    #[inline]
    pub fn numel(&self) -> Option<usize> {
        self.dims.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
    }

    /// `(rows, cols)` when the attribute describes a matrix
    #[inline]
    pub fn as_matrix(&self) -> Option<(usize, usize)> {
        match self.dims.as_slice() {
            &[rows, cols] => Some((rows, cols)),
            _ => None,
        }
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        matches!(self.as_matrix(), Some((r, c)) if r == c)
    }
}

impl From<Vec<usize>> for Dim {
    fn from(dims: Vec<usize>) -> Self {
        Self::new(dims)
    }
}

impl From<(usize, usize)> for Dim {
    fn from((rows, cols): (usize, usize)) -> Self {
        Self::matrix(rows, cols)
    }
}

impl std::fmt::Display for Dim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.dims.iter().map(|d| d.to_string()).collect();
        write!(f, "{}", parts.join("x"))
    }
}
