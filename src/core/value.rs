use super::{Dim, HostType};
use crate::error::CoercionError;
use std::borrow::Cow;

/// Real used for host NA entries
pub const MISSING: f64 = f64::NAN;

/// Missing markers are any non-finite reals; the engine decides what they mean.
#[inline]
pub fn is_missing(value: f64) -> bool {
    !value.is_finite()
}

/// Typed storage of a host vector
#[derive(Debug, Clone, PartialEq)]
pub enum HostData {
    Real(Vec<f64>),
    Integer(Vec<Option<i32>>),
    Logical(Vec<Option<bool>>),
    Text(Vec<Option<String>>),
    List(Vec<HostValue>),
    Null,
}

/// Dynamically typed host value with an optional `dim` attribute.
///
/// Cells are stored row-major: for a `rows x cols` value, cell `(i, j)`
/// lives at `i * cols + j`.
#[derive(Debug, Clone, PartialEq)]
pub struct HostValue {
    data: HostData,
    dim: Option<Dim>,
}

impl HostValue {
    pub fn new(data: HostData) -> Self {
        Self { data, dim: None }
    }

    pub fn real(data: Vec<f64>) -> Self {
        Self::new(HostData::Real(data))
    }

    pub fn integer(data: Vec<Option<i32>>) -> Self {
        Self::new(HostData::Integer(data))
    }

    pub fn logical(data: Vec<Option<bool>>) -> Self {
        Self::new(HostData::Logical(data))
    }

    pub fn text<S: Into<String>>(data: Vec<Option<S>>) -> Self {
        Self::new(HostData::Text(
            data.into_iter().map(|s| s.map(Into::into)).collect(),
        ))
    }

    pub fn list(items: Vec<HostValue>) -> Self {
        Self::new(HostData::List(items))
    }

    pub fn null() -> Self {
        Self::new(HostData::Null)
    }

    /// Real matrix from row-major cells
    pub fn real_matrix(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        Self::real(data).with_dim(Dim::matrix(rows, cols))
    }

    /// Real matrix from nested rows. Ragged rows leave the value without a
    /// `dim` attribute, so it will not pass as a matrix.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Self {
        let ncols = rows.first().map_or(0, |r| r.as_ref().len());
        let data: Vec<f64> = rows.iter().flat_map(|r| r.as_ref().iter().copied()).collect();

        if rows.iter().all(|r| r.as_ref().len() == ncols) {
            Self::real_matrix(rows.len(), ncols, data)
        } else {
            Self::real(data)
        }
    }

    pub fn with_dim(mut self, dim: impl Into<Dim>) -> Self {
        self.dim = Some(dim.into());
        self
    }

    #[inline]
    pub fn host_type(&self) -> HostType {
        match &self.data {
            HostData::Real(_) => HostType::Real,
            HostData::Integer(_) => HostType::Integer,
            HostData::Logical(_) => HostType::Logical,
            HostData::Text(_) => HostType::Text,
            HostData::List(_) => HostType::List,
            HostData::Null => HostType::Null,
        }
    }

    #[inline]
    pub fn data(&self) -> &HostData {
        &self.data
    }

    #[inline]
    pub fn dim(&self) -> Option<&Dim> {
        self.dim.as_ref()
    }

    pub fn len(&self) -> usize {
        match &self.data {
            HostData::Real(v) => v.len(),
            HostData::Integer(v) => v.len(),
            HostData::Logical(v) => v.len(),
            HostData::Text(v) => v.len(),
            HostData::List(v) => v.len(),
            HostData::Null => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read the cells as reals. Reals are borrowed, everything else is
    /// converted into a fresh buffer; NA becomes [`MISSING`].
    pub fn coerce_real(&self) -> Result<Cow<'_, [f64]>, CoercionError> {
        match &self.data {
            HostData::Real(v) => Ok(Cow::Borrowed(v.as_slice())),
            HostData::Integer(v) => Ok(Cow::Owned(
                v.iter().map(|x| x.map_or(MISSING, f64::from)).collect(),
            )),
            HostData::Logical(v) => Ok(Cow::Owned(
                v.iter()
                    .map(|x| x.map_or(MISSING, |b| if b { 1.0 } else { 0.0 }))
                    .collect(),
            )),
            HostData::Text(v) => v
                .iter()
                .map(|s| match s.as_deref().map(str::trim) {
                    None | Some("NA") => Ok(MISSING),
                    Some(s) => s
                        .parse::<f64>()
                        .map_err(|_| CoercionError::new(format!("character value {:?}", s))),
                })
                .collect::<Result<Vec<f64>, _>>()
                .map(Cow::Owned),
            HostData::List(_) => Err(CoercionError::new(HostType::List.name())),
            HostData::Null => Ok(Cow::Owned(Vec::new())),
        }
    }
}

impl From<Vec<f64>> for HostValue {
    fn from(data: Vec<f64>) -> Self {
        Self::real(data)
    }
}
