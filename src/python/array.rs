use crate::core::{Dim, HostValue, MISSING};
use crate::error::CoercionError;
use crate::operations::{Coercible, MatrixSource, ResultGrid};
use ndarray::ArrayViewD;
use numpy::{Element, PyArray2, PyReadonlyArrayDyn, PyUntypedArray};
use pyo3::prelude::*;
use pyo3::types::{PyList, PyTuple};
use std::borrow::Cow;

/// One Python object offered as a matrix.
pub enum PyMatrix<'py> {
    /// float64 ndarray, read in place when C-contiguous
    Float(PyReadonlyArrayDyn<'py, f64>),
    /// Anything else numeric, converted up front
    Host(HostValue),
    /// Not numeric at all; fails coercion
    Opaque(String),
}

impl<'py> PyMatrix<'py> {
    pub fn extract(obj: &'py PyAny) -> Self {
        if let Ok(arr) = obj.extract::<PyReadonlyArrayDyn<'py, f64>>() {
            return PyMatrix::Float(arr);
        }
        if let Some(value) = numeric_array::<f32>(obj)
            .or_else(|| numeric_array::<i64>(obj))
            .or_else(|| numeric_array::<i32>(obj))
            .or_else(|| numeric_array::<i16>(obj))
            .or_else(|| numeric_array::<i8>(obj))
            .or_else(|| numeric_array::<u64>(obj))
            .or_else(|| numeric_array::<u32>(obj))
            .or_else(|| numeric_array::<u16>(obj))
            .or_else(|| numeric_array::<u8>(obj))
            .or_else(|| numeric_array::<bool>(obj))
        {
            return PyMatrix::Host(value);
        }
        if let Ok(arr) = obj.downcast::<PyUntypedArray>() {
            // float16, object and the like: let numpy decide what coerces
            return match astype_float64(obj) {
                Some(value) => PyMatrix::Host(value),
                None => PyMatrix::Opaque(format!("ndarray of dtype {}", dtype_name(arr))),
            };
        }
        if let Some(rows) = sequence_items(obj) {
            return from_nested_rows(rows);
        }
        if let Some(x) = cell_to_real(obj) {
            // a bare number coerces but has no shape
            return PyMatrix::Host(HostValue::real(vec![x]));
        }
        PyMatrix::Opaque(type_name(obj))
    }
}

impl MatrixSource for PyMatrix<'_> {
    fn real_cells(&self) -> Result<Cow<'_, [f64]>, CoercionError> {
        match self {
            PyMatrix::Float(arr) => {
                let view = arr.as_array();
                match view.to_slice() {
                    Some(cells) => Ok(Cow::Borrowed(cells)),
                    None => Ok(Cow::Owned(view.iter().copied().collect())),
                }
            }
            PyMatrix::Host(value) => value.coerce_real(),
            PyMatrix::Opaque(name) => Err(CoercionError::new(name.clone())),
        }
    }

    fn matrix_dim(&self) -> Option<Dim> {
        match self {
            PyMatrix::Float(arr) => Some(Dim::new(arr.shape().to_vec())),
            PyMatrix::Host(value) => value.dim().cloned(),
            PyMatrix::Opaque(_) => None,
        }
    }
}

fn numeric_array<A: Element + Coercible>(obj: &PyAny) -> Option<HostValue> {
    let arr = obj.extract::<PyReadonlyArrayDyn<'_, A>>().ok()?;
    Some(host_from_view(arr.as_array()))
}

fn astype_float64(obj: &PyAny) -> Option<HostValue> {
    let converted = obj.call_method1("astype", ("float64",)).ok()?;
    let arr = converted.extract::<PyReadonlyArrayDyn<'_, f64>>().ok()?;
    Some(host_from_view(arr.as_array()))
}

fn host_from_view<A: Coercible>(view: ArrayViewD<'_, A>) -> HostValue {
    let cells = view.iter().map(|&x| x.to_real()).collect();
    HostValue::real(cells).with_dim(Dim::new(view.shape().to_vec()))
}

// contents of a list or tuple; str and other sequences are not rows
fn sequence_items(obj: &PyAny) -> Option<Vec<&PyAny>> {
    if let Ok(list) = obj.downcast::<PyList>() {
        return Some(list.iter().collect());
    }
    obj.downcast::<PyTuple>().ok().map(|tuple| tuple.iter().collect())
}

// convert a sequence of rows; anything that is not a sequence of
// equal-length numeric rows ends up without a dim
fn from_nested_rows<'py>(rows: Vec<&'py PyAny>) -> PyMatrix<'py> {
    let nrows = rows.len();
    let mut cells = Vec::new();
    let mut ncols: Option<usize> = None;
    let mut rectangular = true;

    for row in rows {
        let row = match sequence_items(row) {
            Some(row) => row,
            None => {
                rectangular = false;
                match cell_to_real(row) {
                    Some(x) => cells.push(x),
                    None => return PyMatrix::Opaque(format!("list holding {}", type_name(row))),
                }
                continue;
            }
        };

        if *ncols.get_or_insert(row.len()) != row.len() {
            rectangular = false;
        }
        for cell in row {
            match cell_to_real(cell) {
                Some(x) => cells.push(x),
                None => return PyMatrix::Opaque(format!("list holding {}", type_name(cell))),
            }
        }
    }

    let value = HostValue::real(cells);
    if rectangular {
        PyMatrix::Host(value.with_dim(Dim::matrix(nrows, ncols.unwrap_or(0))))
    } else {
        PyMatrix::Host(value)
    }
}

fn cell_to_real(cell: &PyAny) -> Option<f64> {
    if cell.is_none() {
        return Some(MISSING);
    }
    cell.extract::<f64>().ok()
}

fn type_name(obj: &PyAny) -> String {
    obj.get_type().name().unwrap_or("object").to_string()
}

fn dtype_name(arr: &PyUntypedArray) -> String {
    match arr.dtype().str() {
        Ok(name) => name.to_string_lossy().into_owned(),
        Err(_) => "unknown".to_string(),
    }
}

#[inline]
pub fn grid_to_pyarray<'py>(py: Python<'py>, grid: ResultGrid) -> &'py PyArray2<i32> {
    PyArray2::from_owned_array(py, grid.into_array())
}
