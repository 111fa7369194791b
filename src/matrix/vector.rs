use core::fmt;
use core::ops::Index;

use crate::error::{NumError, Result};

/// Dense vector of arbitrary scalars, never empty.
///
/// ```
/// use numtower::Vector;
///
/// let v = Vector::from_vec(vec![1, 2, 3]).unwrap();
/// assert_eq!(v[2], 3);
/// assert_eq!(v.len(), 3);
/// assert!(Vector::<i32>::from_vec(vec![]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Vector<T> {
    data: Vec<T>,
}

impl<T> Vector<T> {
    pub fn from_vec(data: Vec<T>) -> Result<Self> {
        if data.is_empty() {
            return Err(NumError::InvalidShape {
                reason: "a vector needs at least one entry",
            });
        }
        Ok(Self { data })
    }

    pub(crate) fn from_parts(data: Vec<T>) -> Self {
        debug_assert!(!data.is_empty());
        Self { data }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false`: vectors are never empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn get(&self, i: usize) -> Option<&T> {
        self.data.get(i)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Vector<U> {
        Vector {
            data: self.data.iter().map(f).collect(),
        }
    }

    pub fn try_map<U, E>(&self, f: impl FnMut(&T) -> core::result::Result<U, E>) -> core::result::Result<Vector<U>, E> {
        Ok(Vector {
            data: self.data.iter().map(f).collect::<core::result::Result<_, _>>()?,
        })
    }
}

impl<T: Clone> Vector<T> {
    /// # Panics
    /// If `n` is zero.
    pub fn fill(n: usize, value: T) -> Self {
        assert!(n > 0, "vector length must be positive");
        Self {
            data: vec![value; n],
        }
    }

    /// Copy with entry `i` replaced.
    pub fn with_entry(&self, i: usize, value: T) -> Self {
        let mut v = self.clone();
        v.data[i] = value;
        v
    }
}

impl<T> Index<usize> for Vector<T> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.data[i]
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

/// `[ 1, 2, 3 ]`.
impl<T: fmt::Display> fmt::Display for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ ")?;
        for (i, x) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{x}")?;
        }
        write!(f, " ]")
    }
}
