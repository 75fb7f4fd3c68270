use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// Bound used for an axis declared as 0 and for arrays created on first use.
pub const DEFAULT_BOUND: usize = 10;

/// ## N-dimensional array
///
/// Bounds are inclusive, so an axis declared with bound `n` holds `n+1`
/// elements. Storage is one flat vector in row-major order.

#[derive(Debug, Clone)]
pub struct Array<T> {
    dimension: Vec<usize>,
    data: Vec<T>,
}

impl<T: Clone> Array<T> {
    pub fn new(bounds: &[usize], default: T) -> Result<Array<T>> {
        if bounds.is_empty() {
            return Err(error!(SubscriptOutOfRange; "NO DIMENSIONS"));
        }
        let dimension: Vec<usize> = bounds
            .iter()
            .map(|&b| if b == 0 { DEFAULT_BOUND } else { b })
            .collect();
        let mut len: usize = 1;
        for bound in &dimension {
            len = match len.checked_mul(bound + 1) {
                Some(len) if len <= u16::max_value() as usize * 16 => len,
                _ => return Err(error!(OutOfMemory; "ARRAY TOO LARGE")),
            };
        }
        Ok(Array {
            dimension,
            data: vec![default; len],
        })
    }

    pub fn dimensions(&self) -> usize {
        self.dimension.len()
    }

    pub fn bounds(&self) -> &[usize] {
        &self.dimension
    }

    pub fn get(&self, indices: &[usize]) -> Result<&T> {
        let offset = self.offset(indices)?;
        Ok(&self.data[offset])
    }

    pub fn set(&mut self, indices: &[usize], value: T) -> Result<()> {
        let offset = self.offset(indices)?;
        self.data[offset] = value;
        Ok(())
    }

    fn offset(&self, indices: &[usize]) -> Result<usize> {
        if indices.len() != self.dimension.len() {
            return Err(error!(SubscriptOutOfRange; "WRONG NUMBER OF DIMENSIONS"));
        }
        let mut offset = 0;
        let mut stride = 1;
        for (index, bound) in indices.iter().zip(&self.dimension).rev() {
            if index > bound {
                return Err(error!(SubscriptOutOfRange));
            }
            offset += index * stride;
            stride *= bound + 1;
        }
        Ok(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_cell_is_addressable() {
        let mut a = Array::new(&[3, 3], 0.0).unwrap();
        for i in 0..=3 {
            for j in 0..=3 {
                a.set(&[i, j], (i * 10 + j) as f64).unwrap();
            }
        }
        for i in 0..=3 {
            for j in 0..=3 {
                assert_eq!(*a.get(&[i, j]).unwrap(), (i * 10 + j) as f64);
            }
        }
    }

    #[test]
    fn test_zero_bound_defaults() {
        let a = Array::new(&[0], String::new()).unwrap();
        assert_eq!(a.bounds(), &[10]);
        assert_eq!(a.get(&[10]).unwrap(), "");
        assert!(a.get(&[11]).is_err());
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = Array::new(&[2, 2, 2], 0.0).unwrap();
        assert_eq!(a.dimensions(), 3);
        let e = a.get(&[1, 1]).unwrap_err();
        assert_eq!(e.to_string(), "SUBSCRIPT OUT OF RANGE; WRONG NUMBER OF DIMENSIONS");
    }
}
