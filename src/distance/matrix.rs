//! Dense distance matrix.

use crate::models::Customer;

/// A dense n×n distance matrix stored in row-major order.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::Customer;
/// use u_cvrp::distance::DistanceMatrix;
///
/// let customers = vec![
///     Customer::depot(0.0, 0.0),
///     Customer::new(1, 10, 3.0, 4.0),
///     Customer::new(2, 20, 6.0, 8.0),
/// ];
/// let dm = DistanceMatrix::from_customers(&customers);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert!((dm.path_length(&[0, 1, 2, 0]) - 20.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Computes the Euclidean distance matrix of the given locations.
    pub fn from_customers(customers: &[Customer]) -> Self {
        let size = customers.len();
        let mut data = vec![0.0; size * size];
        for i in 0..size {
            for j in (i + 1)..size {
                let d = super::euclidean(&customers[i], &customers[j]);
                data[i * size + j] = d;
                data[j * size + i] = d;
            }
        }
        Self { data, size }
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Sum of the distances between consecutive stops of `path`.
    pub fn path_length(&self, path: &[usize]) -> f64 {
        path.windows(2).map(|w| self.get(w[0], w[1])).sum()
    }

    /// Returns the nearest of `candidates` to `from`, ties going to the
    /// earlier candidate.
    ///
    /// Returns `None` if `candidates` yields nothing.
    pub fn nearest_neighbor<I>(&self, from: usize, candidates: I) -> Option<usize>
    where
        I: IntoIterator<Item = usize>,
    {
        candidates
            .into_iter()
            .fold(None, |best: Option<(usize, f64)>, c| {
                let d = self.get(from, c);
                match best {
                    Some((_, best_d)) if best_d <= d => best,
                    _ => Some((c, d)),
                }
            })
            .map(|(c, _)| c)
    }
}
