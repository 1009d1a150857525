//! Shortest-path kernels over a dense, complete, directed graph.

use crate::config::{Kernel, Nonce, Violation};
use crate::generator::StrideCounter;
use ndarray::{s, Array2, ArrayView2};

pub const GRAPH_CAPACITY: usize = 1000;

/// Edge weights of the first `n` vertices, filled row by row.
///
/// Row `i` assigns `w[i][i] = 0` and then walks `(i + 1) % n, (i + 2) % n, ...`
/// drawing from a single stride counter.
fn fill_weights(mut weights: ndarray::ArrayViewMut2<'_, i32>, nonce: Nonce) {
    let n = weights.nrows();
    let mut counter = StrideCounter::new(nonce);
    for i in 0..n {
        weights[(i, i)] = 0;
        for j in 1..n {
            weights[(i, (i + j) % n)] = counter.next_value();
        }
    }
}

#[derive(Debug)]
pub struct Dijkstra {
    weights: Array2<i32>,
    dist: Vec<Option<i32>>,
    visited: Vec<bool>,
}

impl Dijkstra {
    pub const STANDARD_INPUT: i32 = 1000;

    pub fn new() -> Self {
        Self {
            weights: Array2::zeros((GRAPH_CAPACITY, GRAPH_CAPACITY)),
            dist: vec![None; GRAPH_CAPACITY],
            visited: vec![false; GRAPH_CAPACITY],
        }
    }

    fn weights(&self, n: usize) -> ArrayView2<'_, i32> {
        self.weights.slice(s![..n, ..n])
    }
}

impl Default for Dijkstra {
    fn default() -> Self {
        Self::new()
    }
}

impl Kernel for Dijkstra {
    fn name(&self) -> &'static str {
        "graph_dijkstra"
    }

    fn capacity(&self) -> Option<usize> {
        Some(GRAPH_CAPACITY)
    }

    fn init(&mut self, n: usize, nonce: Nonce) {
        fill_weights(self.weights.slice_mut(s![..n, ..n]), nonce);
        self.dist[..n].fill(None);
        self.visited[..n].fill(false);
        if n > 0 {
            self.dist[0] = Some(0);
        }
    }

    /// O(n^2) Dijkstra from vertex 0 without a heap.
    fn compute(&mut self, n: usize, _nonce: Nonce) -> Result<(), Violation> {
        for _ in 0..n {
            let closest = (0..n)
                .filter(|&i| !self.visited[i])
                .filter_map(|i| self.dist[i].map(|d| (d, i)))
                .min();
            let Some((dist, v)) = closest else {
                break;
            };
            self.visited[v] = true;

            for i in 0..n {
                if self.visited[i] {
                    continue;
                }
                let candidate = dist.wrapping_add(self.weights[(v, i)]);
                if self.dist[i].map_or(true, |current| candidate < current) {
                    self.dist[i] = Some(candidate);
                }
            }
        }
        Ok(())
    }

    /// Source at zero, no edge can still relax a distance, and every other
    /// distance is realised by some incoming edge.
    fn verify(&self, n: usize, _nonce: Nonce) -> Result<(), Violation> {
        if n == 0 {
            return Ok(());
        }
        if self.dist[0] != Some(0) {
            return Err(Violation::NotShortest { vertex: 0 });
        }

        let weights = self.weights(n);
        for v in 0..n {
            let Some(dv) = self.dist[v] else {
                return Err(Violation::NotShortest { vertex: v });
            };
            let mut tight = v == 0;
            for u in 0..n {
                let Some(du) = self.dist[u] else {
                    continue;
                };
                let through = du.wrapping_add(weights[(u, v)]);
                if through < dv {
                    return Err(Violation::NotShortest { vertex: v });
                }
                tight |= u != v && through == dv;
            }
            if !tight {
                return Err(Violation::NotShortest { vertex: v });
            }
        }
        Ok(())
    }

    fn checksum(&self, n: usize) -> i32 {
        self.dist[..n]
            .iter()
            .fold(0, |acc, d| acc ^ d.unwrap_or(-1))
    }
}

#[derive(Debug)]
pub struct FloydWarshall {
    dist: Array2<i32>,
}

impl FloydWarshall {
    pub const STANDARD_INPUT: i32 = 200;

    pub fn new() -> Self {
        Self {
            dist: Array2::zeros((GRAPH_CAPACITY, GRAPH_CAPACITY)),
        }
    }
}

impl Default for FloydWarshall {
    fn default() -> Self {
        Self::new()
    }
}

impl Kernel for FloydWarshall {
    fn name(&self) -> &'static str {
        "graph_floyd_warshall"
    }

    fn capacity(&self) -> Option<usize> {
        Some(GRAPH_CAPACITY)
    }

    fn init(&mut self, n: usize, nonce: Nonce) {
        fill_weights(self.dist.slice_mut(s![..n, ..n]), nonce);
    }

    fn compute(&mut self, n: usize, _nonce: Nonce) -> Result<(), Violation> {
        let mut dist = self.dist.slice_mut(s![..n, ..n]);
        for k in 0..n {
            for i in 0..n {
                let dik = dist[(i, k)];
                for j in 0..n {
                    let through = dik.wrapping_add(dist[(k, j)]);
                    if through <= dist[(i, j)] {
                        dist[(i, j)] = through;
                    }
                }
            }
        }
        Ok(())
    }

    /// Zero diagonal, never worse than the direct edge, and the triangle
    /// inequality holds through a nonce-chosen pivot.
    fn verify(&self, n: usize, nonce: Nonce) -> Result<(), Violation> {
        if n == 0 {
            return Ok(());
        }
        let mut direct = Array2::zeros((n, n));
        fill_weights(direct.view_mut(), nonce);

        let dist = self.dist.slice(s![..n, ..n]);
        let pivot = nonce.get().unsigned_abs() as usize % n;
        for i in 0..n {
            if dist[(i, i)] != 0 {
                return Err(Violation::NotShortest { vertex: i });
            }
            for j in 0..n {
                let dij = dist[(i, j)];
                let through_pivot = dist[(i, pivot)].wrapping_add(dist[(pivot, j)]);
                if dij > direct[(i, j)] || dij > through_pivot {
                    return Err(Violation::NotShortest { vertex: j });
                }
            }
        }
        Ok(())
    }

    fn checksum(&self, n: usize) -> i32 {
        self.dist
            .slice(s![..n, ..n])
            .iter()
            .fold(0, |acc, d| acc ^ d)
    }
}
