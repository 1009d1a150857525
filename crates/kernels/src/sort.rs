//! Quicksort and radix sort kernels.

use crate::config::{Kernel, Nonce, Violation};
use crate::generator::{QSORT_LCG, RSORT_LCG};

pub const QSORT_LEN: usize = 16384;
pub const RSORT_LEN: usize = 2048;

/// Partitions smaller than this fall through to insertion sort.
const INSERTION_CUTOFF: usize = 10;
/// Smaller-half-first keeps the pending stack under log2 of the input length.
const STACK_DEPTH: usize = 64;

const RADIX_BITS: u32 = 8;
const RADIX_BUCKETS: usize = 1 << RADIX_BITS;

// The ping-pong ends in `data` only after an even number of passes.
const _: () = assert!((i32::BITS / RADIX_BITS) % 2 == 0);

pub fn insertion_sort(data: &mut [i32]) {
    for i in 1..data.len() {
        let value = data[i];
        let mut j = i;
        while j > 0 && value < data[j - 1] {
            data[j] = data[j - 1];
            j -= 1;
        }
        data[j] = value;
    }
}

/// Median-of-three quicksort with an explicit, bounded range stack.
pub fn quicksort(data: &mut [i32]) {
    let mut stack = [(0usize, 0usize); STACK_DEPTH];
    let mut depth = 0;
    let (mut lo, mut hi) = (0, data.len());

    loop {
        if hi - lo <= INSERTION_CUTOFF {
            insertion_sort(&mut data[lo..hi]);
            if depth == 0 {
                break;
            }
            depth -= 1;
            (lo, hi) = stack[depth];
            continue;
        }

        let split = partition(&mut data[lo..hi]) + lo;
        let (left, right) = ((lo, split), (split + 1, hi));
        let (small, large) = if left.1 - left.0 <= right.1 - right.0 {
            (left, right)
        } else {
            (right, left)
        };
        stack[depth] = large;
        depth += 1;
        (lo, hi) = small;
    }
}

/// Hoare-style partition around the median of first, middle and last.
///
/// Returns the final index of the pivot; everything left of it is `<=` and
/// everything right of it is `>=`. Requires `data.len() >= 3`.
fn partition(data: &mut [i32]) -> usize {
    let last = data.len() - 1;
    let mid = last / 2;

    // Order first/mid/last, then park the median at index 1 as pivot.
    if data[mid] < data[0] {
        data.swap(mid, 0);
    }
    if data[last] < data[0] {
        data.swap(last, 0);
    }
    if data[last] < data[mid] {
        data.swap(last, mid);
    }
    data.swap(mid, 1);
    let pivot = data[1];

    // data[0] <= pivot <= data[last] act as sentinels for both scans.
    let (mut i, mut j) = (1, last);
    loop {
        i += 1;
        while data[i] < pivot {
            i += 1;
        }
        j -= 1;
        while data[j] > pivot {
            j -= 1;
        }
        if j < i {
            break;
        }
        data.swap(i, j);
    }
    data.swap(1, j);
    j
}

/// LSD radix sort on 8-bit digits of non-negative keys; ping-pongs through
/// `scratch` and always leaves the result in `data`.
pub fn radix_sort(data: &mut [i32], scratch: &mut [i32], buckets: &mut [usize; RADIX_BUCKETS]) {
    let n = data.len().min(scratch.len());
    let (mut src, mut dst) = (&mut data[..n], &mut scratch[..n]);
    let mut shift = 0;
    while shift < i32::BITS {
        buckets.fill(0);
        for &value in src.iter() {
            buckets[digit(value, shift)] += 1;
        }
        let mut total = 0;
        for count in buckets.iter_mut() {
            total += *count;
            *count = total;
        }
        for &value in src.iter().rev() {
            let slot = &mut buckets[digit(value, shift)];
            *slot -= 1;
            dst[*slot] = value;
        }
        std::mem::swap(&mut src, &mut dst);
        shift += RADIX_BITS;
    }
}

fn digit(value: i32, shift: u32) -> usize {
    ((value as u32 >> shift) as usize) & (RADIX_BUCKETS - 1)
}

fn verify_sorted(data: &[i32]) -> Result<(), Violation> {
    match data.windows(2).position(|pair| pair[0] > pair[1]) {
        Some(index) => Err(Violation::Unsorted { index }),
        None => Ok(()),
    }
}

/// Sum of every element but the last, as the C verifier accumulates it.
fn prefix_sum(data: &[i32]) -> i32 {
    let upto = data.len().saturating_sub(1);
    data[..upto].iter().fold(0i32, |acc, v| acc.wrapping_add(*v))
}

#[derive(Debug)]
pub struct QuickSort {
    data: Vec<i32>,
}

impl QuickSort {
    pub fn new() -> Self {
        Self {
            data: vec![0; QSORT_LEN],
        }
    }
}

impl Default for QuickSort {
    fn default() -> Self {
        Self::new()
    }
}

impl Kernel for QuickSort {
    fn name(&self) -> &'static str {
        "qsort"
    }

    fn problem_size(&self, _input: i32) -> Option<usize> {
        Some(QSORT_LEN)
    }

    fn init(&mut self, _n: usize, nonce: Nonce) {
        QSORT_LCG.fill(nonce, &mut self.data);
    }

    fn compute(&mut self, n: usize, _nonce: Nonce) -> Result<(), Violation> {
        quicksort(&mut self.data[..n]);
        Ok(())
    }

    fn verify(&self, n: usize, _nonce: Nonce) -> Result<(), Violation> {
        verify_sorted(&self.data[..n])
    }

    fn checksum(&self, n: usize) -> i32 {
        prefix_sum(&self.data[..n])
    }
}

#[derive(Debug)]
pub struct RadixSort {
    data: Vec<i32>,
    scratch: Vec<i32>,
    buckets: [usize; RADIX_BUCKETS],
}

impl RadixSort {
    pub fn new() -> Self {
        Self {
            data: vec![0; RSORT_LEN],
            scratch: vec![0; RSORT_LEN],
            buckets: [0; RADIX_BUCKETS],
        }
    }
}

impl Default for RadixSort {
    fn default() -> Self {
        Self::new()
    }
}

impl Kernel for RadixSort {
    fn name(&self) -> &'static str {
        "rsort"
    }

    fn problem_size(&self, _input: i32) -> Option<usize> {
        Some(RSORT_LEN)
    }

    fn init(&mut self, _n: usize, nonce: Nonce) {
        RSORT_LCG.fill(nonce, &mut self.data);
        self.scratch.fill(0);
    }

    fn compute(&mut self, n: usize, _nonce: Nonce) -> Result<(), Violation> {
        radix_sort(
            &mut self.data[..n],
            &mut self.scratch[..n],
            &mut self.buckets,
        );
        Ok(())
    }

    fn verify(&self, n: usize, _nonce: Nonce) -> Result<(), Violation> {
        verify_sorted(&self.data[..n])
    }

    fn checksum(&self, n: usize) -> i32 {
        prefix_sum(&self.data[..n])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted_copy(data: &[i32]) -> Vec<i32> {
        let mut expected = data.to_vec();
        expected.sort_unstable();
        expected
    }

    #[test]
    fn quicksort_handles_degenerate_inputs() {
        let ascending: Vec<i32> = (0..1000).collect();
        let descending: Vec<i32> = (0..1000).rev().collect();
        let constant = vec![7; 1000];
        let sawtooth: Vec<i32> = (0..1000).map(|i| i % 13).collect();

        for input in [ascending, descending, constant, sawtooth] {
            let mut data = input.clone();
            quicksort(&mut data);
            assert_eq!(data, sorted_copy(&input));
        }
    }

    #[test]
    fn quicksort_handles_tiny_inputs() {
        for len in 0..=INSERTION_CUTOFF + 3 {
            let input: Vec<i32> = (0..len as i32).map(|i| (i * 7919) % 11).collect();
            let mut data = input.clone();
            quicksort(&mut data);
            assert_eq!(data, sorted_copy(&input), "len {len}");
        }
    }

    #[test]
    fn radix_sort_matches_std_sort() {
        let input: Vec<i32> = RSORT_LCG.sequence(Nonce::new(9)).take(RSORT_LEN).collect();
        let mut data = input.clone();
        let mut scratch = vec![0; RSORT_LEN];
        let mut buckets = [0; RADIX_BUCKETS];
        radix_sort(&mut data, &mut scratch, &mut buckets);
        assert_eq!(data, sorted_copy(&input));
    }

    #[test]
    fn kernels_sort_and_agree_on_checksum_shape() -> Result<(), Violation> {
        let nonce = Nonce::new(55);
        let mut qsort = QuickSort::new();
        let checksum = qsort.run(-1, nonce)?;
        assert!(qsort.data.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(checksum, prefix_sum(&qsort.data));

        let mut rsort = RadixSort::new();
        rsort.run(-1, nonce)?;
        assert!(rsort.data.windows(2).all(|w| w[0] <= w[1]));
        Ok(())
    }

    #[test]
    fn verifier_rejects_any_inversion() {
        let nonce = Nonce::new(2);
        let mut kernel = QuickSort::new();
        kernel.init(QSORT_LEN, nonce);
        assert!(kernel.verify(QSORT_LEN, nonce).is_err());

        kernel.compute(QSORT_LEN, nonce).unwrap();
        assert_eq!(kernel.verify(QSORT_LEN, nonce), Ok(()));

        kernel.data.swap(100, 101);
        if kernel.data[100] != kernel.data[101] {
            assert_eq!(
                kernel.verify(QSORT_LEN, nonce),
                Err(Violation::Unsorted { index: 100 })
            );
        }
    }

    #[test]
    fn verifier_rejects_partial_sort() {
        let nonce = Nonce::new(77);
        let mut kernel = RadixSort::new();
        kernel.init(RSORT_LEN, nonce);
        radix_sort(
            &mut kernel.data[..RSORT_LEN / 2],
            &mut kernel.scratch[..RSORT_LEN / 2],
            &mut kernel.buckets,
        );
        assert_eq!(kernel.verify(RSORT_LEN, nonce).map_err(|v| v.code()), Err(1));
    }
}
