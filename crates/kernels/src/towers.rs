//! Towers of Hanoi over an index-based node arena.
//!
//! Pegs are singly linked lists threaded through a fixed pool of nodes.
//! Push and pop move nodes between a peg and the pool's free list in O(1),
//! and the pool is sized exactly to the disc count.

use crate::config::{Kernel, Nonce, Peg, Violation};

pub const NUM_DISCS: usize = 7;

/// Fixed pool of list nodes with an explicit free-list head.
#[derive(Debug, Clone)]
pub struct NodeArena {
    values: [i32; NUM_DISCS],
    next: [Option<usize>; NUM_DISCS],
    free: Option<usize>,
}

impl NodeArena {
    pub fn new() -> Self {
        let mut arena = Self {
            values: [0; NUM_DISCS],
            next: [None; NUM_DISCS],
            free: None,
        };
        arena.reset();
        arena
    }

    /// Thread every slot back onto the free list.
    pub fn reset(&mut self) {
        for slot in 0..NUM_DISCS {
            self.next[slot] = (slot + 1 < NUM_DISCS).then_some(slot + 1);
        }
        self.free = Some(0);
    }

    #[cfg(test)]
    fn free_slots(&self) -> usize {
        self.iter(self.free).count()
    }

    fn iter(&self, head: Option<usize>) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(head, move |&slot| self.next[slot])
    }
}

impl Default for NodeArena {
    fn default() -> Self {
        Self::new()
    }
}

/// Head index and length of one peg's list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct List {
    head: Option<usize>,
    size: usize,
}

impl List {
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

#[derive(Debug, Clone)]
pub struct Towers {
    arena: NodeArena,
    pegs: [List; 3],
    num_discs: usize,
    num_moves: i32,
}

const SOURCE: usize = 0;
const SPARE: usize = 1;
const DESTINATION: usize = 2;

impl Towers {
    pub fn new() -> Self {
        Self {
            arena: NodeArena::new(),
            pegs: [List::default(); 3],
            num_discs: NUM_DISCS,
            num_moves: 0,
        }
    }

    fn push(&mut self, peg: usize, value: i32) -> Result<(), Violation> {
        let slot = self.arena.free.ok_or(Violation::PoolExhausted)?;
        self.arena.free = self.arena.next[slot];

        let list = &mut self.pegs[peg];
        self.arena.next[slot] = list.head;
        self.arena.values[slot] = value;
        list.head = Some(slot);
        list.size += 1;
        Ok(())
    }

    fn pop(&mut self, peg: usize) -> Option<i32> {
        let list = &mut self.pegs[peg];
        let slot = list.head?;
        list.head = self.arena.next[slot];
        list.size -= 1;

        self.arena.next[slot] = self.arena.free;
        self.arena.free = Some(slot);
        Some(self.arena.values[slot])
    }

    fn values(&self, peg: usize) -> impl Iterator<Item = i32> + '_ {
        self.arena
            .iter(self.pegs[peg].head)
            .map(move |slot| self.arena.values[slot])
    }

    fn solve(&mut self, n: usize, from: usize, via: usize, to: usize) -> Result<(), Violation> {
        if n == 0 {
            return Ok(());
        }
        if n == 1 {
            // Popping an empty peg means the board is already corrupt; the
            // verifier reports it through the peg sizes.
            if let Some(value) = self.pop(from) {
                self.push(to, value)?;
            }
            self.num_moves += 1;
            return Ok(());
        }
        self.solve(n - 1, from, to, via)?;
        self.solve(1, from, via, to)?;
        self.solve(n - 1, via, from, to)
    }

    #[cfg(test)]
    fn peg(&self, peg: Peg) -> List {
        self.pegs[peg_index(peg)]
    }
}

#[cfg(test)]
fn peg_index(peg: Peg) -> usize {
    match peg {
        Peg::Source => SOURCE,
        Peg::Spare => SPARE,
        Peg::Destination => DESTINATION,
    }
}

impl Default for Towers {
    fn default() -> Self {
        Self::new()
    }
}

impl Kernel for Towers {
    fn name(&self) -> &'static str {
        "towers"
    }

    fn problem_size(&self, _input: i32) -> Option<usize> {
        Some(NUM_DISCS)
    }

    /// Rebuild the pool and stack `nonce * (n - i)` onto the source peg,
    /// leaving `nonce` on top.
    fn init(&mut self, n: usize, nonce: Nonce) {
        self.arena.reset();
        self.pegs = [List::default(); 3];
        self.num_discs = n;
        self.num_moves = 0;
        for i in 0..n {
            let value = nonce.get().wrapping_mul((n - i) as i32);
            if self.push(SOURCE, value).is_err() {
                // More discs than nodes; compute reports the exhaustion.
                break;
            }
        }
    }

    fn compute(&mut self, n: usize, _nonce: Nonce) -> Result<(), Violation> {
        if n > NUM_DISCS {
            return Err(Violation::PoolExhausted);
        }
        self.solve(n, SOURCE, SPARE, DESTINATION)
    }

    fn verify(&self, _n: usize, nonce: Nonce) -> Result<(), Violation> {
        if !self.pegs[SOURCE].is_empty() {
            return Err(Violation::PegNotEmpty { peg: Peg::Source });
        }
        if !self.pegs[SPARE].is_empty() {
            return Err(Violation::PegNotEmpty { peg: Peg::Spare });
        }
        let size = self.pegs[DESTINATION].len();
        if size != self.num_discs {
            return Err(Violation::DestinationSize {
                expected: self.num_discs,
                actual: size,
            });
        }
        for (position, value) in (1..).zip(self.values(DESTINATION)) {
            if value != nonce.get().wrapping_mul(position as i32) {
                return Err(Violation::DestinationOrder { position });
            }
        }
        let expected = (1i32 << self.num_discs) - 1;
        if self.num_moves != expected {
            return Err(Violation::MoveCount {
                expected,
                actual: self.num_moves,
            });
        }
        Ok(())
    }

    /// The C benchmark returns its verifier status, so success is zero.
    fn checksum(&self, _n: usize) -> i32 {
        0
    }
}
