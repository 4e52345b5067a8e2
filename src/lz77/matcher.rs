//! Greedy longest-match search.
//!
//! Both searchers return the longest prefix of the lookahead that occurs
//! entirely inside the window, and among equally long occurrences the most
//! recent one (smallest distance).

use memchr::memmem;
use std::collections::VecDeque;

/// Result of a match search. `length == 0` means no match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Match {
    pub distance: usize,
    pub length: usize,
}

impl Match {
    pub const NONE: Match = Match { distance: 0, length: 0 };
}

/// Reference search over the window bytes.
///
/// Extends the candidate one byte at a time while it still occurs in
/// `window`, looking the candidate up from the end of the window so the most
/// recent occurrence wins.
pub fn longest_match(window: &[u8], lookahead: &[u8], max_length: usize) -> Match {
    let limit = max_length.min(lookahead.len());
    let mut best = Match::NONE;

    while best.length < limit {
        let candidate = &lookahead[..best.length + 1];
        match memmem::rfind(window, candidate) {
            Some(start) => {
                best = Match { distance: window.len() - start, length: candidate.len() };
            }
            None => break,
        }
    }

    best
}

/// Positions of each byte value inside the current window.
///
/// Positions are absolute offsets into the input, oldest first. Candidates
/// are visited newest first so the first longest match found is also the
/// most recent one.
pub struct PositionIndex {
    chains: Vec<VecDeque<usize>>,
}

impl PositionIndex {
    pub fn new() -> Self {
        Self { chains: (0..256).map(|_| VecDeque::new()).collect() }
    }

    /// Record that `byte` entered the window at `position`
    #[inline]
    pub fn insert(&mut self, byte: u8, position: usize) {
        self.chains[byte as usize].push_back(position);
    }

    /// Forget `byte` at `position`, which must be its oldest recorded position
    #[inline]
    pub fn evict(&mut self, byte: u8, position: usize) {
        let front = self.chains[byte as usize].pop_front();
        debug_assert_eq!(front, Some(position));
    }

    /// Find the longest match for `input[pos..]` inside `input[window_start..pos]`
    pub fn find(
        &self,
        input: &[u8],
        window_start: usize,
        pos: usize,
        max_length: usize,
    ) -> Match {
        let limit = max_length.min(input.len() - pos);
        if limit == 0 {
            return Match::NONE;
        }

        let lookahead = &input[pos..pos + limit];
        let mut best = Match::NONE;

        for &start in self.chains[lookahead[0] as usize].iter().rev() {
            debug_assert!(start >= window_start && start < pos);

            // Occurrence must end inside the window
            let bound = limit.min(pos - start);
            if bound <= best.length {
                continue;
            }

            let length = input[start..start + bound]
                .iter()
                .zip(lookahead)
                .take_while(|(a, b)| a == b)
                .count();

            if length > best.length {
                best = Match { distance: pos - start, length };
                if length == limit {
                    break;
                }
            }
        }

        best
    }

    /// Drop all positions
    pub fn clear(&mut self) {
        for chain in &mut self.chains {
            chain.clear();
        }
    }
}

impl Default for PositionIndex {
    fn default() -> Self {
        Self::new()
    }
}
