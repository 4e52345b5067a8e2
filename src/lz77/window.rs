use super::matcher::{longest_match, Match, PositionIndex};
use crate::SearchStrategy;

/// Sliding window and lookahead buffer over a fully buffered input
///
/// The window is `input[window_start..pos]`, at most `window_size` bytes;
/// the lookahead is `input[pos..]`, at most `buffer_size` bytes.
pub struct SlidingWindow<'a> {
    input: &'a [u8],
    window_size: usize,
    buffer_size: usize,
    /// Start of the lookahead (0..=input.len())
    pos: usize,
    /// Start of the window
    window_start: usize,
    /// Present only for `SearchStrategy::Indexed`
    index: Option<PositionIndex>,
}

impl<'a> SlidingWindow<'a> {
    pub fn new(
        input: &'a [u8],
        window_size: usize,
        buffer_size: usize,
        strategy: SearchStrategy,
    ) -> Self {
        let index = match strategy {
            SearchStrategy::Indexed => Some(PositionIndex::new()),
            SearchStrategy::BruteForce => None,
        };
        Self { input, window_size, buffer_size, pos: 0, window_start: 0, index }
    }

    /// Already-processed bytes available as a match source
    #[inline]
    pub fn window(&self) -> &'a [u8] {
        &self.input[self.window_start..self.pos]
    }

    /// Next unprocessed bytes, up to `buffer_size`
    #[inline]
    pub fn lookahead(&self) -> &'a [u8] {
        let end = (self.pos + self.buffer_size).min(self.input.len());
        &self.input[self.pos..end]
    }

    /// Whether every input byte has been consumed
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Bytes consumed so far
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Longest match for the lookahead, at most `buffer_size - 1` bytes long
    pub fn find_match(&self) -> Match {
        let max_length = self.buffer_size - 1;
        match &self.index {
            Some(index) => index.find(self.input, self.window_start, self.pos, max_length),
            None => longest_match(self.window(), self.lookahead(), max_length),
        }
    }

    /// Move `n` bytes from the lookahead into the window, trimming the
    /// window's front back to `window_size`
    pub fn advance(&mut self, n: usize) {
        let new_pos = (self.pos + n).min(self.input.len());
        let new_start = new_pos.saturating_sub(self.window_size);

        if let Some(index) = &mut self.index {
            for position in self.pos..new_pos {
                index.insert(self.input[position], position);
            }
            for position in self.window_start..new_start {
                index.evict(self.input[position], position);
            }
        }

        self.pos = new_pos;
        self.window_start = new_start;
    }
}
