pub mod format;
pub mod matcher;
pub mod tokens;
pub mod window;

pub use format::{write_tokens, TokenFormat};
pub use matcher::{longest_match, Match, PositionIndex};
pub use tokens::{bit_length, Token, TokenWidths};
pub use window::SlidingWindow;
