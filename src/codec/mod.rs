pub mod decoder;
pub mod encoder;

pub use decoder::{apply_token, Decoded, Decoder};
pub use encoder::{Encoded, Encoder};
