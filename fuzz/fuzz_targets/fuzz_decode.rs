#![no_main]

use libfuzzer_sys::fuzz_target;
use lempelziv::{CodecConfig, Decoder, TokenFormat};

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // Decoding arbitrary bytes may fail - that's OK
    // We're looking for panics/crashes, not errors
    let window_size = (data[0] as usize) * 64 + 1;
    for format in [TokenFormat::Lz77, TokenFormat::Lzss] {
        if let Ok(config) = CodecConfig::new(window_size, 18) {
            let _ = Decoder::new(config.with_format(format)).decode(&data[1..]);
        }
    }
});
