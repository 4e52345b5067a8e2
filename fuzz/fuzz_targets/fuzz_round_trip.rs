#![no_main]

use libfuzzer_sys::fuzz_target;
use lempelziv::{CodecConfig, Decoder, Encoder, TokenFormat};

fuzz_target!(|data: &[u8]| {
    // First two bytes pick the window and buffer sizes, the rest is the payload
    if data.len() < 2 {
        return;
    }

    let window_size = data[0] as usize + 1;
    let buffer_size = (data[1] as usize % 64) + 2;

    // Limit data size to avoid slowdowns
    let payload = &data[2..];
    let payload = if payload.len() > 64 * 1024 { &payload[..64 * 1024] } else { payload };

    for format in [TokenFormat::Lz77, TokenFormat::Lzss] {
        let config = match CodecConfig::new(window_size, buffer_size) {
            Ok(config) => config.with_format(format),
            Err(_) => return,
        };

        let encoded = Encoder::new(config).encode(payload);
        let decoded =
            Decoder::new(config).decode(&encoded.data).expect("encoder output must decode");
        assert_eq!(decoded.data, payload, "Round-trip mismatch");
    }
});
