#![no_main]

use libfuzzer_sys::fuzz_target;
use smile_decode::Decoder;

fuzz_target!(|data: &[u8]| {
    let decoder = Decoder::new();
    for value in decoder.decode_stream(data) {
        if value.is_err() {
            break;
        }
    }
});
