#![no_main]

use libfuzzer_sys::fuzz_target;
use serde::de::IgnoredAny;
use smile_decode::{Decoder, TextEncoding};

fuzz_target!(|data: &[u8]| {
    let _ = smile_decode::decode(data);
    let _ = smile_decode::from_slice::<IgnoredAny>(data);

    let decoder = Decoder::builder()
        .text_encoding(TextEncoding::Utf16Le)
        .long_key_names(true)
        .build();
    let _ = decoder.decode(data);
});
