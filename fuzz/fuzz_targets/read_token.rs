#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let mut offset = 0;
    while let Ok(Some(token)) = pgn_fmt::read_token(text, offset) {
        assert!(offset <= token.span.start && token.span.start < token.span.end);
        assert!(token.span.end <= text.len());
        assert!(text.is_char_boundary(token.span.end));
        offset = token.span.end;
    }
});
