#![no_main]

use libfuzzer_sys::fuzz_target;
use pgn_fmt::{Config, Node};

fn check_spans(node: Node<'_>, len: usize) {
    let span = node.span();
    assert!(span.start <= span.end && span.end <= len);
    for child in node.children() {
        let child_span = child.span();
        assert!(span.start <= child_span.start && child_span.end <= span.end);
        check_spans(child, len);
    }
}

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(file) = pgn_fmt::parse(text) else {
        return;
    };
    check_spans(Node::File(&file), text.len());

    // Formatted output must parse again, and format to itself.
    let config = Config::default();
    let formatted = pgn_fmt::print(&file).render(&config);
    let reformatted = pgn_fmt::format(&formatted, &config).expect("formatted output parses");
    assert_eq!(formatted, reformatted);
});
