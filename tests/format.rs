use pgn_fmt::Config;

/// Strips the common indentation of the lines after the first one, and the
/// first and last line, which are expected to be blank.
fn trim_indent(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let [_, body @ .., _] = &lines[..] else {
        return text.to_owned();
    };
    let indent = body
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);
    let mut result = String::new();
    for line in body {
        result.push_str(line.get(indent..).unwrap_or(""));
        result.push('\n');
    }
    result
}

fn format(text: &str) -> String {
    pgn_fmt::format(text, &Config::default()).expect("valid pgn")
}

/// Checks that the text is already formatted.
fn assert_formatted(text: &str) {
    let expected = trim_indent(text);
    assert_eq!(format(&expected), expected);
}

#[test]
fn empty() {
    assert_eq!(format(""), "");
}

#[test]
fn simple_game() {
    assert_formatted(
        r#"
        [Event "F/S Return Match"]

        1.e4 e5 2.Nf3 Nc6 3.Bb5 a6 *
        "#,
    );
}

#[test]
fn normalizes_spacing() {
    assert_eq!(
        format("[Event \"F/S Return Match\"] 1. e4 e5 2. Nf3 Nc6 3. Bb5 a6 *"),
        "[Event \"F/S Return Match\"]\n\n1.e4 e5 2.Nf3 Nc6 3.Bb5 a6 *\n"
    );
}

#[test]
fn complete_game() {
    assert_formatted(
        r#"
        [Event "F/S Return Match"]
        [Site "Belgrade, Serbia JUG"]
        [Date "1992.11.04"]
        [Round "29"]
        [White "Fischer, Robert J."]
        [Black "Spassky, Boris V."]
        [Result "1/2-1/2"]

        1.e4 e5 2.Nf3 Nc6 3.Bb5 a6 4.Ba4 Nf6 5.O-O Be7 6.Re1 b5 7.Bb3 d6 8.c3 O-O 9.h3
        Nb8 10.d4 Nbd7 11.c4 c6 12.cxb5 axb5 13.Nc3 Bb7 14.Bg5 b4 15.Nb1 h6 16.Bh4 c5
        17.dxe5 Nxe4 18.Bxe7 Qxe7 19.exd6 Qf6 20.Nbd2 Nxd6 21.Nc4 Nxc4 22.Bxc4 Nb6
        23.Ne5 Rae8 24.Bxf7+ Rxf7 25.Nxf7 Rxe1+ 26.Qxe1 Kxf7 27.Qe3 Qg5 28.Qxg5 hxg5
        29.b3 Ke6 30.a3 Kd6 31.axb4 cxb4 32.Ra5 Nd5 33.f3 Bc8 34.Kf2 Bf5 35.Ra7 g6
        36.Ra6+ Kc5 37.Ke1 Nf4 38.g3 Nxh3 39.Kd2 Kb5 40.Rd6 Kc5 41.Ra6 Nf2 42.g4 Bd3
        43.Re6 1/2-1/2
        "#,
    );
}

#[test]
fn several_games() {
    assert_formatted(
        r#"
        [Event "F/S Return Match"]
        [Site "Belgrade, Serbia JUG"]

        1.e4 e5 2.Nf3 Nc6 3.Bb5 a6 *

        [White "Adolf Anderssen"]
        [Black "Lionel Kieseritzky"]

        1.e4 e5 2.f4 exf4 3.Bc4 Qh4+ *
        "#,
    );
}

#[test]
fn games_without_tag_pairs() {
    assert_formatted(
        r#"
        1.e4 e5 2.Nf3 Nc6 3.Bb5 a6 *

        1.d4 d5 2.c4 e6 3.Nc3 Nf6 *

        1.e4 e6 2.d4 d5 3.Nc3 Nf6 *
        "#,
    );
}

#[test]
fn variation() {
    assert_formatted(
        r#"
        [Event "F/S Return Match"]

        1.e4 e5
          (1...e6 2.d4)
        2.Nf3 Nc6 3.Bb5 a6 *
        "#,
    );
}

#[test]
fn several_variations() {
    assert_formatted(
        r#"
        [Event "F/S Return Match"]

        1.e4 e5
          (1...e6 2.d4)
          (1...c5 2.Nf3)
        2.Nf3 Nc6 3.Bb5 a6 *
        "#,
    );
}

#[test]
fn nested_variations() {
    assert_formatted(
        r#"
        [Event "F/S Return Match"]

        1.e4 e5
          (1...e6 2.d4
            (2.d3))
        2.Nf3 Nc6 3.Bb5 a6 *
        "#,
    );
}

#[test]
fn empty_comment() {
    assert_formatted(
        r#"
        [Event "F/S Return Match"]

        1.e4 e5 2.Nf3 Nc6 3.Bb5
          {}
        3...a6 *
        "#,
    );
}

#[test]
fn short_comment() {
    assert_formatted(
        r#"
        [Event "F/S Return Match"]

        1.e4 e5 2.Nf3 Nc6 3.Bb5
          {The Ruy Lopez}
        3...a6 *
        "#,
    );
}

#[test]
fn long_comment() {
    assert_formatted(
        r#"
        [Event "F/S Return Match"]

        1.e4 e5 2.Nf3 Nc6 3.Bb5
          {The essential move marking the Spanish Game, or Ruy Lopez. It is the double king's
          pawn opening most commonly used in master play; it has been adopted by almost all
          players at some point in their careers and many play it from both the White and
          Black sides.}
        3...a6 *
        "#,
    );
}

#[test]
fn short_comment_in_variation() {
    assert_formatted(
        r#"
        [Event "F/S Return Match"]

        1.e4 e5
          (1...e6 2.d4 d5 {The French Defense})
        2.Nf3 Nc6 3.Bb5 a6 *
        "#,
    );
}

#[test]
fn long_comment_in_variation() {
    assert_formatted(
        r#"
        [Event "F/S Return Match"]

        1.e4 e5
          (1...e6 {The main line of the French Defence continues 2.d4 d5. White sets up
          a pawn centre, which Black immediately challenges by attacking the pawn on e4.})
        2.Nf3 Nc6 3.Bb5 a6 *
        "#,
    );
}

#[test]
fn comment_before_move_text() {
    assert_formatted(
        r#"
        [Event "F/S Return Match"]

        {The 1992 Fischer–Spassky match was a chess match between former world chess champions
        Bobby Fischer and Boris Spassky. It was billed as a World Chess Championship, though
        it was an unofficial rematch of their 1972 World Championship match.}
        1.e4 e5 2.Nf3 Nc6 3.Bb5 a6 *
        "#,
    );
}

#[test]
fn header_comment() {
    assert_formatted(
        r#"
        {The 1992 Fischer–Spassky match was a chess match between former world chess champions
        Bobby Fischer and Boris Spassky. It was billed as a World Chess Championship, though
        it was an unofficial rematch of their 1972 World Championship match.}
        [Event "F/S Return Match"]

        1.e4 e5 2.Nf3 Nc6 3.Bb5 a6 *
        "#,
    );
}

#[test]
fn footer_comment() {
    assert_formatted(
        r#"
        [Event "F/S Return Match"]

        1.e4 e5 2.Nf3 Nc6 3.Bb5 a6 *
        {The 1992 Fischer–Spassky match was a chess match between former world chess champions
        Bobby Fischer and Boris Spassky. It was billed as a World Chess Championship, though
        it was an unofficial rematch of their 1972 World Championship match.}
        "#,
    );
}

#[test]
fn annotations_and_comments() {
    assert_formatted(
        r#"
        [Event "F/S Return Match"]

        1.e4 e5 2.Nf3 Nc6! ~ 3.Bb5!? =
          {The Ruy Lopez}
        3...a6!! $10 *
        "#,
    );
}

#[test]
fn lone_dollar() {
    assert_eq!(format("1.e4 $ e5 *"), "1.e4 $ e5 *\n");
}

#[test]
fn byte_order_mark() {
    assert_eq!(format("\u{feff}1. e4 *"), "1.e4 *\n");
}

#[test]
fn comment_lines_are_packed() {
    assert_eq!(
        format("1.e4 {best\n   by test} e5 *"),
        "1.e4\n  {best by test}\n1...e5 *\n"
    );
}

#[test]
fn wraps_long_move_text() {
    let config = Config {
        print_width: 20,
        ..Config::default()
    };
    assert_eq!(
        pgn_fmt::format("1.e4 e5 2.Nf3 Nc6 3.Bb5 a6 4.Ba4 Nf6 *", &config).unwrap(),
        "1.e4 e5 2.Nf3 Nc6\n3.Bb5 a6 4.Ba4 Nf6 *\n"
    );
}

#[test]
fn indent_width() {
    let config = Config {
        indent_width: 4,
        ..Config::default()
    };
    assert_eq!(
        pgn_fmt::format("1.e4 e5 (1...c5) *", &config).unwrap(),
        "1.e4 e5\n    (1...c5)\n*\n"
    );
}

#[test]
fn canonicalizes_moves() {
    assert_eq!(
        format("1. e2-e4 e7e5 2. Ng1-f3 Nb8c6 3. Bf1-b5 a6 4. 0-0 *"),
        "1.e4 e5 2.Nf3 Nc6 3.Bb5 a6 4.O-O *\n"
    );
}

#[test]
fn idempotent() {
    let inputs = [
        "1.e4 {a} {b} e5 (1...c5 {x\ny} 2.Nf3 (2.c3 d5) 2...d6 $1) (1...e6) 2.Nf3 1-0",
        "{header} [Event \"a\\\\b\"] {before} 1.d4!? +/- d5 {after} 0-1 {between} 1.c4 *",
        "[Event \"?\"] [Site \"?\"]",
        "1.e4 () e5 ( ) *",
    ];
    for input in inputs {
        let once = format(input);
        assert_eq!(format(&once), once, "{input}");
    }
}

#[test]
fn same_tokens_after_formatting() {
    let input = "[Event \"?\"]\n1. e4 e5 {Open} ( 1... c5 ) 2. Nf3 $2 *";
    let output = format(input);

    let kinds = |text: &str| {
        let mut kinds = Vec::new();
        let mut offset = 0;
        while let Some(token) = pgn_fmt::read_token(text, offset).unwrap() {
            offset = token.span.end;
            kinds.push((token.kind, token.into_string()));
        }
        kinds
    };
    assert_eq!(kinds(input), kinds(output.as_str()));
}

#[test]
fn invalid_input() {
    let err = pgn_fmt::format("1.e4 e5 e5", &Config::default()).unwrap_err();
    assert_eq!(err.to_string(), "illegal move: e5 at offset 8");
}
