//! Universal property #2 (spec §8): parse(display(parse(src))) == parse(src).

use mlc_lex::Lexer;
use mlc_par::Parser;

fn parse(src: &str) -> mlc_par::Expr {
    let tokens = Lexer::new(src).tokenize().unwrap();
    Parser::new(tokens).parse().unwrap()
}

fn roundtrips(src: &str) {
    let tree = parse(src);
    let printed = tree.to_string();
    let reparsed = parse(&printed);
    assert_eq!(
        tree, reparsed,
        "src {src:?} printed as {printed:?} did not reparse to an equal tree"
    );
}

#[test]
fn scenario_sources_round_trip() {
    let sources = [
        "1 * 2 - 3",
        "let v : int <- 21 in v + v end",
        "if 2 < 3 then 1 else 2 end",
        "(fn v : int => v + 1) 2",
        "let f : int -> int <- (fn x : int => x * x) in f (f 3) end",
        "let rec f x <- if x < 2 then 1 else x * f (x - 1) end in f 5 end",
    ];
    for src in sources {
        roundtrips(src);
    }
}

#[test]
fn operators_and_unary_round_trip() {
    for src in [
        "~3 + 4",
        "not true or false",
        "1 <= 2 and 2 < 3",
        "fn x : bool => not x",
    ] {
        roundtrips(src);
    }
}
