use super::*;

fn item(name: &str, args: &[(&str, Value)]) -> FxItem {
    FxItem::new(name, args.iter().cloned().collect())
}

#[test]
fn splits_on_pipe_and_lowercases_names() {
    let got = parse_fx_str("Bounce(s=0.8)|ripple(op=0.2)|fly(cart)");
    assert_eq!(
        got,
        vec![
            item("bounce", &[("s", Value::Number(0.8))]),
            item("ripple", &[("op", Value::Number(0.2))]),
            item("fly", &[("cart", Value::Bool(true))]),
        ]
    );
}

#[test]
fn numbers_strings_and_flags() {
    let got = parse_fx_str("toast(text='Ok', t=2000, vibrate)");
    assert_eq!(
        got[0],
        item(
            "toast",
            &[
                ("text", Value::from("Ok")),
                ("t", Value::Number(2000.0)),
                ("vibrate", Value::Bool(true)),
            ]
        )
    );
}

#[test]
fn malformed_tokens_are_dropped() {
    assert_eq!(parse_fx_str("bounce()|??"), vec![item("bounce", &[])]);
    assert_eq!(
        parse_fx_str("bounce(s=1|shake"),
        vec![item("shake", &[])],
        "unclosed paren drops only its own token"
    );
    assert!(parse_fx_str("(x)|a b|a(b)c").is_empty());
}

#[test]
fn empty_and_absent_inputs() {
    assert!(parse_fx(None).is_empty());
    assert!(parse_fx(Some("")).is_empty());
    assert!(parse_fx_str(" |  | ").is_empty());
}

#[test]
fn whitespace_and_empty_arguments_are_trimmed() {
    let got = parse_fx_str("  ripple( r = 120 , , op=0.3 )  ");
    assert_eq!(
        got,
        vec![item(
            "ripple",
            &[("r", Value::Number(120.0)), ("op", Value::Number(0.3))]
        )]
    );
}

#[test]
fn first_equals_splits_and_one_quote_layer_is_stripped() {
    let got = parse_fx_str(r#"toast(text="a=b", q=''x'', n="-3.5")"#);
    assert_eq!(got[0].args.text("text"), Some("a=b"));
    assert_eq!(got[0].args.text("q"), Some("'x'"));
    assert_eq!(got[0].args.number("n"), Some(-3.5));
}

#[test]
fn only_plain_decimals_become_numbers() {
    let got = parse_fx_str("x(a=1e3, b=.5, c=5., d=0x10, e=-0, f=12)");
    let args = &got[0].args;
    assert_eq!(args.text("a"), Some("1e3"));
    assert_eq!(args.text("b"), Some(".5"));
    assert_eq!(args.text("c"), Some("5."));
    assert_eq!(args.text("d"), Some("0x10"));
    assert_eq!(args.number("e"), Some(0.0));
    assert_eq!(args.number("f"), Some(12.0));
}

#[test]
fn duplicate_effects_are_kept() {
    let got = parse_fx_str("bounce|bounce(s=0.5)");
    assert_eq!(got.len(), 2);
    assert_eq!(got[1].args.number("s"), Some(0.5));
}

#[test]
fn name_charset_allows_digits_dash_underscore() {
    let got = parse_fx_str("rotate3d|press_pop|neon-glow");
    let names: Vec<_> = got.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["rotate3d", "press_pop", "neon-glow"]);
}

#[test]
fn parse_is_total_and_deterministic() {
    let nasty = [
        "",
        "|",
        "((((",
        "))))",
        "a(=)",
        "a(,,,)",
        "a('')",
        "a(\"\")",
        "\u{0}|\u{1F600}(x)",
        "é(x=1)",
        "a(b=\u{1F600})",
        "a(b='unterminated)",
    ];
    for s in nasty {
        assert_eq!(parse_fx_str(s), parse_fx_str(s), "{s:?}");
    }
    assert_eq!(parse_fx_str("a(=)")[0].args.text(""), Some(""));
    assert_eq!(parse_fx_str("a('')")[0].args.len(), 1);
}
