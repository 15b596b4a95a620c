use super::*;
use insta::assert_snapshot;

fn parse(source: &str) -> Type {
    let mut cursor = 0;
    parse_annotation(source, &mut cursor).unwrap()
}

fn parse_err(source: &str) -> SyntaxError {
    let mut cursor = 0;
    parse_annotation(source, &mut cursor).unwrap_err()
}

// ========================================
// Simple types and literals
// ========================================

#[test]
fn test_simple_types() {
    assert_eq!(parse("nil"), Type::nil());
    assert_eq!(parse("boolean"), Type::boolean());
    assert_eq!(parse("number"), Type::number());
    assert_eq!(parse("string"), Type::string());
}

#[test]
fn test_literals_and_aliases() {
    assert_eq!(parse("true"), Type::literal_boolean(true));
    assert_eq!(parse("false"), Type::literal_boolean(false));
    assert_eq!(parse("3"), Type::literal_number(3.0));
    assert_eq!(parse("0x10"), Type::literal_number(16.0));
    assert_eq!(parse("'hi'"), Type::literal_string("hi"));
    assert_eq!(parse("Vector"), Type::alias("Vector"));
}

#[test]
fn test_unterminated_string_is_a_literal() {
    assert_eq!(parse("'abc"), Type::literal_string("abc"));
}

#[test]
fn test_typeof_var_is_fresh_placeholder() {
    let a = parse("<T>");
    let b = parse("<T>");
    assert!(a.is_placeholder());
    assert_eq!(a.to_string(), "<T>");
    assert_ne!(a, b);
}

// ========================================
// Combinators
// ========================================

#[test]
fn test_intersection_binds_tighter_than_union() {
    let ty = parse("number | string & boolean");
    assert_eq!(
        ty,
        Type::union(Type::number(), Type::intersection(Type::string(), Type::boolean()))
    );

    let ty = parse("number & string | boolean");
    assert_eq!(
        ty,
        Type::union(Type::intersection(Type::number(), Type::string()), Type::boolean())
    );
}

#[test]
fn test_union_chains_to_the_right() {
    let mut cursor = 0;
    let ty = parse_annotation("a | b | c", &mut cursor).unwrap();
    assert_eq!(
        ty,
        Type::union(Type::alias("a"), Type::union(Type::alias("b"), Type::alias("c")))
    );
    assert_eq!(cursor, 9);
}

#[test]
fn test_intersection_chains_to_the_right() {
    let ty = parse("a & b & c");
    assert_eq!(
        ty,
        Type::intersection(Type::alias("a"), Type::intersection(Type::alias("b"), Type::alias("c")))
    );
}

#[test]
fn test_parentheses_are_transparent() {
    assert_eq!(parse("(number)"), Type::number());
    assert_eq!(parse("((nil))"), Type::nil());
    assert_eq!(
        parse("(a | b) & c"),
        Type::intersection(Type::union(Type::alias("a"), Type::alias("b")), Type::alias("c"))
    );
}

// ========================================
// Tables and tuples
// ========================================

#[test]
fn test_table_fields_and_indexer_key() {
    let ty = parse("{ name: string, [k: number]: boolean }");
    let table = ty.as_table().expect("table");
    assert_eq!(table.get_field("name").ty, Type::string());
    assert_eq!(table.get_field("[k: number]").ty, Type::boolean());
    assert_eq!(table.fields().len(), 2);
    assert_snapshot!(ty.to_string(), @"{ name: string, [k: number]: boolean }");
}

#[test]
fn test_table_empty_trailing_comma_and_nesting() {
    assert_eq!(parse("{}").to_string(), "{}");
    assert_eq!(parse("{ a: nil, }").to_string(), "{ a: nil }");

    let ty = parse("{ inner: { x: number | nil } }");
    let inner = ty.as_table().unwrap().get_field("inner").ty;
    assert_eq!(
        inner.as_table().unwrap().get_field("x").ty,
        Type::union(Type::number(), Type::nil())
    );
}

#[test]
fn test_tuples() {
    assert_eq!(parse("[]"), Type::tuple(vec![]));
    assert_eq!(
        parse("[number, 'a' | nil,]"),
        Type::tuple(vec![
            Type::number(),
            Type::union(Type::literal_string("a"), Type::nil())
        ])
    );
}

// ========================================
// Errors
// ========================================

#[test]
fn test_unclosed_table() {
    let err = parse_err("{");
    assert_eq!(err.message, "expected \"}\"; got nothing");
}

#[test]
fn test_missing_field_colon() {
    let err = parse_err("{ a number }");
    assert_eq!(err.message, "expected \":\"; got \"number\"");
    assert_eq!(err.span, Span::new(4, 10));
}

#[test]
fn test_field_name_must_be_identifier() {
    let err = parse_err("{ 1: number }");
    assert_eq!(err.message, "expected <name>; got \"1\"");
}

#[test]
fn test_indexer_key_requires_simple_type() {
    let err = parse_err("{ [k: Foo]: number }");
    assert_eq!(err.message, "expected <simple>; got \"Foo\"");
}

#[test]
fn test_empty_input() {
    assert_eq!(parse_err("").message, "expected <type>; got nothing");
    assert_eq!(parse_err("   ").message, "expected <type>; got nothing");
}

#[test]
fn test_unexpected_tokens() {
    assert_eq!(parse_err("}").message, "unexpected \"}\"");
    assert_eq!(parse_err("$$").message, "unexpected \"$$\"");
    assert_eq!(parse_err("number |").message, "expected <type>; got nothing");
}

#[test]
fn test_unsupported_forms() {
    assert_eq!(parse_err("table").message, "table annotations are not supported yet");
    assert_eq!(parse_err("function").message, "function annotations are not supported yet");
    assert_eq!(parse_err("thread").message, "thread annotations are not supported yet");
    assert_eq!(parse_err("()").message, "function annotations are not supported yet");
    assert_eq!(parse_err("() ~* ").message, "thread annotations are not supported yet");
    assert_eq!(parse_err("(...)").message, "function annotations are not supported yet");
    assert_eq!(parse_err("(a: number) -> []").message, "function annotations are not supported yet");
    assert_eq!(parse_err("(number) -> []").message, "function annotations are not supported yet");
    assert_eq!(parse_err("(number) ~> (string) ~*").message, "thread annotations are not supported yet");
}

#[test]
fn test_unsupported_errors_carry_help() {
    let err = parse_err("function");
    assert!(err.help.is_some());
    assert_eq!(err.span, Span::new(0, 8));
}

// ========================================
// Cursor handling
// ========================================

#[test]
fn test_cursor_stops_after_last_token() {
    let source = "number   , string";
    let mut cursor = 0;
    assert_eq!(parse_annotation(source, &mut cursor).unwrap(), Type::number());
    assert_eq!(cursor, 6);
}

#[test]
fn test_trailing_whitespace_is_fine() {
    let mut cursor = 0;
    assert_eq!(parse_annotation("nil   ", &mut cursor).unwrap(), Type::nil());
    assert_eq!(cursor, 3);
}

#[test]
fn test_cursor_unchanged_on_failure() {
    let source = "nil {";
    let mut cursor = 3;
    assert!(parse_annotation(source, &mut cursor).is_err());
    assert_eq!(cursor, 3);

    assert_eq!(parse_type(source, Some(&mut cursor)), None);
    assert_eq!(cursor, 3);
}

#[test]
fn test_parse_type_chains_over_one_buffer() {
    let source = "number {a: nil} 'x' {";
    let mut cursor = 0;
    let mut parsed = Vec::new();
    while let Some(ty) = parse_type(source, Some(&mut cursor)) {
        parsed.push(ty.to_string());
    }
    assert_eq!(parsed, vec!["number", "{ a: nil }", "'x'"]);
    assert_eq!(cursor, 19);
}

#[test]
fn test_parse_type_without_cursor() {
    assert_eq!(parse_type("string", None), Some(Type::string()));
    assert_eq!(parse_type("{", None), None);
}

#[test]
fn test_parser_position_tracks_consumed_tokens() {
    let mut parser = Parser::new("  [number]  ", 0);
    assert_eq!(parser.position(), 0);
    parser.parse_type().unwrap();
    assert_eq!(parser.position(), 10);
}

// ========================================
// Nesting limit
// ========================================

#[test]
fn test_deep_nesting_is_a_syntax_error() {
    let source = "[".repeat(5_000);
    let err = parse_err(&source);
    assert_eq!(err.message, "annotation nested too deeply");
    assert!(err.help.is_some());

    let mut cursor = 0;
    assert_eq!(parse_type(&source, Some(&mut cursor)), None);
    assert_eq!(cursor, 0);
}

#[test]
fn test_long_operator_chains_hit_the_limit() {
    let chain = vec!["nil"; 5_000].join(" | ");
    assert_eq!(parse_err(&chain).message, "annotation nested too deeply");

    let chain = vec!["nil"; 5_000].join(" & ");
    assert_eq!(parse_err(&chain).message, "annotation nested too deeply");
}

#[test]
fn test_moderate_nesting_parses() {
    let source = format!("{}number{}", "{ a: ".repeat(40), " }".repeat(40));
    let mut ty = parse(&source);
    for _ in 0..40 {
        ty = ty.as_table().expect("table").get_field("a").ty;
    }
    assert_eq!(ty, Type::number());

    let chain = vec!["nil"; 100].join(" | ");
    assert!(parse(&chain).to_string().starts_with("nil | nil"));
}
