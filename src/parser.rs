// ABOUTME: Parser module for parsing Lisp expressions using nom combinators

use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::{char, digit1, satisfy},
    combinator::{map, recognize},
    multi::many0,
    sequence::preceded,
    IResult, Parser,
};

use crate::error::ParseError;
use crate::interp::Interpreter;
use crate::value::Value;

/// Non-first characters allowed in a symbol besides letters and digits.
const SYMBOL_PUNCT: &str = "_+-*/=!@#$%^&<>";

/// Parser-level tree: identical to `Value`'s printable shape, but symbols
/// are still plain spellings — interning (and therefore needing `&mut
/// Interpreter`) happens in a separate pass so the nom grammar itself stays
/// a pure function of the input text, matching §4.2 ("no semantic checks").
#[derive(Debug, Clone, PartialEq)]
enum Sexpr {
    Null,
    Int(i64),
    Float(f64),
    Str(String),
    Symbol(String),
    Cons(Box<Sexpr>, Box<Sexpr>),
}

fn is_symbol_start(c: char) -> bool {
    c.is_ascii_alphabetic() || SYMBOL_PUNCT.contains(c)
}

fn is_symbol_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || SYMBOL_PUNCT.contains(c)
}

fn line_comment(input: &str) -> IResult<&str, ()> {
    let (input, _) = char(';')(input)?;
    let (input, _) = take_while(|c| c != '\n')(input)?;
    Ok((input, ()))
}

/// Skips ASCII whitespace and `;` line comments between tokens.
fn ws(input: &str) -> IResult<&str, ()> {
    let (input, _) = many0(alt((
        map(take_while1(|c: char| c.is_ascii_whitespace()), |_| ()),
        line_comment,
    )))
    .parse(input)?;
    Ok((input, ()))
}

fn parse_number(input: &str) -> IResult<&str, Sexpr> {
    let (rest, int_part) = digit1(input)?;
    if let Ok((rest2, _)) = char::<&str, nom::error::Error<&str>>('.')(rest) {
        if let Ok((rest3, frac)) = digit1::<&str, nom::error::Error<&str>>(rest2) {
            let text = format!("{int_part}.{frac}");
            let value: f64 = text.parse().map_err(|_| {
                nom::Err::Failure(nom::error::Error::new(input, nom::error::ErrorKind::Digit))
            })?;
            return Ok((rest3, Sexpr::Float(value)));
        }
    }
    let value: i64 = int_part.parse().map_err(|_| {
        nom::Err::Failure(nom::error::Error::new(input, nom::error::ErrorKind::Digit))
    })?;
    Ok((rest, Sexpr::Int(value)))
}

fn escape_char(c: char) -> char {
    match c {
        'a' => '\x07',
        'b' => '\x08',
        'f' => '\x0c',
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        'v' => '\x0b',
        '\\' => '\\',
        '"' => '"',
        other => other,
    }
}

fn parse_string(input: &str) -> IResult<&str, Sexpr> {
    let (mut input, _) = char('"')(input)?;
    let mut s = String::new();
    loop {
        match input.chars().next() {
            None => {
                return Err(nom::Err::Failure(nom::error::Error::new(
                    input,
                    nom::error::ErrorKind::Eof,
                )));
            }
            Some('"') => {
                input = &input[1..];
                break;
            }
            Some('\\') => {
                let after_backslash = &input[1..];
                match after_backslash.chars().next() {
                    Some(escaped) => {
                        s.push(escape_char(escaped));
                        input = &after_backslash[escaped.len_utf8()..];
                    }
                    None => {
                        return Err(nom::Err::Failure(nom::error::Error::new(
                            input,
                            nom::error::ErrorKind::Eof,
                        )));
                    }
                }
            }
            Some(c) => {
                s.push(c);
                input = &input[c.len_utf8()..];
            }
        }
    }
    Ok((input, Sexpr::Str(s)))
}

fn parse_symbol(input: &str) -> IResult<&str, Sexpr> {
    let (input, text) = recognize((satisfy(is_symbol_start), take_while(is_symbol_continue))).parse(input)?;
    Ok((input, Sexpr::Symbol(text.to_string())))
}

fn parse_list(input: &str) -> IResult<&str, Sexpr> {
    let (input, _) = char('(')(input)?;
    let (input, _) = ws(input)?;
    let (input, items) = many0((parse_expr, ws)).parse(input)?;
    let (input, _) = char(')')(input)?;
    let list = items
        .into_iter()
        .rev()
        .fold(Sexpr::Null, |tail, (head, _)| Sexpr::Cons(Box::new(head), Box::new(tail)));
    Ok((input, list))
}

fn parse_quote(input: &str) -> IResult<&str, Sexpr> {
    let (input, expr) = preceded(char('\''), parse_expr).parse(input)?;
    let quote_sym = Sexpr::Symbol("QUOTE".to_string());
    Ok((
        input,
        Sexpr::Cons(
            Box::new(quote_sym),
            Box::new(Sexpr::Cons(Box::new(expr), Box::new(Sexpr::Null))),
        ),
    ))
}

fn is_symbol_start_char(c: char) -> bool {
    is_symbol_start(c)
}

fn parse_expr(input: &str) -> IResult<&str, Sexpr> {
    let (input, _) = ws(input)?;
    let first = input.chars().next();
    match first {
        None => Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Eof,
        ))),
        Some('(') => parse_list(input),
        Some('\'') => parse_quote(input),
        Some('"') => parse_string(input),
        Some(c) if c.is_ascii_digit() => parse_number(input),
        Some(c) if is_symbol_start_char(c) => parse_symbol(input),
        Some(_) => Err(nom::Err::Failure(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Char,
        ))),
    }
}

fn sexpr_to_value(interp: &mut Interpreter, sexpr: Sexpr) -> Value {
    match sexpr {
        Sexpr::Null => Value::Null,
        Sexpr::Int(n) => interp.make_int(n),
        Sexpr::Float(n) => Value::Float(n),
        Sexpr::Str(s) => Value::string(s),
        Sexpr::Symbol(s) => Value::Symbol(interp.intern(&s)),
        Sexpr::Cons(head, tail) => Value::cons(
            sexpr_to_value(interp, *head),
            sexpr_to_value(interp, *tail),
        ),
    }
}

fn map_nom_error(input: &str, err: nom::Err<nom::error::Error<&str>>) -> ParseError {
    match err {
        nom::Err::Incomplete(_) => ParseError::UnexpectedEof,
        nom::Err::Error(e) | nom::Err::Failure(e) => {
            if e.input.is_empty() {
                if input.contains('"') && !input.trim_end().ends_with('"') {
                    return ParseError::UnterminatedString;
                }
                ParseError::UnexpectedEof
            } else {
                match e.input.chars().next() {
                    Some(c) => ParseError::UnexpectedChar(c),
                    None => ParseError::UnexpectedEof,
                }
            }
        }
    }
}

/// Parses every top-level form in `source` into a sequence of value trees,
/// interning symbols into `interp`'s symbol table as they're encountered.
pub fn parse_program(interp: &mut Interpreter, source: &str) -> Result<Vec<Value>, ParseError> {
    let mut remaining = source;
    let mut forms = Vec::new();
    loop {
        let (rest, _) = ws(remaining).map_err(|e| map_nom_error(remaining, e))?;
        if rest.is_empty() {
            break;
        }
        let before_paren_depth = open_paren_unbalanced(rest);
        match parse_expr(rest) {
            Ok((rest2, sexpr)) => {
                forms.push(sexpr_to_value(interp, sexpr));
                remaining = rest2;
            }
            Err(e) => {
                if before_paren_depth {
                    return Err(ParseError::UnterminatedList);
                }
                return Err(map_nom_error(rest, e));
            }
        }
    }
    Ok(forms)
}

/// Best-effort check used only to pick a better diagnostic: true if `input`
/// opens a list that is never closed (used to distinguish "unterminated
/// list" from other parse failures when nom's own error is less specific).
fn open_paren_unbalanced(input: &str) -> bool {
    if !input.starts_with('(') {
        return false;
    }
    let mut depth: i32 = 0;
    let mut in_string = false;
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => in_string = !in_string,
            '\\' if in_string => {
                chars.next();
            }
            '(' if !in_string => depth += 1,
            ')' if !in_string => depth -= 1,
            _ => {}
        }
    }
    depth != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Vec<Value> {
        let mut interp = Interpreter::new();
        parse_program(&mut interp, src).expect("parse should succeed")
    }

    #[test]
    fn parses_integer() {
        let forms = parse("42");
        assert!(matches!(forms[0], Value::Int(42)));
    }

    #[test]
    fn parses_float() {
        let forms = parse("3.5");
        assert!(matches!(forms[0], Value::Float(f) if f == 3.5));
    }

    #[test]
    fn parses_string_with_escapes() {
        let forms = parse(r#""hello\nworld""#);
        match &forms[0] {
            Value::Str(s) => assert_eq!(&**s, "hello\nworld"),
            other => panic!("expected string, got {other:?}"),
        }
    }

    #[test]
    fn parses_empty_list_as_null() {
        let forms = parse("()");
        assert!(matches!(forms[0], Value::Null));
    }

    #[test]
    fn parses_nested_list() {
        let forms = parse("(1 (2 3) 4)");
        assert_eq!(format!("{}", forms[0]), "(1 (2 3) 4)");
    }

    #[test]
    fn parses_quote_sugar() {
        let forms = parse("'foo");
        assert_eq!(format!("{}", forms[0]), "(QUOTE FOO)");
    }

    #[test]
    fn symbols_are_upcased() {
        let forms = parse("foo");
        match &forms[0] {
            Value::Symbol(s) => assert_eq!(s.name, "FOO"),
            other => panic!("expected symbol, got {other:?}"),
        }
    }

    #[test]
    fn skips_line_comments() {
        let forms = parse("; a comment\n42 ; trailing\n");
        assert_eq!(forms.len(), 1);
        assert!(matches!(forms[0], Value::Int(42)));
    }

    #[test]
    fn parses_multiple_top_level_forms() {
        let forms = parse("1 2 3");
        assert_eq!(forms.len(), 3);
    }

    #[test]
    fn rejects_unknown_character() {
        let mut interp = Interpreter::new();
        let err = parse_program(&mut interp, "~").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedChar('~')));
    }

    #[test]
    fn rejects_unterminated_list() {
        let mut interp = Interpreter::new();
        let err = parse_program(&mut interp, "(1 2").unwrap_err();
        assert!(matches!(err, ParseError::UnterminatedList));
    }

    #[test]
    fn minus_leads_a_symbol_not_a_negative_number() {
        // Per the grammar, only a leading digit begins a number; a leading
        // `-` is a symbol character, so `-5` reads as the symbol `-5`.
        let forms = parse("-5");
        match &forms[0] {
            Value::Symbol(s) => assert_eq!(s.name, "-5"),
            other => panic!("expected symbol, got {other:?}"),
        }
    }

    #[test]
    fn round_trips_through_display() {
        let mut interp = Interpreter::new();
        let forms = parse_program(&mut interp, "(a 1 2.5 \"s\" (b c))").unwrap();
        let printed = format!("{}", forms[0]);
        let reparsed = parse_program(&mut interp, &printed).unwrap();
        assert!(forms[0].structurally_eq(&reparsed[0]));
    }
}
