use nom::branch::alt;
use nom::bytes::complete::{tag, tag_no_case, take_while1};
use nom::character::complete::{char, digit0, digit1, hex_digit1, multispace0};
use nom::combinator::{consumed, map, opt, value};
use nom::sequence::{pair, preceded};
use nom::IResult;

use crate::buffer::WINDOW_LEN;
use crate::token::{Token, TokenKind};

/// Classify the first token of `input`, which starts at byte `base` of the
/// formula. Never fails: unknown text becomes a `Malformed` token.
pub(crate) fn lex(input: &str, base: usize) -> Token<'_> {
    match token(input) {
        Ok((rest, (lexeme, kind))) => {
            let len = input.len() - rest.len();
            Token {
                kind,
                lexeme,
                offset: base + len - lexeme.len(),
                len,
            }
        }
        Err(_) => {
            let body = blank(input).map_or(input, |(rest, _)| rest);
            let skipped = input.len() - body.len();
            let (kind, width) = match body.chars().next() {
                None => (TokenKind::End, 0),
                Some(c) => (TokenKind::Malformed, c.len_utf8()),
            };
            Token {
                kind,
                lexeme: body.get(..width).unwrap_or(""),
                offset: base + skipped,
                len: skipped + width,
            }
        }
    }
}

fn token(input: &str) -> IResult<&str, (&str, TokenKind)> {
    preceded(blank, consumed(alt((operator, number, word))))(input)
}

fn blank(input: &str) -> IResult<&str, &str> {
    multispace0(input)
}

fn operator(input: &str) -> IResult<&str, TokenKind> {
    use TokenKind::*;
    alt((
        value(Shl, tag("<<")),
        value(Shr, tag(">>")),
        value(Plus, char('+')),
        value(Minus, char('-')),
        value(Times, char('*')),
        value(Divide, char('/')),
        value(Modulo, char('%')),
        value(Not, char('~')),
        value(And, char('&')),
        value(Or, char('|')),
        value(Xor, char('^')),
        value(Open, char('(')),
        value(Close, char(')')),
    ))(input)
}

fn number(input: &str) -> IResult<&str, TokenKind> {
    alt((
        value(TokenKind::Hex, preceded(tag_no_case("0x"), hex_digit1)),
        map(
            pair(digit1, opt(preceded(char('.'), digit0))),
            |(_, fraction)| match fraction {
                Some(_) => TokenKind::Fraction,
                None => TokenKind::Decimal,
            },
        ),
    ))(input)
}

fn word(input: &str) -> IResult<&str, TokenKind> {
    map(
        take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_'),
        reference,
    )(input)
}

/// Map a named reference to its token, unknown names are malformed.
fn reference(name: &str) -> TokenKind {
    match name {
        "VALUE" | "V" => TokenKind::Value,
        "BITPOS" | "BP" => TokenKind::BitPos,
        _ => {
            if let Some(index) = byte_index(name, "PBYTE", "P") {
                TokenKind::DestByte(index)
            } else if let Some(index) = byte_index(name, "BYTE", "B") {
                TokenKind::SourceByte(index)
            } else {
                TokenKind::Malformed
            }
        }
    }
}

/// `BYTE7` or `B7` -> `Some(7)`. The index must be a single digit below `WINDOW_LEN`.
fn byte_index(name: &str, long: &str, short: &str) -> Option<u8> {
    let digits = name
        .strip_prefix(long)
        .or_else(|| name.strip_prefix(short))?;
    match digits.as_bytes() {
        [d @ b'0'..=b'9'] if usize::from(d - b'0') < WINDOW_LEN => Some(d - b'0'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TokenKind::*;

    fn kinds(mut input: &str) -> Vec<TokenKind> {
        let mut out = Vec::new();
        loop {
            let token = lex(input, 0);
            out.push(token.kind);
            if token.kind == End {
                return out;
            }
            input = &input[token.len..];
        }
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("+-*/%~&|^<<>>()"),
            vec![
                Plus, Minus, Times, Divide, Modulo, Not, And, Or, Xor, Shl, Shr, Open, Close,
                End
            ]
        );
        assert_eq!(kinds("<"), vec![Malformed, End]);
        assert_eq!(kinds("> >"), vec![Malformed, Malformed, End]);
    }

    #[test]
    fn test_numbers() {
        let token = lex("  0x1f+", 4);
        assert_eq!(token.kind, Hex);
        assert_eq!(token.lexeme, "0x1f");
        assert_eq!(token.offset, 6);
        assert_eq!(token.len, 6);

        assert_eq!(lex("123 ", 0).lexeme, "123");
        assert_eq!(lex("123 ", 0).kind, Decimal);
        assert_eq!(lex("1.25*", 0).lexeme, "1.25");
        assert_eq!(lex("1.25*", 0).kind, Fraction);
        assert_eq!(lex("3.", 0).kind, Fraction);
        assert_eq!(kinds("0x"), vec![Decimal, Malformed, End]);
    }

    #[test]
    fn test_references() {
        assert_eq!(
            kinds("BYTE0 B9 PBYTE2 P3 BITPOS BP VALUE V"),
            vec![
                SourceByte(0),
                SourceByte(9),
                DestByte(2),
                DestByte(3),
                BitPos,
                BitPos,
                Value,
                Value,
                End
            ]
        );
        assert_eq!(kinds("BYTE10"), vec![Malformed, End]);
        assert_eq!(kinds("byte0"), vec![Malformed, End]);
        assert_eq!(kinds("B"), vec![Malformed, End]);
    }

    #[test]
    fn test_whitespace_and_end() {
        let token = lex("   ", 2);
        assert_eq!(token.kind, End);
        assert_eq!(token.len, 3);
        assert_eq!(token.offset, 5);

        let token = lex(" REST", 0);
        assert_eq!(token.kind, Malformed);
        assert_eq!(token.lexeme, "REST");
        assert_eq!(token.len, 5);

        let token = lex(" $1", 0);
        assert_eq!(token.kind, Malformed);
        assert_eq!(token.lexeme, "$");
        assert_eq!(token.len, 2);
    }
}
