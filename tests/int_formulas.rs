mod common;

use byte_formula::{eval_int, Cursor, Error, Formula};
use common::init_logger;

fn eval(formula: &str, source: &[u8], bit_pos: u8, dest: &[u8]) -> Result<i32, Error> {
    init_logger();
    Formula::new(formula).eval_int(source, bit_pos, dest)
}

#[test]
fn bitwise_chain_is_left_associative() {
    assert_eq!(eval("BYTE0 & 0x03 | 0x10", &[0x0f], 0, &[]), Ok(0x13));
    assert_eq!(eval("0x10 | BYTE0 & 0x03", &[0x0f], 0, &[]), Ok(0x03));
    assert_eq!(eval("B0 ^ 0xff", &[0x0f], 0, &[]), Ok(0xf0));
}

#[test]
fn unary_operators() {
    assert_eq!(eval("-(3+4)", &[], 0, &[]), Ok(-7));
    assert_eq!(eval("+5 - 2", &[], 0, &[]), Ok(3));
    assert_eq!(eval("~0 & 0xff", &[], 0, &[]), Ok(-1));
    assert_eq!(eval("10 ~ 0", &[], 0, &[]), Ok(9));
}

#[test]
fn bit_composition() {
    let dest = [0b0101_0101];
    assert_eq!(
        eval("P0 & ~(1 << BP) | (B0 << BP)", &[1], 1, &dest),
        Ok(0b0101_0111)
    );
    assert_eq!(
        eval("P0 & ~(1 << BP) | (B0 << BP)", &[0], 2, &dest),
        Ok(0b0101_0001)
    );
}

#[test]
fn leaves_trailing_text() {
    init_logger();
    let mut cursor = Cursor::new("B0 << 2 : PBYTE1");
    assert_eq!(eval_int(&mut cursor, &[3], 0, &[]), Ok(12));
    assert_eq!(cursor.remaining(), " : PBYTE1");
}

#[test]
fn arithmetic_faults() {
    assert_eq!(
        eval("B0 / B1", &[4, 0], 0, &[]),
        Err(Error::DivisionByZero { position: 3 })
    );
    assert_eq!(
        eval("1 + (5 % (B0 - 1))", &[1], 0, &[]),
        Err(Error::DivisionByZero { position: 7 })
    );
    assert_eq!(
        eval("1 << 40", &[], 0, &[]),
        Err(Error::ShiftOutOfRange {
            position: 2,
            amount: 40
        })
    );
}

#[test]
fn unknown_references() {
    assert!(matches!(
        eval("PBYTE10", &[], 0, &[]),
        Err(Error::MalformedToken { position: 0, .. })
    ));
    assert!(matches!(
        eval("B0 + pbyte1", &[], 0, &[]),
        Err(Error::MalformedToken { position: 5, found: 'p' })
    ));
}
