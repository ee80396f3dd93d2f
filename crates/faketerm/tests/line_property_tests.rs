//! Property tests for line splitting
//!
//! Whatever mix of `\n` and `\r\n` terminators the input uses, the lines come
//! back in order with the terminators stripped, followed by end of input.

use faketerm::{FakeTerm, Term, TermError};
use proptest::prelude::*;
use std::io::Cursor;

fn arb_lines() -> impl Strategy<Value = Vec<(String, bool)>> {
    prop::collection::vec(("[a-zA-Z0-9 \\t.,:;!?-]{0,40}", any::<bool>()), 0..50)
}

fn encode(lines: &[(String, bool)]) -> Vec<u8> {
    let mut bytes = Vec::new();
    for (line, crlf) in lines {
        bytes.extend_from_slice(line.as_bytes());
        bytes.extend_from_slice(if *crlf { b"\r\n" } else { b"\n" });
    }
    bytes
}

fn drain(term: &impl Term, password: bool) -> (Vec<String>, TermError) {
    let mut lines = Vec::new();
    loop {
        let result = if password {
            term.read_password("ignored: ")
        } else {
            term.read_line()
        };
        match result {
            Ok(line) => lines.push(line),
            Err(err) => return (lines, err),
        }
    }
}

proptest! {
    #[test]
    fn lines_round_trip_in_order(lines in arb_lines()) {
        let term = FakeTerm::new(Cursor::new(encode(&lines)), Vec::new());
        let (read, err) = drain(&term, false);

        let expected: Vec<String> = lines.iter().map(|(l, _)| l.clone()).collect();
        prop_assert_eq!(read, expected);
        prop_assert!(err.is_eof(), "expected end of input, got {:?}", err);
        prop_assert!(term.read_line().unwrap_err().is_eof());
    }

    #[test]
    fn password_reads_match_line_reads(lines in arb_lines()) {
        let bytes = encode(&lines);
        let by_line = FakeTerm::new(Cursor::new(bytes.clone()), Vec::new());
        let by_password = FakeTerm::new(Cursor::new(bytes), Vec::new());

        let (expected, _) = drain(&by_line, false);
        let (actual, err) = drain(&by_password, true);
        prop_assert_eq!(actual, expected);
        prop_assert!(err.is_eof());

        let (_, output) = by_password.into_parts();
        prop_assert!(output.is_empty());
    }

    #[test]
    fn writes_reach_the_sink_unchanged(chunks in prop::collection::vec(any::<Vec<u8>>(), 0..20)) {
        let term = FakeTerm::new(std::io::empty(), Vec::new());
        for chunk in &chunks {
            prop_assert_eq!(Term::write(&term, chunk).unwrap(), chunk.len());
        }
        let (_, output) = term.into_parts();
        prop_assert_eq!(output, chunks.concat());
    }
}
