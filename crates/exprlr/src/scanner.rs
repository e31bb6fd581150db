//! The lexical scanner.
//!
//! A maximal-munch, single-pass machine over a character source. The scanner
//! holds exactly one *current* lexeme at a time; consumers inspect it via
//! [`Scanner::current`] and move on with [`Scanner::advance`]. All state is
//! instance-local, so independent scanners can coexist freely.

use crate::lexeme::{Lexeme, Terminal};
use std::{
    fs::File,
    io::{self, BufReader, Read},
    path::Path,
};

/// Keywords of the scanned language, matched exactly and case-sensitively.
const KEYWORDS: [&str; 3] = ["int", "double", "String"];

/// Classification of the character under the scanner head.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum CharClass {
    Eof,
    Letter,
    Digit,
    Quote,
    DecimalSeparator,
    Unknown,
}

/// The lexical scanner, generic over any byte source.
#[derive(Debug)]
pub struct Scanner<R> {
    reader: R,
    head: Option<char>,
    class: CharClass,
    line: u32,
    col: u32,
    current: Option<Lexeme>,
    dollar_eof: bool,
}

impl<'a> Scanner<&'a [u8]> {
    /// Scanner over an in-memory string.
    pub fn from_text(input: &'a str) -> io::Result<Self> {
        Self::new(input.as_bytes())
    }
}

impl Scanner<BufReader<File>> {
    /// Scanner over the contents of a file.
    pub fn from_path(path: impl AsRef<Path>) -> io::Result<Self> {
        Self::new(BufReader::new(File::open(path)?))
    }
}

impl<R: Read> Scanner<R> {
    /// Attach a character source and prime the head character.
    ///
    /// Does not produce a lexeme; the first [`Scanner::advance`] does.
    pub fn new(reader: R) -> io::Result<Self> {
        let mut scanner = Self {
            reader,
            head: None,
            class: CharClass::Eof,
            line: 1,
            col: 0,
            current: None,
            dollar_eof: true,
        };
        scanner.get_char()?;
        Ok(scanner)
    }

    /// Enable or disable the legacy rule that a literal `$` terminates input.
    ///
    /// On by default.
    pub fn with_dollar_eof(mut self, enabled: bool) -> Self {
        self.dollar_eof = enabled;
        self.class = self.classify(self.head);
        self
    }

    /// The current lexeme, once `advance` has produced one.
    pub fn current(&self) -> Option<&Lexeme> {
        self.current.as_ref()
    }

    /// Detach the current lexeme, leaving the scanner ready to advance.
    pub(crate) fn take_current(&mut self) -> Option<Lexeme> {
        self.current.take()
    }

    /// `(line, col)` of the scanner head: one past the last consumed
    /// character on the current line.
    pub fn position(&self) -> (u32, u32) {
        (self.line, self.col)
    }

    /// Scan the next lexeme and return its terminal kind.
    ///
    /// Past end of input this keeps returning the `EOF` sentinel lexeme with
    /// a stable position. Fails only if the underlying source fails.
    pub fn advance(&mut self) -> io::Result<Terminal> {
        while matches!(self.head, Some(c) if c.is_whitespace()) {
            self.get_char()?;
        }

        let (line, col) = (self.line, self.col);
        let mut text = String::new();

        let kind = match self.class {
            CharClass::Letter => {
                while matches!(self.class, CharClass::Letter | CharClass::Digit) {
                    self.push_head(&mut text);
                    self.get_char()?;
                }
                if KEYWORDS.contains(&text.as_str()) {
                    Terminal::Keyword
                } else {
                    Terminal::Identifier
                }
            }

            CharClass::Digit => {
                while matches!(self.class, CharClass::Digit | CharClass::DecimalSeparator) {
                    self.push_head(&mut text);
                    self.get_char()?;
                }
                classify_number(&text)
            }

            CharClass::Quote => {
                loop {
                    self.push_head(&mut text);
                    self.get_char()?;
                    if self.head == Some('\n')
                        || matches!(self.class, CharClass::Eof | CharClass::Quote)
                    {
                        break;
                    }
                }
                if self.class == CharClass::Quote {
                    self.push_head(&mut text);
                    self.get_char()?;
                    Terminal::StrLit
                } else {
                    // unterminated; the head stays where it is so scanning
                    // can continue after the error
                    Terminal::Error
                }
            }

            CharClass::Unknown | CharClass::DecimalSeparator => {
                let kind = lookup_op(self.head);
                self.push_head(&mut text);
                self.get_char()?;
                kind
            }

            CharClass::Eof => {
                text.push_str("EOF");
                Terminal::Eof
            }
        };

        self.current = Some(Lexeme { kind, text, line, col });
        Ok(kind)
    }

    fn push_head(&mut self, text: &mut String) {
        if let Some(c) = self.head {
            text.push(c);
        }
    }

    /// Read one character, updating line/column bookkeeping and the head class.
    fn get_char(&mut self) -> io::Result<()> {
        self.head = self.read_char()?;
        self.col += 1;
        if self.head == Some('\n') {
            self.line += 1;
            self.col = 0;
        }
        self.class = self.classify(self.head);
        Ok(())
    }

    fn classify(&self, head: Option<char>) -> CharClass {
        match head {
            None => CharClass::Eof,
            Some('$') if self.dollar_eof => CharClass::Eof,
            Some(c) if unicode_ident::is_xid_start(c) => CharClass::Letter,
            Some(c) if c.is_ascii_digit() => CharClass::Digit,
            Some('"') => CharClass::Quote,
            Some('.') => CharClass::DecimalSeparator,
            Some(_) => CharClass::Unknown,
        }
    }

    /// Decode one UTF-8 character from the byte source.
    fn read_char(&mut self) -> io::Result<Option<char>> {
        let first = match self.read_byte()? {
            None => return Ok(None),
            Some(byte) => byte,
        };
        let len = match first {
            0x00..=0x7f => return Ok(Some(first as char)),
            0xc2..=0xdf => 2,
            0xe0..=0xef => 3,
            0xf0..=0xf4 => 4,
            _ => return Err(invalid_utf8()),
        };
        let mut buf = [first, 0, 0, 0];
        for slot in &mut buf[1..len] {
            *slot = self.read_byte()?.ok_or_else(invalid_utf8)?;
        }
        let decoded = std::str::from_utf8(&buf[..len]).map_err(|_| invalid_utf8())?;
        Ok(decoded.chars().next())
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
    }
}

/// Single-character operator lookup; anything unrecognized is `ILLEGAL_OP`.
fn lookup_op(head: Option<char>) -> Terminal {
    match head {
        Some('=') => Terminal::AssignOp,
        Some('+') => Terminal::AddOp,
        Some('-') => Terminal::SubOp,
        Some('*') => Terminal::MultOp,
        Some('/') => Terminal::DivOp,
        Some('(') => Terminal::LeftParen,
        Some(')') => Terminal::RightParen,
        Some(',') => Terminal::Comma,
        Some(';') => Terminal::Semicolon,
        _ => Terminal::IllegalOp,
    }
}

/// Classify a maximal digit/decimal-separator run.
///
/// `[0-9]+` is an integer literal, `[0-9]+.[0-9]+` a double literal; any
/// other arrangement of separators makes the whole run an error lexeme.
fn classify_number(text: &str) -> Terminal {
    match text.bytes().filter(|&b| b == b'.').count() {
        0 => Terminal::IntLit,
        1 if !text.ends_with('.') => Terminal::DblLit,
        _ => Terminal::Error,
    }
}

fn invalid_utf8() -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, "input is not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use Terminal::*;

    fn scan_all(input: &str) -> Vec<Lexeme> {
        let mut scanner = Scanner::from_text(input).unwrap();
        let mut lexemes = Vec::new();
        loop {
            let kind = scanner.advance().unwrap();
            lexemes.push(scanner.current().unwrap().clone());
            if kind == Eof {
                break;
            }
        }
        lexemes
    }

    fn kinds(input: &str) -> Vec<Terminal> {
        scan_all(input).into_iter().map(|l| l.kind).collect()
    }

    #[test]
    fn operators_and_identifiers() {
        assert_eq!(
            kinds("sum = a + b * (c1 - d2) / e;"),
            [
                Identifier, AssignOp, Identifier, AddOp, Identifier, MultOp, LeftParen,
                Identifier, SubOp, Identifier, RightParen, DivOp, Identifier, Semicolon, Eof,
            ]
        );
    }

    #[test]
    fn keywords_match_exactly() {
        assert_eq!(kinds("int double String"), [Keyword, Keyword, Keyword, Eof]);
        // keyword match is case-sensitive and exact
        assert_eq!(kinds("Int DOUBLE Strings"), [Identifier, Identifier, Identifier, Eof]);
        assert_eq!(kinds("int1"), [Identifier, Eof]);
    }

    #[test]
    fn numeric_classification() {
        assert_eq!(kinds("12"), [IntLit, Eof]);
        assert_eq!(kinds("12.34"), [DblLit, Eof]);
        assert_eq!(kinds("12."), [Error, Eof]);
        assert_eq!(kinds("12..3"), [Error, Eof]);
        assert_eq!(kinds("12.34.5"), [Error, Eof]);

        // the whole digit run forms a single lexeme
        let lexemes = scan_all("12..3");
        assert_eq!(lexemes[0].text, "12..3");
    }

    #[test]
    fn number_stops_at_letter() {
        let lexemes = scan_all("12.3a");
        assert_eq!(lexemes[0].kind, DblLit);
        assert_eq!(lexemes[0].text, "12.3");
        assert_eq!(lexemes[1].kind, Identifier);
        assert_eq!(lexemes[1].text, "a");
    }

    #[test]
    fn string_literal_keeps_quotes() {
        let lexemes = scan_all("\"hi\"");
        assert_eq!(lexemes[0].kind, StrLit);
        assert_eq!(lexemes[0].text, "\"hi\"");

        let lexemes = scan_all("\"\"");
        assert_eq!(lexemes[0].kind, StrLit);
        assert_eq!(lexemes[0].text, "\"\"");
    }

    #[test]
    fn unterminated_string_recovers_at_newline() {
        let lexemes = scan_all("\"hi\nx");
        assert_eq!(lexemes[0].kind, Error);
        assert_eq!(lexemes[0].text, "\"hi");
        // scanning continues from the head after the error
        assert_eq!(lexemes[1].kind, Identifier);
        assert_eq!(lexemes[1].text, "x");
        assert_eq!((lexemes[1].line, lexemes[1].col), (2, 1));
    }

    #[test]
    fn unterminated_string_at_eof() {
        let lexemes = scan_all("\"hi");
        assert_eq!(lexemes[0].kind, Error);
        assert_eq!(lexemes[0].text, "\"hi");
        assert_eq!(lexemes[1].kind, Eof);
    }

    #[test]
    fn illegal_characters() {
        assert_eq!(kinds("?"), [IllegalOp, Eof]);
        // a leading decimal separator is a single-char operator lookup
        let lexemes = scan_all(". 5");
        assert_eq!(lexemes[0].kind, IllegalOp);
        assert_eq!(lexemes[0].text, ".");
        assert_eq!(lexemes[1].kind, IntLit);
    }

    #[test]
    fn dollar_sentinel_terminates_input() {
        let lexemes = scan_all("a$b");
        assert_eq!(
            lexemes.iter().map(|l| l.kind).collect::<Vec<_>>(),
            [Identifier, Eof]
        );
    }

    #[test]
    fn dollar_sentinel_can_be_disabled() {
        let mut scanner = Scanner::from_text("a$b").unwrap().with_dollar_eof(false);
        let mut out = Vec::new();
        loop {
            let kind = scanner.advance().unwrap();
            out.push((kind, scanner.current().unwrap().text.clone()));
            if kind == Eof {
                break;
            }
        }
        assert_eq!(
            out,
            [
                (Identifier, "a".to_owned()),
                (IllegalOp, "$".to_owned()),
                (Identifier, "b".to_owned()),
                (Eof, "EOF".to_owned()),
            ]
        );
    }

    #[test]
    fn eof_is_idempotent_with_stable_position() {
        let mut scanner = Scanner::from_text("a").unwrap();
        assert_eq!(scanner.advance().unwrap(), Identifier);
        assert_eq!(scanner.advance().unwrap(), Eof);
        let first = scanner.current().unwrap().clone();
        for _ in 0..3 {
            assert_eq!(scanner.advance().unwrap(), Eof);
            assert_eq!(scanner.current().unwrap(), &first);
        }
        assert_eq!(first.text, "EOF");
        assert_eq!((first.line, first.col), (1, 2));
    }

    #[test]
    fn positions_track_lines_and_columns() {
        let lexemes = scan_all("a bb\n  ccc");
        assert_eq!((lexemes[0].line, lexemes[0].col), (1, 1));
        assert_eq!((lexemes[1].line, lexemes[1].col), (1, 3));
        assert_eq!((lexemes[2].line, lexemes[2].col), (2, 3));
    }

    #[test]
    fn head_position_is_one_past_last_consumed() {
        let mut scanner = Scanner::from_text("ab c").unwrap();
        scanner.advance().unwrap();
        assert_eq!(scanner.position(), (1, 3));
    }

    #[test]
    fn unicode_identifiers() {
        let lexemes = scan_all("λx über");
        assert_eq!(lexemes[0].kind, Identifier);
        assert_eq!(lexemes[0].text, "λx");
        assert_eq!(lexemes[1].kind, Identifier);
        assert_eq!(lexemes[1].text, "über");
        // columns count characters, not bytes
        assert_eq!((lexemes[1].line, lexemes[1].col), (1, 4));
    }

    #[test]
    fn empty_input_yields_eof() {
        assert_eq!(kinds(""), [Eof]);
    }

    #[derive(Debug)]
    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "source failure"))
        }
    }

    #[test]
    fn io_error_surfaces_from_priming() {
        let err = Scanner::new(FailingReader).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Other);
    }

    struct TruncatedReader {
        data: &'static [u8],
        pos: usize,
    }

    impl Read for TruncatedReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.pos < self.data.len() {
                buf[0] = self.data[self.pos];
                self.pos += 1;
                Ok(1)
            } else {
                Err(io::Error::new(io::ErrorKind::Other, "source failure"))
            }
        }
    }

    #[test]
    fn io_error_surfaces_mid_scan() {
        let mut scanner = Scanner::new(TruncatedReader { data: b"ab", pos: 0 }).unwrap();
        let err = scanner.advance().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Other);
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let err = Scanner::new(&[0xffu8][..]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
