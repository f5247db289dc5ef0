//! Byte-level scanner for the calculator language.
//!
//! [`CalcScanner`] pulls bytes from any `Iterator<Item = u8>` and produces one
//! [`CalcToken`] per call to [`next_token`](CalcScanner::next_token). It
//! recognizes `+ - * / ( )`, unsigned decimal integer literals and end of
//! input, which is either the end of the byte stream or `0x04` (^D). ASCII
//! whitespace separates tokens and is otherwise ignored.
//!
//! Once end of input has been reached the scanner keeps returning
//! [`TokenID::End`].
use crate::{CalcToken, Position, Span, TokenID};
use std::iter::Peekable;
use thiserror::Error;

/// End-of-transmission, accepted as an explicit end of input.
const EOT: u8 = 0x04;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("unexpected character {ch:?} at {position}")]
    UnexpectedChar { ch: char, position: Position },

    #[error("integer literal does not fit in 64 bits ({})", span.display())]
    NumberTooLarge { span: Span },
}

impl ScanError {
    /// Where in the source the error was found.
    pub fn span(&self) -> Span {
        match self {
            ScanError::UnexpectedChar { position, .. } => Span::new(
                *position,
                Position::new(position.line, position.column + 1),
            ),
            ScanError::NumberTooLarge { span } => *span,
        }
    }
}

pub struct CalcScanner<I>
where
    I: Iterator<Item = u8>,
{
    input: Peekable<I>,
    pos: Position,
    at_end: bool,
}

impl<I> CalcScanner<I>
where
    I: Iterator<Item = u8>,
{
    pub fn new(input: I) -> Self {
        Self {
            input: input.peekable(),
            pos: Position::default(),
            at_end: false,
        }
    }

    /// Position of the next unread byte.
    pub fn position(&self) -> Position {
        self.pos
    }

    pub fn next_token(&mut self) -> Result<CalcToken, ScanError> {
        let token = self.scan()?;
        log::trace!("Token {:?} {}", token.token_id, token.span.display());
        Ok(token)
    }

    fn scan(&mut self) -> Result<CalcToken, ScanError> {
        loop {
            if self.at_end {
                return Ok(CalcToken::new(
                    TokenID::End,
                    None,
                    Span::new(self.pos, self.pos),
                ));
            }
            let Some(b) = self.input.peek().copied() else {
                self.at_end = true;
                continue;
            };
            let start = self.pos;
            let token_id = match b {
                EOT => {
                    self.bump(b);
                    self.at_end = true;
                    return Ok(CalcToken::new(TokenID::End, None, Span::new(start, start)));
                }
                b if b.is_ascii_whitespace() => {
                    self.bump(b);
                    continue;
                }
                b'0'..=b'9' => return self.number(),
                b'+' => TokenID::Plus,
                b'-' => TokenID::Minus,
                b'*' => TokenID::Asterisk,
                b'/' => TokenID::Slash,
                b'(' => TokenID::LeftParen,
                b')' => TokenID::RightParen,
                b => return Err(self.unexpected(b, start)),
            };
            self.bump(b);
            return Ok(CalcToken::new(token_id, None, Span::new(start, self.pos)));
        }
    }

    /// Reads a whole run of digits, even past an overflow.
    fn number(&mut self) -> Result<CalcToken, ScanError> {
        let start = self.pos;
        let mut value: Option<i64> = Some(0);
        while let Some(b) = self.input.peek().copied() {
            if !b.is_ascii_digit() {
                break;
            }
            self.bump(b);
            value = value
                .and_then(|v| v.checked_mul(10))
                .and_then(|v| v.checked_add(i64::from(b - b'0')));
        }
        let span = Span::new(start, self.pos);
        match value {
            Some(value) => Ok(CalcToken::new(TokenID::Number, Some(value), span)),
            None => Err(ScanError::NumberTooLarge { span }),
        }
    }

    /// Consumes the UTF-8 character led by `lead`. Malformed sequences are
    /// reported as U+FFFD.
    fn unexpected(&mut self, lead: u8, position: Position) -> ScanError {
        let len = match lead {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        };
        let mut buf = [lead, 0, 0, 0];
        let mut n = 1;
        self.input.next();
        while n < len {
            match self.input.peek().copied() {
                Some(b @ 0x80..=0xBF) => {
                    buf[n] = b;
                    n += 1;
                    self.input.next();
                }
                _ => break,
            }
        }
        self.pos.column += 1;
        let ch = std::str::from_utf8(&buf[..n])
            .ok()
            .and_then(|s| s.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        ScanError::UnexpectedChar { ch, position }
    }

    fn bump(&mut self, b: u8) {
        self.input.next();
        if b == b'\n' {
            self.pos.line += 1;
            self.pos.column = 0;
        } else {
            self.pos.column += 1;
        }
    }
}
