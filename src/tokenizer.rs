// ABOUTME: Pull-based tokenizer turning a byte stream into a token stream

use std::io::Read;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Unknown,
    Number,
    Bool,
    Name,
    Quote,
    Dot,
    LeftParen,
    RightParen,
    End,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Token {
            kind,
            text: text.into(),
        }
    }
}

fn is_divider(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

/// Any byte except the four delimiters may appear inside a name.
fn is_name_byte(byte: u8) -> bool {
    !matches!(byte, b'(' | b')' | b'.' | b'\'')
}

/// Reads one token ahead from a byte stream. The stream only needs to
/// support single-byte reads; a read returning no bytes reports
/// end-of-input, and reading is retried on the next advance so a
/// refillable stream (the REPL input buffer) resumes after new data.
pub struct Tokenizer<R: Read> {
    input: R,
    lookahead: Option<u8>,
    current: Token,
}

impl<R: Read> Tokenizer<R> {
    pub fn new(input: R) -> Self {
        Tokenizer {
            input,
            lookahead: None,
            current: Token::new(TokenKind::Unknown, ""),
        }
    }

    /// Returns the current token without advancing.
    pub fn current(&self) -> &Token {
        &self.current
    }

    fn peek_byte(&mut self) -> Result<Option<u8>, Error> {
        if self.lookahead.is_none() {
            let mut buf = [0u8; 1];
            let read = self
                .input
                .read(&mut buf)
                .map_err(|err| Error::runtime(err.to_string()))?;
            if read == 1 {
                self.lookahead = Some(buf[0]);
            }
        }
        Ok(self.lookahead)
    }

    fn bump(&mut self) -> Result<Option<u8>, Error> {
        let byte = self.peek_byte()?;
        self.lookahead = None;
        Ok(byte)
    }

    fn skip_dividers(&mut self) -> Result<(), Error> {
        while self.peek_byte()?.is_some_and(is_divider) {
            self.bump()?;
        }
        Ok(())
    }

    /// Replaces the current token with the next one from the stream.
    pub fn advance(&mut self) -> Result<(), Error> {
        self.skip_dividers()?;
        let Some(byte) = self.bump()? else {
            self.current = Token::new(TokenKind::End, "");
            return Ok(());
        };
        self.current = match byte {
            b'(' => Token::new(TokenKind::LeftParen, "("),
            b')' => Token::new(TokenKind::RightParen, ")"),
            b'\'' => Token::new(TokenKind::Quote, "'"),
            b'.' => Token::new(TokenKind::Dot, "."),
            b'+' | b'-' => self.signed(byte)?,
            _ => self.word(byte)?,
        };
        Ok(())
    }

    /// `+` and `-` are a number prefix before a digit, a one-character
    /// name before a divider, delimiter or end-of-input, and a syntax
    /// error before anything else.
    fn signed(&mut self, sign: u8) -> Result<Token, Error> {
        match self.peek_byte()? {
            None => Ok(Token::new(TokenKind::Name, (sign as char).to_string())),
            Some(next) if is_divider(next) || !is_name_byte(next) => {
                Ok(Token::new(TokenKind::Name, (sign as char).to_string()))
            }
            Some(next) if next.is_ascii_digit() => {
                let mut bytes = vec![sign];
                while let Some(digit) = self.peek_byte()? {
                    if !digit.is_ascii_digit() {
                        break;
                    }
                    self.bump()?;
                    bytes.push(digit);
                }
                Ok(Token::new(
                    TokenKind::Number,
                    String::from_utf8_lossy(&bytes).into_owned(),
                ))
            }
            Some(_) => Err(Error::syntax("variable name starting with +/-")),
        }
    }

    fn word(&mut self, first: u8) -> Result<Token, Error> {
        let mut bytes = vec![first];
        let mut all_digits = first.is_ascii_digit();
        while let Some(byte) = self.peek_byte()? {
            if is_divider(byte) || !is_name_byte(byte) {
                break;
            }
            self.bump()?;
            if !byte.is_ascii_digit() {
                all_digits = false;
            }
            bytes.push(byte);
        }
        let text = String::from_utf8_lossy(&bytes).into_owned();
        let kind = if all_digits {
            TokenKind::Number
        } else if text == "#t" || text == "#f" {
            TokenKind::Bool
        } else {
            TokenKind::Name
        };
        Ok(Token::new(kind, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn tokens(input: &str) -> Vec<(TokenKind, String)> {
        let mut tokenizer = Tokenizer::new(Cursor::new(input));
        let mut collected = Vec::new();
        loop {
            tokenizer.advance().expect("tokenize");
            let token = tokenizer.current().clone();
            let done = token.kind == TokenKind::End;
            collected.push((token.kind, token.text));
            if done {
                return collected;
            }
        }
    }

    fn kinds_and_texts(pairs: &[(TokenKind, &str)]) -> Vec<(TokenKind, String)> {
        pairs
            .iter()
            .map(|(kind, text)| (*kind, text.to_string()))
            .collect()
    }

    #[test]
    fn test_simple_stream() {
        use TokenKind::*;
        assert_eq!(
            tokens(" ( ) . ' + - +5 -3 10 #t #f abc #abc x"),
            kinds_and_texts(&[
                (LeftParen, "("),
                (RightParen, ")"),
                (Dot, "."),
                (Quote, "'"),
                (Name, "+"),
                (Name, "-"),
                (Number, "+5"),
                (Number, "-3"),
                (Number, "10"),
                (Bool, "#t"),
                (Bool, "#f"),
                (Name, "abc"),
                (Name, "#abc"),
                (Name, "x"),
                (End, ""),
            ])
        );
    }

    #[test]
    fn test_names_starting_with_digits() {
        use TokenKind::*;
        assert_eq!(
            tokens("12a( 12.3 12>5"),
            kinds_and_texts(&[
                (Name, "12a"),
                (LeftParen, "("),
                (Number, "12"),
                (Dot, "."),
                (Number, "3"),
                (Name, "12>5"),
                (End, ""),
            ])
        );
    }

    #[test]
    fn test_dividers() {
        use TokenKind::*;
        assert_eq!(
            tokens("\n1 2\t  3 \r\n4"),
            kinds_and_texts(&[
                (Number, "1"),
                (Number, "2"),
                (Number, "3"),
                (Number, "4"),
                (End, ""),
            ])
        );
    }

    #[test]
    fn test_sign_followed_by_name_char_is_error() {
        let mut tokenizer = Tokenizer::new(Cursor::new("+abc"));
        let err = tokenizer.advance().unwrap_err();
        assert_eq!(
            err.to_string(),
            "SyntaxError: variable name starting with +/-"
        );
    }

    #[test]
    fn test_sign_before_delimiter_is_a_name() {
        use TokenKind::*;
        assert_eq!(
            tokens("+("),
            kinds_and_texts(&[(Name, "+"), (LeftParen, "("), (End, "")])
        );
    }

    #[test]
    fn test_end_is_sticky() {
        let mut tokenizer = Tokenizer::new(Cursor::new("1"));
        tokenizer.advance().unwrap();
        assert_eq!(tokenizer.current().kind, TokenKind::Number);
        tokenizer.advance().unwrap();
        assert_eq!(tokenizer.current().kind, TokenKind::End);
        tokenizer.advance().unwrap();
        assert_eq!(tokenizer.current().kind, TokenKind::End);
    }
}
