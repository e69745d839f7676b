// ABOUTME: Recursive-descent parser building syntax trees from tokens

use std::io::Read;
use std::rc::Rc;

use crate::error::Error;
use crate::tokenizer::{TokenKind, Tokenizer};
use crate::value::{list_with_tail, Node, NodeRef, Value};

/// One-token-lookahead recursive descent over an owned tokenizer.
pub struct Parser<R: Read> {
    tokenizer: Tokenizer<R>,
}

impl<R: Read> Parser<R> {
    pub fn new(input: R) -> Self {
        Parser {
            tokenizer: Tokenizer::new(input),
        }
    }

    /// Reads exactly one expression. `None` means the input is exhausted
    /// before any token; the caller decides whether that ends the session.
    pub fn parse(&mut self) -> Result<Option<NodeRef>, Error> {
        self.tokenizer.advance()?;
        if self.tokenizer.current().kind == TokenKind::End {
            return Ok(None);
        }
        self.expression().map(Some)
    }

    fn expression(&mut self) -> Result<NodeRef, Error> {
        let token = self.tokenizer.current().clone();
        match token.kind {
            TokenKind::Number => {
                let value = token
                    .text
                    .parse::<i64>()
                    .map_err(|_| Error::syntax(format!("invalid number {}", token.text)))?;
                Ok(Rc::new(Node::Const(Value::Int(value))))
            }
            TokenKind::Bool => Ok(Rc::new(Node::Const(Value::Bool(token.text == "#t")))),
            TokenKind::Name => Ok(Rc::new(Node::Var(token.text))),
            TokenKind::Quote => {
                self.tokenizer.advance()?;
                Ok(Rc::new(Node::Quote(self.expression()?)))
            }
            TokenKind::LeftParen => self.list(),
            _ => Err(Error::syntax(format!("unexpectable token {}", token.text))),
        }
    }

    /// Parses the remainder of a list after its opening parenthesis,
    /// folding the children into right-nested pairs. A proper list gets
    /// the implicit `Empty` tail, a dotted list its explicit tail.
    fn list(&mut self) -> Result<NodeRef, Error> {
        self.tokenizer.advance()?;
        if self.tokenizer.current().kind == TokenKind::RightParen {
            return Ok(Rc::new(Node::Empty));
        }
        let mut elements = vec![self.expression()?];
        self.tokenizer.advance()?;
        while !matches!(
            self.tokenizer.current().kind,
            TokenKind::End | TokenKind::RightParen | TokenKind::Dot
        ) {
            elements.push(self.expression()?);
            self.tokenizer.advance()?;
        }
        let tail = match self.tokenizer.current().kind {
            TokenKind::End => return Err(Error::syntax(") or . expected")),
            TokenKind::Dot => {
                self.tokenizer.advance()?;
                let tail = self.expression()?;
                self.tokenizer.advance()?;
                if self.tokenizer.current().kind != TokenKind::RightParen {
                    return Err(Error::syntax("invalid pair"));
                }
                tail
            }
            _ => Rc::new(Node::Empty),
        };
        Ok(list_with_tail(elements, tail))
    }
}
