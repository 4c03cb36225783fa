//! Recursive-descent parser for a restricted JavaScript object-literal
//! grammar: objects, arrays, single/double/backtick strings, numbers,
//! booleans, null, bare identifier keys and values, line/block comments,
//! trailing commas.
//!
//! This replaces regex "relaxation" of config text: braces inside string
//! literals cannot confuse it, and no input is ever executed. Template
//! interpolation, spreads and computed keys are rejected rather than
//! misread.

use serde_json::{Map, Number, Value};

pub(super) type ParseResult<T> = std::result::Result<T, ObjectParseError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct ObjectParseError {
    pub(super) message: String,
    pub(super) offset: usize,
}

impl std::fmt::Display for ObjectParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at offset {}", self.message, self.offset)
    }
}

/// Parse the object literal that starts at `start` (which must index a `{`
/// in `source`). Returns the parsed value and the offset one past the
/// closing brace.
pub(super) fn parse_object_at(source: &str, start: usize) -> ParseResult<(Value, usize)> {
    let mut parser = Parser {
        chars: source.char_indices().collect(),
        pos: 0,
        source_len: source.len(),
    };
    parser.seek(start)?;
    let value = parser.parse_object()?;
    let end = parser.offset();
    Ok((value, end))
}

struct Parser {
    chars: Vec<(usize, char)>,
    pos: usize,
    source_len: usize,
}

impl Parser {
    fn seek(&mut self, byte_offset: usize) -> ParseResult<()> {
        match self.chars.iter().position(|(off, _)| *off == byte_offset) {
            Some(pos) => {
                self.pos = pos;
                Ok(())
            }
            None => Err(self.error_at(byte_offset, "start offset out of range")),
        }
    }

    fn offset(&self) -> usize {
        self.chars
            .get(self.pos)
            .map_or(self.source_len, |(off, _)| *off)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).map(|(_, c)| *c)
    }

    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.chars.get(self.pos + n).map(|(_, c)| *c)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn error(&self, message: impl Into<String>) -> ObjectParseError {
        self.error_at(self.offset(), message)
    }

    fn error_at(&self, offset: usize, message: impl Into<String>) -> ObjectParseError {
        ObjectParseError {
            message: message.into(),
            offset,
        }
    }

    /// Skip whitespace and both comment forms.
    fn skip_trivia(&mut self) -> ParseResult<()> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('/') if self.peek_ahead(1) == Some('/') => {
                    while let Some(c) = self.bump() {
                        if c == '\n' {
                            break;
                        }
                    }
                }
                Some('/') if self.peek_ahead(1) == Some('*') => {
                    self.bump();
                    self.bump();
                    loop {
                        match self.bump() {
                            Some('*') if self.peek() == Some('/') => {
                                self.bump();
                                break;
                            }
                            Some(_) => {}
                            None => return Err(self.error("unterminated block comment")),
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn expect(&mut self, expected: char) -> ParseResult<()> {
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(self.error(format!("expected '{expected}', found '{c}'"))),
            None => Err(self.error(format!("expected '{expected}', found end of input"))),
        }
    }

    fn parse_object(&mut self) -> ParseResult<Value> {
        self.expect('{')?;
        let mut map = Map::new();
        loop {
            self.skip_trivia()?;
            match self.peek() {
                Some('}') => {
                    self.bump();
                    return Ok(Value::Object(map));
                }
                Some('.') => return Err(self.error("spread syntax is not supported")),
                Some('[') => return Err(self.error("computed keys are not supported")),
                Some(_) => {
                    let key = self.parse_key()?;
                    self.skip_trivia()?;
                    self.expect(':')?;
                    self.skip_trivia()?;
                    let value = self.parse_value()?;
                    map.insert(key, value);
                    self.skip_trivia()?;
                    match self.peek() {
                        Some(',') => {
                            self.bump();
                        }
                        Some('}') => {}
                        _ => return Err(self.error("expected ',' or '}' after object entry")),
                    }
                }
                None => return Err(self.error("unterminated object literal")),
            }
        }
    }

    fn parse_key(&mut self) -> ParseResult<String> {
        match self.peek() {
            Some('"') | Some('\'') | Some('`') => self.parse_string(),
            Some(c) if c.is_ascii_digit() || c == '-' => {
                let number = self.parse_number()?;
                Ok(number.to_string())
            }
            Some(c) if is_ident_start(c) => Ok(self.parse_ident()),
            Some(c) => Err(self.error(format!("invalid object key starting with '{c}'"))),
            None => Err(self.error("expected object key, found end of input")),
        }
    }

    fn parse_value(&mut self) -> ParseResult<Value> {
        match self.peek() {
            Some('{') => self.parse_object(),
            Some('[') => self.parse_array(),
            Some('"') | Some('\'') | Some('`') => self.parse_string().map(Value::String),
            Some(c) if c.is_ascii_digit() || c == '-' || c == '.' => {
                let number = self.parse_number()?;
                Number::from_f64(number)
                    .map(Value::Number)
                    .ok_or_else(|| self.error("number out of range"))
            }
            Some(c) if is_ident_start(c) => {
                let ident = self.parse_ident();
                Ok(match ident.as_str() {
                    "true" => Value::Bool(true),
                    "false" => Value::Bool(false),
                    "null" | "undefined" => Value::Null,
                    _ => Value::String(ident),
                })
            }
            Some(c) => Err(self.error(format!("unexpected character '{c}' in value position"))),
            None => Err(self.error("expected value, found end of input")),
        }
    }

    fn parse_array(&mut self) -> ParseResult<Value> {
        self.expect('[')?;
        let mut items = Vec::new();
        loop {
            self.skip_trivia()?;
            match self.peek() {
                Some(']') => {
                    self.bump();
                    return Ok(Value::Array(items));
                }
                Some(_) => {
                    items.push(self.parse_value()?);
                    self.skip_trivia()?;
                    match self.peek() {
                        Some(',') => {
                            self.bump();
                        }
                        Some(']') => {}
                        _ => return Err(self.error("expected ',' or ']' after array item")),
                    }
                }
                None => return Err(self.error("unterminated array literal")),
            }
        }
    }

    fn parse_string(&mut self) -> ParseResult<String> {
        let quote = self
            .bump()
            .ok_or_else(|| self.error("expected string, found end of input"))?;
        let mut out = String::new();
        loop {
            match self.bump() {
                Some(c) if c == quote => return Ok(out),
                Some('\\') => match self.bump() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some(c) => out.push(c),
                    None => return Err(self.error("unterminated escape sequence")),
                },
                Some('$') if quote == '`' && self.peek() == Some('{') => {
                    return Err(self.error("template interpolation is not supported"));
                }
                Some(c) => out.push(c),
                None => return Err(self.error("unterminated string literal")),
            }
        }
    }

    fn parse_number(&mut self) -> ParseResult<f64> {
        let mut text = String::new();
        if self.peek() == Some('-') {
            text.push('-');
            self.bump();
        }
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || c == '.' {
                text.push(c);
                self.bump();
            } else {
                break;
            }
        }
        text.parse()
            .map_err(|_| self.error(format!("invalid number '{text}'")))
    }

    fn parse_ident(&mut self) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                out.push(c);
                self.bump();
            } else {
                break;
            }
        }
        out
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$' || c == '-'
}
