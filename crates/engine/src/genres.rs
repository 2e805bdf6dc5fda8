//! Decoding of the genre field for display.
//!
//! Depending on the export, the genre column holds either plain text
//! (`"Action Adventure"`) or a list-like literal such as
//! `[{'id': 28, 'name': 'Action'}, {'id': 12, 'name': 'Adventure'}]`.
//! The latter is decoded into its names; anything that isn't a well-formed
//! list falls back to the stored text untouched.

use std::fmt;
use thiserror::Error;

/// Deepest list/dict nesting the literal parser will follow.
const MAX_NESTING: usize = 64;

/// Outcome of decoding a stored genre string.
#[derive(Debug, Clone, PartialEq)]
pub enum GenreField {
    /// The value was a list literal; these are the `name`s of its entries
    Parsed(Vec<String>),
    /// Anything else, kept verbatim
    Raw(String),
}

impl GenreField {
    /// Decode a stored genre string. Never fails.
    pub fn parse(raw: &str) -> Self {
        match parse_literal(raw).and_then(genre_names) {
            Ok(names) => GenreField::Parsed(names),
            Err(_) => GenreField::Raw(raw.to_string()),
        }
    }
}

impl fmt::Display for GenreField {
    /// Comma-separated names, or the raw text
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenreField::Parsed(names) => f.write_str(&names.join(", ")),
            GenreField::Raw(raw) => f.write_str(raw),
        }
    }
}

/// Render a possibly-absent genre field as a readable string.
pub fn format_genres(raw: Option<&str>) -> String {
    raw.map(|g| GenreField::parse(g).to_string()).unwrap_or_default()
}

#[derive(Error, Debug, PartialEq)]
enum LiteralError {
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("unexpected character '{found}' at offset {offset}")]
    UnexpectedChar { found: char, offset: usize },
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    #[error("trailing input at offset {0}")]
    TrailingInput(usize),
    #[error("nesting too deep at offset {0}")]
    TooDeep(usize),
    #[error("not a list")]
    NotAList,
    #[error("genre name is not a string")]
    NonStringName,
}

/// The subset of Python literals that show up in dataset exports.
#[derive(Debug, Clone, PartialEq)]
enum Literal {
    List(Vec<Literal>),
    Dict(Vec<(Literal, Literal)>),
    Str(String),
    Number(f64),
    Bool(bool),
    None,
}

/// Pull the `name` of every dict entry that has one.
///
/// A non-string name poisons the whole value.
fn genre_names(literal: Literal) -> Result<Vec<String>, LiteralError> {
    let Literal::List(entries) = literal else {
        return Err(LiteralError::NotAList);
    };

    let mut names = Vec::new();
    for entry in entries {
        let Literal::Dict(pairs) = entry else {
            continue;
        };
        // Python dicts keep the last value for a repeated key
        let name = pairs
            .into_iter()
            .filter(|(key, _)| matches!(key, Literal::Str(k) if k == "name"))
            .map(|(_, value)| value)
            .last();
        match name {
            Some(Literal::Str(name)) => names.push(name),
            Some(_) => return Err(LiteralError::NonStringName),
            None => {}
        }
    }
    Ok(names)
}

fn parse_literal(input: &str) -> Result<Literal, LiteralError> {
    let mut parser = LiteralParser {
        chars: input.char_indices().collect(),
        pos: 0,
        depth: 0,
    };
    let value = parser.value()?;
    parser.skip_whitespace();
    match parser.peek() {
        None => Ok(value),
        Some((offset, _)) => Err(LiteralError::TrailingInput(offset)),
    }
}

struct LiteralParser {
    chars: Vec<(usize, char)>,
    pos: usize,
    /// Open lists and dicts around the current position
    depth: usize,
}

impl LiteralParser {
    fn peek(&self) -> Option<(usize, char)> {
        self.chars.get(self.pos).copied()
    }

    fn next(&mut self) -> Result<(usize, char), LiteralError> {
        let current = self.peek().ok_or(LiteralError::UnexpectedEnd)?;
        self.pos += 1;
        Ok(current)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some((_, c)) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, wanted: char) -> Result<(), LiteralError> {
        self.skip_whitespace();
        match self.next()? {
            (_, c) if c == wanted => Ok(()),
            (offset, found) => Err(LiteralError::UnexpectedChar { found, offset }),
        }
    }

    fn value(&mut self) -> Result<Literal, LiteralError> {
        self.skip_whitespace();
        let (offset, c) = self.peek().ok_or(LiteralError::UnexpectedEnd)?;
        match c {
            '[' | '{' if self.depth >= MAX_NESTING => Err(LiteralError::TooDeep(offset)),
            '[' => self.nested(Self::list),
            '{' => self.nested(Self::dict),
            '\'' | '"' => self.string().map(Literal::Str),
            '-' | '+' | '.' | '0'..='9' => self.number(),
            c if c.is_alphabetic() => self.keyword(),
            found => Err(LiteralError::UnexpectedChar { found, offset }),
        }
    }

    fn nested(
        &mut self,
        parse: fn(&mut Self) -> Result<Literal, LiteralError>,
    ) -> Result<Literal, LiteralError> {
        self.depth += 1;
        let value = parse(self);
        self.depth -= 1;
        value
    }

    /// Comma-separated items up to `close`, trailing comma allowed
    fn sequence<T>(
        &mut self,
        close: char,
        mut item: impl FnMut(&mut Self) -> Result<T, LiteralError>,
    ) -> Result<Vec<T>, LiteralError> {
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            if matches!(self.peek(), Some((_, c)) if c == close) {
                self.pos += 1;
                return Ok(items);
            }
            items.push(item(self)?);
            self.skip_whitespace();
            match self.next()? {
                (_, ',') => {}
                (_, c) if c == close => return Ok(items),
                (offset, found) => return Err(LiteralError::UnexpectedChar { found, offset }),
            }
        }
    }

    fn list(&mut self) -> Result<Literal, LiteralError> {
        self.expect('[')?;
        self.sequence(']', Self::value).map(Literal::List)
    }

    fn dict(&mut self) -> Result<Literal, LiteralError> {
        self.expect('{')?;
        self.sequence('}', |parser| {
            let key = parser.value()?;
            parser.expect(':')?;
            let value = parser.value()?;
            Ok((key, value))
        })
        .map(Literal::Dict)
    }

    fn string(&mut self) -> Result<String, LiteralError> {
        let (_, quote) = self.next()?;
        let mut out = String::new();
        loop {
            match self.next()? {
                (_, c) if c == quote => return Ok(out),
                (_, '\\') => {
                    let (_, escaped) = self.next()?;
                    match escaped {
                        'n' => out.push('\n'),
                        't' => out.push('\t'),
                        'r' => out.push('\r'),
                        '\\' | '\'' | '"' => out.push(escaped),
                        other => {
                            out.push('\\');
                            out.push(other);
                        }
                    }
                }
                (_, c) => out.push(c),
            }
        }
    }

    fn number(&mut self) -> Result<Literal, LiteralError> {
        let start = self.pos;
        while matches!(
            self.peek(),
            Some((_, c)) if c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E' | '_')
        ) {
            self.pos += 1;
        }
        let text: String = self.chars[start..self.pos].iter().map(|&(_, c)| c).collect();
        text.replace('_', "")
            .parse::<f64>()
            .map(Literal::Number)
            .map_err(|_| LiteralError::InvalidNumber(text))
    }

    fn keyword(&mut self) -> Result<Literal, LiteralError> {
        let start = self.pos;
        let (offset, _) = self.chars[start];
        while matches!(self.peek(), Some((_, c)) if c.is_alphanumeric() || c == '_') {
            self.pos += 1;
        }
        let word: String = self.chars[start..self.pos].iter().map(|&(_, c)| c).collect();
        match word.as_str() {
            "True" => Ok(Literal::Bool(true)),
            "False" => Ok(Literal::Bool(false)),
            "None" => Ok(Literal::None),
            _ => Err(LiteralError::UnexpectedChar {
                found: word.chars().next().unwrap_or_default(),
                offset,
            }),
        }
    }
}
