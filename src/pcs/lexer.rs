//! Line tokenizer shared by both dialects.

use core::fmt;

/// Parse failure inside a single line; the reader attaches the line.
pub(crate) type LineResult<T> = core::result::Result<T, String>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Token {
    /// Bare text, including keywords and `&&`, `<`, `>`.
    Word(String),
    /// Text written between double quotes; never a keyword.
    Quoted(String),
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Pipe,
    OrOr,
    Assign,
    EqEq,
    NotEq,
}

impl Token {
    /// The text of a word or quoted token.
    pub(crate) fn text(&self) -> Option<&str> {
        match self {
            Self::Word(s) | Self::Quoted(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this is the bare word `keyword`.
    pub(crate) fn is_word(&self, keyword: &str) -> bool {
        matches!(self, Self::Word(s) if s == keyword)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Word(s) => f.write_str(s),
            Self::Quoted(s) => write!(f, "\"{s}\""),
            Self::LBrace => f.write_str("{"),
            Self::RBrace => f.write_str("}"),
            Self::LBracket => f.write_str("["),
            Self::RBracket => f.write_str("]"),
            Self::Comma => f.write_str(","),
            Self::Pipe => f.write_str("|"),
            Self::OrOr => f.write_str("||"),
            Self::Assign => f.write_str("="),
            Self::EqEq => f.write_str("=="),
            Self::NotEq => f.write_str("!="),
        }
    }
}

/// Result of lexing one line.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Lexed {
    pub(crate) tokens: Vec<Token>,
    /// Whether a `#` outside quotes cut the line.
    pub(crate) has_comment: bool,
}

/// Characters that end a bare word.
fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '{' | '}' | '[' | ']' | ',' | '|' | '=' | '"' | '#')
}

pub(crate) fn tokenize(line: &str) -> LineResult<Lexed> {
    let mut tokens = Vec::new();
    let mut chars = line.char_indices().peekable();
    let mut has_comment = false;

    while let Some(&(start, c)) = chars.peek() {
        match c {
            '#' => {
                has_comment = true;
                break;
            }
            c if c.is_whitespace() => {
                chars.next();
            }
            '{' | '}' | '[' | ']' | ',' => {
                chars.next();
                tokens.push(match c {
                    '{' => Token::LBrace,
                    '}' => Token::RBrace,
                    '[' => Token::LBracket,
                    ']' => Token::RBracket,
                    _ => Token::Comma,
                });
            }
            '|' => {
                chars.next();
                if chars.next_if(|&(_, c)| c == '|').is_some() {
                    tokens.push(Token::OrOr);
                } else {
                    tokens.push(Token::Pipe);
                }
            }
            '=' => {
                chars.next();
                if chars.next_if(|&(_, c)| c == '=').is_some() {
                    tokens.push(Token::EqEq);
                } else {
                    tokens.push(Token::Assign);
                }
            }
            '"' => {
                chars.next();
                let mut text = String::new();
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    if c == '"' {
                        closed = true;
                        break;
                    }
                    text.push(c);
                }
                if !closed {
                    return Err(format!("unterminated quote starting at column {}", start + 1));
                }
                tokens.push(Token::Quoted(text));
            }
            _ => {
                let mut word = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if is_delimiter(c) {
                        break;
                    }
                    if c == '!' {
                        let mut ahead = chars.clone();
                        ahead.next();
                        if matches!(ahead.peek(), Some((_, '='))) {
                            break;
                        }
                    }
                    word.push(c);
                    chars.next();
                }
                if word.is_empty() {
                    // a `!` directly followed by `=`
                    chars.next();
                    chars.next();
                    tokens.push(Token::NotEq);
                } else {
                    tokens.push(Token::Word(word));
                }
            }
        }
    }

    Ok(Lexed {
        tokens,
        has_comment,
    })
}

/// Forward-only cursor over the tokens of one line.
pub(crate) struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    pub(crate) fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    pub(crate) fn advance(&mut self) -> Option<&'a Token> {
        let token = self.current();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub(crate) fn check(&self, token: &Token) -> bool {
        self.current() == Some(token)
    }

    /// Consumes `token` if it is next.
    pub(crate) fn eat(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, token: &Token) -> LineResult<()> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.error(&format!("expected `{token}`")))
        }
    }

    /// Consumes a word or quoted token and returns its text.
    pub(crate) fn expect_text(&mut self, what: &str) -> LineResult<String> {
        match self.current().and_then(Token::text) {
            Some(text) => {
                self.pos += 1;
                Ok(text.to_owned())
            }
            None => Err(self.error(&format!("expected {what}"))),
        }
    }

    /// Consumes `{ item (, item)* }`.
    pub(crate) fn expect_set(&mut self, what: &str) -> LineResult<Vec<String>> {
        self.expect(&Token::LBrace)?;
        let mut items = vec![self.expect_text(what)?];
        while self.eat(&Token::Comma) {
            items.push(self.expect_text(what)?);
        }
        self.expect(&Token::RBrace)?;
        Ok(items)
    }

    pub(crate) fn error(&self, message: &str) -> String {
        match self.current() {
            Some(token) => format!("{message}, found `{token}`"),
            None => format!("{message}, found end of line"),
        }
    }
}
