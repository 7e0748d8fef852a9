use core::tokens::{ErrorTokenKind, Token, TokenKind};

/// Scans a byte buffer into tokens one at a time, advancing an index through
/// the source rather than pre-splitting into lines; `start`/`current` are
/// byte offsets rather than char offsets since source bytes need not be
/// valid UTF-8.
pub struct Lexer<'a> {
  source: &'a [u8],
  /// Byte offset of the first character of the token currently being scanned.
  start: usize,
  /// Byte offset of the next unconsumed character.
  current: usize,
  line: usize,
}

impl<'a> Lexer<'a> {
  pub fn new(source: &'a [u8]) -> Self {
    Lexer { source, start: 0, current: 0, line: 1 }
  }

  /// Scans and returns the next token, or a synthetic `EOF` forever once the
  /// source is exhausted.
  pub fn scan_token(&mut self) -> Token {
    self.skip_whitespace();
    self.start = self.current;

    if self.is_at_end() {
      return self.make_token(TokenKind::EOF);
    }

    let c = self.advance();

    if is_alpha(c) {
      return self.identifier();
    }
    if c.is_ascii_digit() {
      return self.number();
    }

    match c {
      b'(' => self.make_token(TokenKind::LEFT_PAREN),
      b')' => self.make_token(TokenKind::RIGHT_PAREN),
      b'{' => self.make_token(TokenKind::LEFT_BRACE),
      b'}' => self.make_token(TokenKind::RIGHT_BRACE),
      b',' => self.make_token(TokenKind::COMMA),
      b'.' => self.make_token(TokenKind::DOT),
      b'-' => self.make_token(TokenKind::MINUS),
      b'+' => self.make_token(TokenKind::PLUS),
      b';' => self.make_token(TokenKind::SEMICOLON),
      b'/' => self.make_token(TokenKind::SLASH),
      b'*' => self.make_token(TokenKind::STAR),
      b'!' => {
        let kind = if self.matches(b'=') { TokenKind::BANG_EQUAL } else { TokenKind::BANG };
        self.make_token(kind)
      }
      b'=' => {
        let kind = if self.matches(b'=') { TokenKind::EQUAL_EQUAL } else { TokenKind::EQUAL };
        self.make_token(kind)
      }
      b'<' => {
        let kind = if self.matches(b'=') { TokenKind::LESS_EQUAL } else { TokenKind::LESS };
        self.make_token(kind)
      }
      b'>' => {
        let kind = if self.matches(b'=') { TokenKind::GREATER_EQUAL } else { TokenKind::GREATER };
        self.make_token(kind)
      }
      b'"' => self.string(),
      _ => self.error_token(ErrorTokenKind::UnexpectedChar),
    }
  }

  fn is_at_end(&self) -> bool {
    self.current >= self.source.len()
  }

  fn advance(&mut self) -> u8 {
    let c = self.source[self.current];
    self.current += 1;
    c
  }

  fn peek(&self) -> u8 {
    if self.is_at_end() {
      b'\0'
    } else {
      self.source[self.current]
    }
  }

  fn peek_next(&self) -> u8 {
    if self.current + 1 >= self.source.len() {
      b'\0'
    } else {
      self.source[self.current + 1]
    }
  }

  fn matches(&mut self, expected: u8) -> bool {
    if self.is_at_end() || self.source[self.current] != expected {
      return false;
    }
    self.current += 1;
    true
  }

  fn skip_whitespace(&mut self) {
    loop {
      match self.peek() {
        b' ' | b'\r' | b'\t' => {
          self.current += 1;
        }
        b'\n' => {
          self.line += 1;
          self.current += 1;
        }
        b'/' if self.peek_next() == b'/' => {
          while self.peek() != b'\n' && !self.is_at_end() {
            self.current += 1;
          }
        }
        _ => break,
      }
    }
  }

  fn string(&mut self) -> Token {
    while self.peek() != b'"' && !self.is_at_end() {
      if self.peek() == b'\n' {
        self.line += 1;
      }
      self.current += 1;
    }

    if self.is_at_end() {
      return self.error_token(ErrorTokenKind::UnterminatedString);
    }

    // The closing quote.
    self.advance();
    self.make_token(TokenKind::STRING)
  }

  fn number(&mut self) -> Token {
    while self.peek().is_ascii_digit() {
      self.current += 1;
    }

    if self.peek() == b'.' && self.peek_next().is_ascii_digit() {
      // Consume the '.'.
      self.current += 1;
      while self.peek().is_ascii_digit() {
        self.current += 1;
      }
    }

    self.make_token(TokenKind::NUMBER)
  }

  fn identifier(&mut self) -> Token {
    while is_alpha(self.peek()) || self.peek().is_ascii_digit() {
      self.current += 1;
    }

    let kind = TokenKind::keyword_or_identifier(&self.source[self.start..self.current]);
    self.make_token(kind)
  }

  fn make_token(&self, kind: TokenKind) -> Token {
    Token { kind, span: (self.start, self.current), line: self.line }
  }

  fn error_token(&self, err: ErrorTokenKind) -> Token {
    Token { kind: TokenKind::ERROR(err), span: (self.start, self.current), line: self.line }
  }
}

fn is_alpha(c: u8) -> bool {
  c.is_ascii_alphabetic() || c == b'_'
}

#[cfg(test)]
mod tests {
  use super::*;

  fn kinds(src: &str) -> Vec<TokenKind> {
    let mut lexer = Lexer::new(src.as_bytes());
    let mut out = Vec::new();
    loop {
      let tok = lexer.scan_token();
      let done = tok.kind == TokenKind::EOF;
      out.push(tok.kind);
      if done {
        break;
      }
    }
    out
  }

  #[test]
  fn scans_punctuation_and_operators() {
    assert_eq!(
      kinds("(){},.-+;/*!= == <= >="),
      vec![
        TokenKind::LEFT_PAREN,
        TokenKind::RIGHT_PAREN,
        TokenKind::LEFT_BRACE,
        TokenKind::RIGHT_BRACE,
        TokenKind::COMMA,
        TokenKind::DOT,
        TokenKind::MINUS,
        TokenKind::PLUS,
        TokenKind::SEMICOLON,
        TokenKind::SLASH,
        TokenKind::STAR,
        TokenKind::BANG_EQUAL,
        TokenKind::EQUAL_EQUAL,
        TokenKind::LESS_EQUAL,
        TokenKind::GREATER_EQUAL,
        TokenKind::EOF,
      ]
    );
  }

  #[test]
  fn scans_keywords_and_identifiers() {
    assert_eq!(kinds("and foo"), vec![TokenKind::AND, TokenKind::IDENTIFIER, TokenKind::EOF]);
  }

  #[test]
  fn scans_numbers_with_an_optional_fraction() {
    let mut lexer = Lexer::new(b"3.14 7 9.");
    assert_eq!(lexer.scan_token().kind, TokenKind::NUMBER);
    let tok = lexer.scan_token();
    assert_eq!(tok.kind, TokenKind::NUMBER);
    assert_eq!(tok.lexeme(b"3.14 7 9."), b"7");
    // A trailing '.' with no digits after it is not consumed as part of the number.
    assert_eq!(lexer.scan_token().kind, TokenKind::NUMBER);
    assert_eq!(lexer.scan_token().kind, TokenKind::DOT);
  }

  #[test]
  fn unterminated_string_is_an_error_token() {
    let mut lexer = Lexer::new(b"\"abc");
    let tok = lexer.scan_token();
    assert_eq!(tok.kind, TokenKind::ERROR(ErrorTokenKind::UnterminatedString));
  }

  #[test]
  fn string_spanning_multiple_lines_advances_the_line_counter() {
    let mut lexer = Lexer::new(b"\"a\nb\" 1");
    let tok = lexer.scan_token();
    assert_eq!(tok.kind, TokenKind::STRING);
    let next = lexer.scan_token();
    assert_eq!(next.line, 2);
  }

  #[test]
  fn line_comments_are_skipped() {
    assert_eq!(kinds("// a comment\n1"), vec![TokenKind::NUMBER, TokenKind::EOF]);
  }

  #[test]
  fn unexpected_character_is_an_error_token() {
    let mut lexer = Lexer::new(b"@");
    assert_eq!(lexer.scan_token().kind, TokenKind::ERROR(ErrorTokenKind::UnexpectedChar));
  }
}
