/// A byte-offset span `(start, end)` into the original source buffer.
pub type Span = (usize, usize);

/// A single unit of Hinton source code produced by the Lexer.
#[derive(Debug, Clone)]
pub struct Token {
  /// The token's kind.
  pub kind: TokenKind,
  /// The span of this token's lexeme in the source buffer.
  pub span: Span,
  /// The token's source line number.
  pub line: usize,
}

impl Token {
  /// Gets this token's lexeme from the original source buffer.
  ///
  /// # Parameters
  /// - `src`: The source buffer this token was lexed from.
  pub fn lexeme<'a>(&self, src: &'a [u8]) -> &'a [u8] {
    &src[self.span.0..self.span.1]
  }
}

/// The types of tokens produced while scanning a Hinton program.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
  // Single-character punctuation.
  LEFT_PAREN,
  RIGHT_PAREN,
  LEFT_BRACE,
  RIGHT_BRACE,
  COMMA,
  DOT,
  MINUS,
  PLUS,
  SEMICOLON,
  SLASH,
  STAR,

  // One-or-two character operators.
  BANG,
  BANG_EQUAL,
  EQUAL,
  EQUAL_EQUAL,
  GREATER,
  GREATER_EQUAL,
  LESS,
  LESS_EQUAL,

  // Literals.
  IDENTIFIER,
  STRING,
  NUMBER,

  // Keywords.
  AND,
  CLASS,
  ELSE,
  FALSE,
  FOR,
  FUN,
  IF,
  NIL,
  OR,
  PRINT,
  RETURN,
  SUPER,
  THIS,
  TRUE,
  VAR,
  WHILE,

  /// A malformed token; the scanner never prints, it only reports via this kind.
  ERROR(ErrorTokenKind),
  /// End of the source buffer. Produced forever once reached.
  EOF,
}

impl TokenKind {
  /// Maps an identifier lexeme to its reserved-word token kind, or `IDENTIFIER`
  /// if the lexeme is not a reserved word.
  ///
  /// # Parameters
  /// - `id`: The identifier's lexeme.
  pub fn keyword_or_identifier(id: &[u8]) -> TokenKind {
    match id {
      b"and" => TokenKind::AND,
      b"class" => TokenKind::CLASS,
      b"else" => TokenKind::ELSE,
      b"false" => TokenKind::FALSE,
      b"for" => TokenKind::FOR,
      b"fun" => TokenKind::FUN,
      b"if" => TokenKind::IF,
      b"nil" => TokenKind::NIL,
      b"or" => TokenKind::OR,
      b"print" => TokenKind::PRINT,
      b"return" => TokenKind::RETURN,
      b"super" => TokenKind::SUPER,
      b"this" => TokenKind::THIS,
      b"true" => TokenKind::TRUE,
      b"var" => TokenKind::VAR,
      b"while" => TokenKind::WHILE,
      _ => TokenKind::IDENTIFIER,
    }
  }
}

/// The kinds of malformed tokens the scanner can produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorTokenKind {
  /// A character that cannot start any token.
  UnexpectedChar,
  /// A string literal with no closing quote before EOF.
  UnterminatedString,
}

impl ErrorTokenKind {
  /// Converts this error token kind to its human-readable message.
  pub fn message(&self) -> &'static str {
    match self {
      ErrorTokenKind::UnexpectedChar => "Unexpected character.",
      ErrorTokenKind::UnterminatedString => "Unterminated string.",
    }
  }
}
