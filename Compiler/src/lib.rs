use core::chunk::Chunk;
use core::errors::ErrorReport;
use core::object::StringInterner;
use core::tokens::{Token, TokenKind};
use core::value::Value;
use lexer::Lexer;

use crate::precedence::{get_rule, ParseFn, Precedence};

mod expressions;
mod precedence;
mod statements;

/// Drives the scanner, emits bytecode into `chunk`, and interns string
/// literals as it goes. Returns whether compilation succeeded; on failure the
/// chunk's contents are meaningless and the caller should discard it.
pub fn compile(source: &[u8], interner: &mut StringInterner) -> Result<Chunk, Vec<ErrorReport>> {
  let mut parser = Parser::new(source, interner);

  parser.advance();
  while !parser.check(&TokenKind::EOF) {
    parser.declaration();
  }

  parser.emit_op_code(core::bytecode::OpCode::Return);

  if parser.had_error {
    Err(parser.errors)
  } else {
    Ok(parser.chunk)
  }
}

struct Parser<'a> {
  lexer: Lexer<'a>,
  source: &'a [u8],
  interner: &'a mut StringInterner,
  previous: Token,
  current: Token,
  had_error: bool,
  panic_mode: bool,
  errors: Vec<ErrorReport>,
  chunk: Chunk,
}

impl<'a> Parser<'a> {
  fn new(source: &'a [u8], interner: &'a mut StringInterner) -> Self {
    let placeholder = Token { kind: TokenKind::EOF, span: (0, 0), line: 0 };
    Parser {
      lexer: Lexer::new(source),
      source,
      interner,
      previous: placeholder.clone(),
      current: placeholder,
      had_error: false,
      panic_mode: false,
      errors: Vec::new(),
      chunk: Chunk::default(),
    }
  }

  fn lexeme(&self, tok: &Token) -> &'a [u8] {
    tok.lexeme(self.source)
  }

  fn check(&self, kind: &TokenKind) -> bool {
    &self.current.kind == kind
  }

  fn matches(&mut self, kind: &TokenKind) -> bool {
    if !self.check(kind) {
      return false;
    }
    self.advance();
    true
  }

  /// Advances to the next non-error token, reporting every error token the
  /// scanner produces along the way.
  fn advance(&mut self) {
    self.previous = self.current.clone();

    loop {
      self.current = self.lexer.scan_token();
      match &self.current.kind {
        TokenKind::ERROR(err) => {
          let message = err.message().to_string();
          self.error_at_current(&message);
        }
        _ => break,
      }
    }
  }

  /// Consumes the current token if it matches `kind`, otherwise reports `message`.
  fn consume(&mut self, kind: TokenKind, message: &str) {
    if self.check(&kind) {
      self.advance();
      return;
    }
    self.error_at_current(message);
  }

  fn error_at_current(&mut self, message: &str) {
    let tok = self.current.clone();
    self.error_at(&tok, message);
  }

  fn error_at_previous(&mut self, message: &str) {
    let tok = self.previous.clone();
    self.error_at(&tok, message);
  }

  fn error_at(&mut self, tok: &Token, message: &str) {
    if self.panic_mode {
      return;
    }
    self.panic_mode = true;
    self.had_error = true;

    let location = match &tok.kind {
      TokenKind::EOF => " at end".to_string(),
      TokenKind::ERROR(_) => String::new(),
      _ => format!(" at '{}'", String::from_utf8_lossy(self.lexeme(tok))),
    };

    self.errors.push(ErrorReport { line: tok.line, location, message: message.to_string() });
  }

  /// Discards tokens until it sees a statement boundary, ending panic mode.
  fn synchronize(&mut self) {
    self.panic_mode = false;

    while self.current.kind != TokenKind::EOF {
      if self.previous.kind == TokenKind::SEMICOLON {
        return;
      }

      match self.current.kind {
        TokenKind::CLASS
        | TokenKind::FUN
        | TokenKind::VAR
        | TokenKind::FOR
        | TokenKind::IF
        | TokenKind::WHILE
        | TokenKind::PRINT
        | TokenKind::RETURN => return,
        _ => {}
      }

      self.advance();
    }
  }

  fn emit_byte(&mut self, byte: u8) {
    let line = self.previous.line;
    self.chunk.write(byte, line);
  }

  fn emit_op_code(&mut self, op: core::bytecode::OpCode) {
    self.emit_byte(op as u8);
  }

  fn emit_two(&mut self, a: core::bytecode::OpCode, b: u8) {
    self.emit_op_code(a);
    self.emit_byte(b);
  }

  /// Stores `value` in the constant pool and returns its index, or reports an
  /// error if the one-byte operand the `Constant` opcode uses would overflow.
  fn make_constant(&mut self, value: Value) -> u8 {
    let idx = self.chunk.add_constant(value);
    if idx > u8::MAX as usize {
      self.error_at_previous("Too many constants in one chunk.");
      return 0;
    }
    idx as u8
  }

  fn emit_constant(&mut self, value: Value) {
    let idx = self.make_constant(value);
    self.emit_two(core::bytecode::OpCode::Constant, idx);
  }

  /// Parses and compiles an expression binding at least as tightly as `precedence`.
  fn parse_precedence(&mut self, precedence: Precedence) {
    self.advance();
    let prefix = get_rule(&self.previous.kind).prefix;
    if prefix == ParseFn::None {
      self.error_at_previous("Expected expression.");
      return;
    }
    self.run_parse_fn(prefix);

    while precedence <= get_rule(&self.current.kind).precedence {
      self.advance();
      let infix = get_rule(&self.previous.kind).infix;
      self.run_parse_fn(infix);
    }
  }

  fn run_parse_fn(&mut self, f: ParseFn) {
    match f {
      ParseFn::Grouping => self.grouping(),
      ParseFn::Unary => self.unary(),
      ParseFn::Binary => self.binary(),
      ParseFn::Number => self.number(),
      ParseFn::String => self.string(),
      ParseFn::Literal => self.literal(),
      ParseFn::None => unreachable!("run_parse_fn called with ParseFn::None"),
    }
  }

  fn expression(&mut self) {
    self.parse_precedence(Precedence::Assignment);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn compile_ok(src: &str) -> Chunk {
    let mut interner = StringInterner::new();
    compile(src.as_bytes(), &mut interner).expect("expected successful compile")
  }

  fn compile_err(src: &str) -> Vec<ErrorReport> {
    let mut interner = StringInterner::new();
    compile(src.as_bytes(), &mut interner).expect_err("expected a compile error")
  }

  #[test]
  fn compiles_a_print_statement_of_an_arithmetic_expression() {
    let chunk = compile_ok("print 1 + 2;");
    use core::bytecode::OpCode;
    assert_eq!(chunk.code.last().copied(), Some(OpCode::Return as u8));
    assert!(chunk.code.contains(&(OpCode::Add as u8)));
    assert!(chunk.code.contains(&(OpCode::Print as u8)));
  }

  #[test]
  fn expression_statement_emits_a_trailing_pop() {
    let chunk = compile_ok("1 + 2;");
    use core::bytecode::OpCode;
    assert!(chunk.code.contains(&(OpCode::Pop as u8)));
  }

  #[test]
  fn missing_semicolon_is_a_compile_error() {
    let errors = compile_err("print 1");
    assert!(errors[0].to_string().contains("Expect ';'"));
  }

  #[test]
  fn unexpected_token_is_reported_as_expected_expression() {
    let errors = compile_err(");");
    assert!(errors[0].message.contains("Expected expression."));
  }
}
