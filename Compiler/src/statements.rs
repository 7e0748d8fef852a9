use core::bytecode::OpCode;
use core::tokens::TokenKind;

use crate::Parser;

impl<'a> Parser<'a> {
  /// A declaration is just a statement for this grammar — there are no
  /// variable or function declarations yet — but the entry point is kept
  /// separate from `statement` to mirror where they'd be added.
  pub(crate) fn declaration(&mut self) {
    self.statement();

    if self.panic_mode {
      self.synchronize();
    }
  }

  pub(crate) fn statement(&mut self) {
    if self.matches(&TokenKind::PRINT) {
      self.print_statement();
    } else {
      self.expression_statement();
    }
  }

  fn print_statement(&mut self) {
    self.expression();
    self.consume(TokenKind::SEMICOLON, "Expect ';' after value.");
    self.emit_op_code(OpCode::Print);
  }

  fn expression_statement(&mut self) {
    self.expression();
    self.consume(TokenKind::SEMICOLON, "Expect ';' after expression.");
    self.emit_op_code(OpCode::Pop);
  }
}
