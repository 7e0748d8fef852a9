use core::bytecode::OpCode;
use core::tokens::TokenKind;
use core::value::Value;

use crate::precedence::Precedence;
use crate::Parser;

impl<'a> Parser<'a> {
  /// `( expr )` — parses the inner expression, emits nothing of its own.
  pub(crate) fn grouping(&mut self) {
    self.expression();
    self.consume(TokenKind::RIGHT_PAREN, "Expect ')' after expression.");
  }

  /// Prefix `-` and `!`. Parses its operand at `Unary` precedence so that
  /// e.g. `-a.b` binds tighter than `-(a + b)` would need parentheses for.
  pub(crate) fn unary(&mut self) {
    let operator = self.previous.kind.clone();
    self.parse_precedence(Precedence::Unary);

    match operator {
      TokenKind::MINUS => self.emit_op_code(OpCode::Negate),
      TokenKind::BANG => self.emit_op_code(OpCode::Not),
      _ => unreachable!("unary() called for a non-unary operator"),
    }
  }

  /// Left-associative binary operators. Parses the right operand at one
  /// precedence level higher than this operator's own, then emits the
  /// matching opcode (synthesizing `!=`/`>=`/`<=` from two instructions).
  pub(crate) fn binary(&mut self) {
    let operator = self.previous.kind.clone();
    let rule = crate::precedence::get_rule(&operator);
    self.parse_precedence(rule.precedence.next_higher());

    match operator {
      TokenKind::PLUS => self.emit_op_code(OpCode::Add),
      TokenKind::MINUS => self.emit_op_code(OpCode::Subtract),
      TokenKind::STAR => self.emit_op_code(OpCode::Multiply),
      TokenKind::SLASH => self.emit_op_code(OpCode::Divide),
      TokenKind::EQUAL_EQUAL => self.emit_op_code(OpCode::Equal),
      TokenKind::BANG_EQUAL => {
        self.emit_op_code(OpCode::Equal);
        self.emit_op_code(OpCode::Not);
      }
      TokenKind::GREATER => self.emit_op_code(OpCode::Greater),
      TokenKind::GREATER_EQUAL => {
        self.emit_op_code(OpCode::Less);
        self.emit_op_code(OpCode::Not);
      }
      TokenKind::LESS => self.emit_op_code(OpCode::Less),
      TokenKind::LESS_EQUAL => {
        self.emit_op_code(OpCode::Greater);
        self.emit_op_code(OpCode::Not);
      }
      _ => unreachable!("binary() called for a non-binary operator"),
    }
  }

  pub(crate) fn number(&mut self) {
    let lexeme = self.lexeme(&self.previous.clone());
    let text = std::str::from_utf8(lexeme).expect("number lexemes are always ASCII");
    let value: f64 = text.parse().expect("scanner only produces well-formed number lexemes");
    self.emit_constant(Value::Number(value));
  }

  /// Interns the string's contents (the lexeme with its surrounding quotes
  /// stripped) and emits it as a constant.
  pub(crate) fn string(&mut self) {
    let tok = self.previous.clone();
    let lexeme = self.lexeme(&tok);
    let bytes = &lexeme[1..lexeme.len() - 1];
    let handle = self.interner.intern_copy(bytes);
    self.emit_constant(Value::Obj(handle));
  }

  pub(crate) fn literal(&mut self) {
    match self.previous.kind {
      TokenKind::FALSE => self.emit_op_code(OpCode::False),
      TokenKind::TRUE => self.emit_op_code(OpCode::True),
      TokenKind::NIL => self.emit_op_code(OpCode::Nil),
      _ => unreachable!("literal() called for a non-literal token"),
    }
  }
}
