use core::tokens::TokenKind;

/// Precedence levels, lowest to highest. `parse_precedence` treats these as
/// plain integers via `as u8`, so the declaration order is load-bearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Precedence {
  None,
  Assignment,
  Or,
  And,
  Equality,
  Comparison,
  Term,
  Factor,
  Unary,
  Call,
  Primary,
}

impl Precedence {
  /// The precedence one level higher than this one, used to parse the
  /// right-hand operand of a left-associative binary operator.
  pub fn next_higher(self) -> Precedence {
    match self {
      Precedence::None => Precedence::Assignment,
      Precedence::Assignment => Precedence::Or,
      Precedence::Or => Precedence::And,
      Precedence::And => Precedence::Equality,
      Precedence::Equality => Precedence::Comparison,
      Precedence::Comparison => Precedence::Term,
      Precedence::Term => Precedence::Factor,
      Precedence::Factor => Precedence::Unary,
      Precedence::Unary => Precedence::Call,
      Precedence::Call => Precedence::Primary,
      Precedence::Primary => Precedence::Primary,
    }
  }
}

/// Identifies a parsing function without needing a first-class function
/// pointer; `parse_precedence` dispatches on this through a single `match`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFn {
  Grouping,
  Unary,
  Binary,
  Number,
  String,
  Literal,
  None,
}

/// The parsing properties associated with a token kind: what to do if it
/// starts an expression, what to do if it appears in infix position, and at
/// what precedence it binds.
pub struct ParseRule {
  pub prefix: ParseFn,
  pub infix: ParseFn,
  pub precedence: Precedence,
}

pub fn get_rule(kind: &TokenKind) -> ParseRule {
  use TokenKind::*;
  match kind {
    LEFT_PAREN => ParseRule { prefix: ParseFn::Grouping, infix: ParseFn::None, precedence: Precedence::None },
    MINUS => ParseRule { prefix: ParseFn::Unary, infix: ParseFn::Binary, precedence: Precedence::Term },
    PLUS => ParseRule { prefix: ParseFn::None, infix: ParseFn::Binary, precedence: Precedence::Term },
    SLASH => ParseRule { prefix: ParseFn::None, infix: ParseFn::Binary, precedence: Precedence::Factor },
    STAR => ParseRule { prefix: ParseFn::None, infix: ParseFn::Binary, precedence: Precedence::Factor },
    BANG => ParseRule { prefix: ParseFn::Unary, infix: ParseFn::None, precedence: Precedence::None },
    BANG_EQUAL => ParseRule { prefix: ParseFn::None, infix: ParseFn::Binary, precedence: Precedence::Equality },
    EQUAL_EQUAL => ParseRule { prefix: ParseFn::None, infix: ParseFn::Binary, precedence: Precedence::Equality },
    GREATER => ParseRule { prefix: ParseFn::None, infix: ParseFn::Binary, precedence: Precedence::Comparison },
    GREATER_EQUAL => ParseRule { prefix: ParseFn::None, infix: ParseFn::Binary, precedence: Precedence::Comparison },
    LESS => ParseRule { prefix: ParseFn::None, infix: ParseFn::Binary, precedence: Precedence::Comparison },
    LESS_EQUAL => ParseRule { prefix: ParseFn::None, infix: ParseFn::Binary, precedence: Precedence::Comparison },
    NUMBER => ParseRule { prefix: ParseFn::Number, infix: ParseFn::None, precedence: Precedence::None },
    STRING => ParseRule { prefix: ParseFn::String, infix: ParseFn::None, precedence: Precedence::None },
    FALSE | TRUE | NIL => ParseRule { prefix: ParseFn::Literal, infix: ParseFn::None, precedence: Precedence::None },

    // The rest of the tokens do not have a parse rule.
    _ => ParseRule { prefix: ParseFn::None, infix: ParseFn::None, precedence: Precedence::None },
  }
}
