use std::fmt::{self, Display, Formatter};

use crate::object::{Heap, ObjHandle};

/// The four runtime value kinds a Hinton program can produce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
  Nil,
  Bool(bool),
  Number(f64),
  /// A handle into the owning VM's heap arena. Currently only strings live there.
  Obj(ObjHandle),
}

impl Value {
  /// Hinton's truthiness rule: `Nil` and `Bool(false)` are falsey, everything else is truthy.
  pub fn is_falsey(&self) -> bool {
    matches!(self, Value::Nil | Value::Bool(false))
  }

  pub fn is_number(&self) -> bool {
    matches!(self, Value::Number(_))
  }

  pub fn as_number(&self) -> Option<f64> {
    match self {
      Value::Number(n) => Some(*n),
      _ => None,
    }
  }

  pub fn is_string(&self, heap: &Heap) -> bool {
    matches!(self, Value::Obj(h) if heap.is_string(*h))
  }

  /// Renders this value the way `print` does, using `heap` to resolve any
  /// object handle into its string bytes.
  pub fn display(&self, heap: &Heap) -> String {
    match self {
      Value::Nil => "nil".to_string(),
      Value::Bool(b) => b.to_string(),
      Value::Number(n) => format_number(*n),
      Value::Obj(h) => String::from_utf8_lossy(heap.string_bytes(*h)).into_owned(),
    }
  }
}

/// Formats a number the way C's `%g` would: integral values print with no
/// trailing `.0`, everything else uses the shortest round-tripping decimal.
pub fn format_number(n: f64) -> String {
  if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
    format!("{n:.0}")
  } else {
    format!("{n}")
  }
}

impl Display for Value {
  /// A heap-agnostic rendering used by diagnostics that don't have a `Heap` handy
  /// (e.g. debug output); object values render as `<obj>` rather than their bytes.
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      Value::Nil => write!(f, "nil"),
      Value::Bool(b) => write!(f, "{b}"),
      Value::Number(n) => write!(f, "{}", format_number(*n)),
      Value::Obj(_) => write!(f, "<obj>"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn falsey_values() {
    assert!(Value::Nil.is_falsey());
    assert!(Value::Bool(false).is_falsey());
    assert!(!Value::Bool(true).is_falsey());
    assert!(!Value::Number(0.0).is_falsey());
  }

  #[test]
  fn integral_numbers_print_without_a_decimal_point() {
    assert_eq!(format_number(7.0), "7");
    assert_eq!(format_number(-3.0), "-3");
  }

  #[test]
  fn fractional_numbers_print_their_digits() {
    assert_eq!(format_number(0.5), "0.5");
  }
}
