use core::errors::RuntimeError;
use core::value::Value;

use crate::VM;

impl VM {
  /// `a + b`: numeric addition, or string concatenation when both operands
  /// are strings. Allocates a fresh buffer for the concatenation and interns
  /// it, so repeated identical concatenations still collapse to one object.
  pub(crate) fn add(&mut self, a: Value, b: Value) -> Result<Value, RuntimeError> {
    match (a, b) {
      (Value::Number(x), Value::Number(y)) => Ok(Value::Number(x + y)),
      (Value::Obj(_), Value::Obj(_)) if a.is_string(&self.interner.heap) && b.is_string(&self.interner.heap) => {
        let mut bytes = self.interner.heap.string_bytes(unwrap_obj(a)).to_vec();
        bytes.extend_from_slice(self.interner.heap.string_bytes(unwrap_obj(b)));
        let handle = self.interner.intern_owned(bytes);
        Ok(Value::Obj(handle))
      }
      _ => Err(RuntimeError::new("Operands must be two numbers or two strings.")),
    }
  }

  pub(crate) fn subtract(&self, a: Value, b: Value) -> Result<Value, RuntimeError> {
    self.numeric_binop(a, b, |x, y| x - y)
  }

  pub(crate) fn multiply(&self, a: Value, b: Value) -> Result<Value, RuntimeError> {
    self.numeric_binop(a, b, |x, y| x * y)
  }

  pub(crate) fn divide(&self, a: Value, b: Value) -> Result<Value, RuntimeError> {
    self.numeric_binop(a, b, |x, y| x / y)
  }

  pub(crate) fn greater(&self, a: Value, b: Value) -> Result<Value, RuntimeError> {
    self.numeric_cmp(a, b, |x, y| x > y)
  }

  pub(crate) fn less(&self, a: Value, b: Value) -> Result<Value, RuntimeError> {
    self.numeric_cmp(a, b, |x, y| x < y)
  }

  fn numeric_binop(&self, a: Value, b: Value, op: impl Fn(f64, f64) -> f64) -> Result<Value, RuntimeError> {
    match (a.as_number(), b.as_number()) {
      (Some(x), Some(y)) => Ok(Value::Number(op(x, y))),
      _ => Err(RuntimeError::new("Operands must be numbers.")),
    }
  }

  fn numeric_cmp(&self, a: Value, b: Value, op: impl Fn(f64, f64) -> bool) -> Result<Value, RuntimeError> {
    match (a.as_number(), b.as_number()) {
      (Some(x), Some(y)) => Ok(Value::Bool(op(x, y))),
      _ => Err(RuntimeError::new("Operands must be numbers.")),
    }
  }
}

fn unwrap_obj(v: Value) -> core::object::ObjHandle {
  match v {
    Value::Obj(h) => h,
    _ => unreachable!("unwrap_obj called on a non-Obj value"),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn adding_two_numbers() {
    let vm = VM::new();
    assert_eq!(vm.subtract(Value::Number(5.0), Value::Number(2.0)), Ok(Value::Number(3.0)));
  }

  #[test]
  fn numeric_op_on_non_numbers_is_a_runtime_error() {
    let vm = VM::new();
    assert!(vm.multiply(Value::Nil, Value::Number(2.0)).is_err());
  }

  #[test]
  fn concatenating_strings_interns_the_result() {
    let mut vm = VM::new();
    let a = Value::Obj(vm.interner.intern_copy(b"foo"));
    let b = Value::Obj(vm.interner.intern_copy(b"bar"));
    let result = vm.add(a, b).unwrap();
    match result {
      Value::Obj(h) => assert_eq!(vm.interner.heap.string_bytes(h), b"foobar"),
      _ => panic!("expected a string"),
    }
  }
}
