use core::bytecode::OpCode;
use core::errors::RuntimeError;
use core::value::Value;
use num_traits::FromPrimitive;

use crate::{InterpretResult, VM};

impl VM {
  /// The fetch-decode-dispatch loop. Runs until `Return`, a runtime error, or
  /// (in well-formed bytecode) never otherwise.
  pub(crate) fn run(&mut self) -> InterpretResult {
    loop {
      let byte = self.read_byte();
      let instruction = match OpCode::from_u8(byte) {
        Some(op) => op,
        None => unreachable!("compiler never emits a byte outside the OpCode range"),
      };

      let result = match instruction {
        OpCode::Constant => {
          let value = self.read_constant();
          self.push(value);
          Ok(())
        }
        OpCode::Nil => {
          self.push(Value::Nil);
          Ok(())
        }
        OpCode::True => {
          self.push(Value::Bool(true));
          Ok(())
        }
        OpCode::False => {
          self.push(Value::Bool(false));
          Ok(())
        }
        OpCode::Equal => {
          let b = self.pop();
          let a = self.pop();
          self.push(Value::Bool(a == b));
          Ok(())
        }
        OpCode::Greater => self.binary_op(Self::greater),
        OpCode::Less => self.binary_op(Self::less),
        OpCode::Add => {
          let b = self.pop();
          let a = self.pop();
          match self.add(a, b) {
            Ok(v) => {
              self.push(v);
              Ok(())
            }
            Err(e) => Err(e),
          }
        }
        OpCode::Subtract => self.binary_op(Self::subtract),
        OpCode::Multiply => self.binary_op(Self::multiply),
        OpCode::Divide => self.binary_op(Self::divide),
        OpCode::Not => {
          let v = self.pop();
          self.push(Value::Bool(v.is_falsey()));
          Ok(())
        }
        OpCode::Negate => {
          if !self.peek(0).is_number() {
            Err(RuntimeError::new("Operands must be numbers."))
          } else {
            let n = self.pop().as_number().unwrap();
            self.push(Value::Number(-n));
            Ok(())
          }
        }
        OpCode::Print => {
          let value = self.pop();
          println!("{}", value.display(&self.interner.heap));
          Ok(())
        }
        OpCode::Pop => {
          self.pop();
          Ok(())
        }
        OpCode::Return => return InterpretResult::Ok,
      };

      if let Err(error) = result {
        return self.runtime_error(error);
      }
    }
  }

  /// Pops `b` then `a`, applies `op(a, b)`, and pushes the result — or
  /// propagates the runtime error `op` raised, leaving the stack untouched
  /// for `runtime_error` to clear.
  fn binary_op(&mut self, op: impl Fn(&Self, Value, Value) -> Result<Value, RuntimeError>) -> Result<(), RuntimeError> {
    let b = self.pop();
    let a = self.pop();
    let value = op(self, a, b)?;
    self.push(value);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use crate::{InterpretResult, VM};

  #[test]
  fn comparison_chain_evaluates_left_to_right() {
    let mut vm = VM::new();
    assert_eq!(vm.interpret(b"print 1 < 2 == true;"), InterpretResult::Ok);
  }

  #[test]
  fn negating_a_non_number_is_a_runtime_error() {
    let mut vm = VM::new();
    assert_eq!(vm.interpret(b"print -\"a\";"), InterpretResult::RuntimeError);
  }

  #[test]
  fn not_operator_applies_truthiness() {
    let mut vm = VM::new();
    assert_eq!(vm.interpret(b"print !nil;"), InterpretResult::Ok);
  }
}
