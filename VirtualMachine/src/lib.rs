use core::chunk::Chunk;
use core::errors::RuntimeError;
use core::object::StringInterner;
use core::value::Value;
use core::STACK_MAX;

mod arithmetic;
mod run;

/// The outcome of a single `interpret` call, mirroring the driver's exit codes.
#[derive(Debug, PartialEq)]
pub enum InterpretResult {
  Ok,
  CompileError,
  RuntimeError,
}

/// A stack machine that owns its chunk, heap arena and string-intern table for
/// its entire lifetime. Dropping a `VM` releases every heap object and
/// intern-table entry it holds, the equivalent of the reference design's
/// explicit `free_vm`.
pub struct VM {
  chunk: Chunk,
  /// Byte offset of the next instruction to execute.
  ip: usize,
  stack: Vec<Value>,
  interner: StringInterner,
}

impl Default for VM {
  fn default() -> Self {
    VM { chunk: Chunk::default(), ip: 0, stack: Vec::with_capacity(STACK_MAX), interner: StringInterner::new() }
  }
}

impl VM {
  pub fn new() -> Self {
    Self::default()
  }

  /// Compiles and runs `source` as a single unit of work. Heap objects and
  /// interned strings from prior calls on this VM remain live and visible.
  pub fn interpret(&mut self, source: &[u8]) -> InterpretResult {
    let chunk = match compiler::compile(source, &mut self.interner) {
      Ok(chunk) => chunk,
      Err(errors) => {
        for error in &errors {
          eprintln!("{error}");
        }
        return InterpretResult::CompileError;
      }
    };

    self.chunk = chunk;
    self.ip = 0;
    self.run()
  }

  fn push(&mut self, value: Value) {
    self.stack.push(value);
  }

  fn pop(&mut self) -> Value {
    self.stack.pop().expect("compiler output must keep the stack balanced")
  }

  fn peek(&self, distance: usize) -> &Value {
    &self.stack[self.stack.len() - 1 - distance]
  }

  fn read_byte(&mut self) -> u8 {
    let byte = self.chunk.code[self.ip];
    self.ip += 1;
    byte
  }

  fn read_constant(&mut self) -> Value {
    let idx = self.read_byte() as usize;
    self.chunk.constants[idx]
  }

  /// Prints the two-line runtime diagnostic, pointing at the instruction that
  /// was about to execute when the error was raised, then empties the stack.
  fn runtime_error(&mut self, error: RuntimeError) -> InterpretResult {
    let line = self.chunk.line_at(self.ip - 1);
    eprintln!("{}", error.report(line));
    self.stack.clear();
    InterpretResult::RuntimeError
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn interprets_an_arithmetic_print_statement() {
    let mut vm = VM::new();
    assert_eq!(vm.interpret(b"print 1 + 2;"), InterpretResult::Ok);
  }

  #[test]
  fn reports_a_compile_error_without_crashing() {
    let mut vm = VM::new();
    assert_eq!(vm.interpret(b"print 1"), InterpretResult::CompileError);
  }

  #[test]
  fn reports_a_runtime_type_error_and_resets_the_stack() {
    let mut vm = VM::new();
    assert_eq!(vm.interpret(b"print 1 + \"a\";"), InterpretResult::RuntimeError);
    assert!(vm.stack.is_empty());
  }

  #[test]
  fn strings_persist_across_interpret_calls_on_the_same_vm() {
    let mut vm = VM::new();
    assert_eq!(vm.interpret(b"print \"hi\";"), InterpretResult::Ok);
    assert_eq!(vm.interpret(b"print \"hi\" == \"hi\";"), InterpretResult::Ok);
  }
}
