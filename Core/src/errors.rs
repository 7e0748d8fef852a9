use std::fmt;

/// A single compile-time diagnostic, produced by `error_at_token` during
/// parsing. Formats itself as `[line N] Error <where>: <message>`, matching
/// the reference design's diagnostic shape with no ANSI color codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
  pub line: usize,
  /// Where the error occurred: the token's lexeme (quoted), or `" at end"`
  /// for the EOF token, or empty for a scanner error with no useful lexeme.
  pub location: String,
  pub message: String,
}

impl fmt::Display for ErrorReport {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "[line {}] Error{}: {}", self.line, self.location, self.message)
  }
}

/// The kind of runtime failure the VM encountered, carrying the message that
/// becomes the first line of the diagnostic; the second line (`[line N] in
/// script`) is added by the caller, which knows the failing instruction's line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeError {
  pub message: String,
}

impl RuntimeError {
  pub fn new(message: impl Into<String>) -> Self {
    RuntimeError { message: message.into() }
  }

  /// Renders the two-line diagnostic the VM prints to stderr on failure.
  pub fn report(&self, line: usize) -> String {
    format!("{}\n[line {line}] in script", self.message)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn error_report_formats_with_a_lexeme_location() {
    let report = ErrorReport { line: 3, location: " at ';'".to_string(), message: "Expected expression.".to_string() };
    assert_eq!(report.to_string(), "[line 3] Error at ';': Expected expression.");
  }

  #[test]
  fn error_report_formats_at_end() {
    let report = ErrorReport { line: 3, location: " at end".to_string(), message: "Expect ';' after value.".to_string() };
    assert_eq!(report.to_string(), "[line 3] Error at end: Expect ';' after value.");
  }

  #[test]
  fn runtime_error_reports_two_lines() {
    let err = RuntimeError::new("Operands must be numbers.");
    assert_eq!(err.report(5), "Operands must be numbers.\n[line 5] in script");
  }
}
