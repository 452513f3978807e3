//! Result and error output
//!
//! - Results: pretty JSON on stdout, nothing for an empty (`null`) result
//! - Errors: `<CODE>: <message>` on stderr

use std::io::{self, Write};

use serde_json::Value;

use super::errors::{CliError, CliResult};

/// Write a command result
pub fn write_result<W: Write>(out: &mut W, result: &Value) -> CliResult<()> {
    if result.is_null() {
        return Ok(());
    }
    serde_json::to_writer_pretty(&mut *out, result)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

/// Write an error to stderr
pub fn write_error(err: &CliError) {
    let mut stderr = io::stderr();
    let _ = writeln!(stderr, "{}", err);
    let _ = stderr.flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_result_pretty() {
        let mut out = Vec::new();
        write_result(&mut out, &json!({"state": "Ready"})).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "{\n  \"state\": \"Ready\"\n}\n");
    }

    #[test]
    fn test_null_result_prints_nothing() {
        let mut out = Vec::new();
        write_result(&mut out, &Value::Null).unwrap();
        assert!(out.is_empty());
    }
}
