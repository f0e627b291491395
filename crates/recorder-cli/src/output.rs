//! Command output
//!
//! A single [`Output`] owns stdout for the whole run. The development sink
//! and the command results both write through it, so `--json` yields one
//! JSON document per line (sink calls first, then the command result) and
//! human mode never depends on the log filter.

use serde_json::{json, Value};

/// Output format selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Writer for everything the CLI prints
#[derive(Debug, Clone, Copy)]
pub struct Output {
    format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// A call that reached one of the sink ports.
    pub fn sink_call(&self, sink: &str, operation: &str, payload: &Value) {
        println!("{}", self.render_sink_call(sink, operation, payload));
    }

    /// The outcome of a command: `summary` for people, `details` for machines.
    pub fn result(&self, summary: &str, details: Value) {
        println!("{}", self.render_result(summary, details));
    }

    /// Extra lines shown in human mode only.
    pub fn note(&self, line: &str) {
        if !self.is_json() {
            println!("  {line}");
        }
    }

    /// A problem that did not abort the command; goes to stderr.
    pub fn problem(&self, message: &str) {
        if self.is_json() {
            eprintln!("{}", json!({ "type": "problem", "message": message }));
        } else {
            eprintln!("\u{2717} {message}");
        }
    }

    fn render_sink_call(&self, sink: &str, operation: &str, payload: &Value) -> String {
        match self.format {
            OutputFormat::Json => json!({
                "type": "sink",
                "sink": sink,
                "op": operation,
                "payload": payload,
            })
            .to_string(),
            OutputFormat::Human if payload.is_null() => format!("\u{2192} {sink}.{operation}"),
            OutputFormat::Human => format!("\u{2192} {sink}.{operation} {payload}"),
        }
    }

    fn render_result(&self, summary: &str, details: Value) -> String {
        match self.format {
            OutputFormat::Json => {
                let mut line = json!({ "type": "result" });
                if let (Some(line), Value::Object(details)) = (line.as_object_mut(), details) {
                    line.extend(details);
                }
                line.to_string()
            }
            OutputFormat::Human => format!("\u{2713} {summary}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_lines_are_single_line_documents() {
        let output = Output::new(OutputFormat::Json);
        let sink_line = output.render_sink_call("crash", "log", &json!({ "message": "a\nb" }));
        let result_line = output.render_result("done", json!({ "success": true, "n": 2 }));

        for line in [&sink_line, &result_line] {
            assert!(!line.contains('\n'));
            serde_json::from_str::<Value>(line).expect("valid JSON");
        }

        let result: Value = serde_json::from_str(&result_line).unwrap();
        assert_eq!(result["type"], "result");
        assert_eq!(result["n"], 2);
        let call: Value = serde_json::from_str(&sink_line).unwrap();
        assert_eq!(call["type"], "sink");
        assert_eq!(call["op"], "log");
    }

    #[test]
    fn test_human_rendering() {
        let output = Output::new(OutputFormat::Human);
        assert_eq!(
            output.render_sink_call("analytics", "reset_analytics_data", &Value::Null),
            "\u{2192} analytics.reset_analytics_data"
        );
        assert_eq!(
            output.render_result("Logged event", json!({ "ignored": true })),
            "\u{2713} Logged event"
        );
    }
}
