//! Canonical on-disk rendering of structured log entries

use devtail_core::LogEntry;

/// Render one entry as a log line:
/// `[HH:MM:SS.mmm] [LEVEL  ] message (url)` plus the stack, if any, indented
/// by four spaces on every line. Levels shorter than 7 characters are padded;
/// longer ones are left as-is.
pub fn format_log_line(entry: &LogEntry) -> String {
    let level = format!("{:<7}", entry.level.to_uppercase());
    let message = entry.args.join(" ");
    let location = entry
        .url
        .as_deref()
        .map(|u| format!(" ({u})"))
        .unwrap_or_default();
    let stack = entry
        .stack
        .as_deref()
        .map(|s| {
            let indented: Vec<&str> = s
                .split('\n')
                .map(|l| l.strip_suffix('\r').unwrap_or(l))
                .collect();
            format!("\n    {}", indented.join("\n    "))
        })
        .unwrap_or_default();
    format!("[{}] [{}] {}{}{}\n", entry.timestamp, level, message, location, stack)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(level: &str, args: &[&str], timestamp: &str) -> LogEntry {
        LogEntry {
            level: level.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
            timestamp: timestamp.to_string(),
            url: None,
            stack: None,
        }
    }

    #[test]
    fn test_basic_line() {
        let e = entry("log", &["hello", "world"], "10:30:00.123");
        assert_eq!(format_log_line(&e), "[10:30:00.123] [LOG    ] hello world\n");
    }

    #[test]
    fn test_level_uppercased_and_padded() {
        let e = entry("warn", &["careful"], "09:00:00.000");
        assert_eq!(format_log_line(&e), "[09:00:00.000] [WARN   ] careful\n");
    }

    #[test]
    fn test_long_level_not_truncated() {
        let e = entry("uncaught_error", &["boom"], "12:00:00.001");
        assert_eq!(
            format_log_line(&e),
            "[12:00:00.001] [UNCAUGHT_ERROR] boom\n"
        );
    }

    #[test]
    fn test_url_suffix() {
        let mut e = entry("error", &["failed"], "11:11:11.111");
        e.url = Some("http://localhost:3000/app.js:10:5".to_string());
        assert_eq!(
            format_log_line(&e),
            "[11:11:11.111] [ERROR  ] failed (http://localhost:3000/app.js:10:5)\n"
        );
    }

    #[test]
    fn test_stack_indented() {
        let mut e = entry("error", &["boom"], "11:11:11.111");
        e.stack = Some("Error: boom\n  at fn (app.js:1:1)".to_string());
        assert_eq!(
            format_log_line(&e),
            "[11:11:11.111] [ERROR  ] boom\n    Error: boom\n      at fn (app.js:1:1)\n"
        );
    }

    #[test]
    fn test_stack_with_crlf() {
        let mut e = entry("error", &["x"], "00:00:00.000");
        e.stack = Some("line1\r\nline2".to_string());
        assert_eq!(
            format_log_line(&e),
            "[00:00:00.000] [ERROR  ] x\n    line1\n    line2\n"
        );
    }

    #[test]
    fn test_empty_args() {
        let e = entry("log", &[], "10:00:00.000");
        assert_eq!(format_log_line(&e), "[10:00:00.000] [LOG    ] \n");
    }
}
