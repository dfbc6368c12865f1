//! devtail Logs - Session lifecycle, log files, filtering, and formatting

pub mod filter;
pub mod formatter;
pub mod session;
pub mod writer;

pub use filter::{should_exclude, ExcludeFilter};
pub use formatter::format_log_line;
pub use session::{gitignore_covers, Session, SessionManager};
pub use writer::LogFile;
