mod report;
mod sink;

pub use report::build_report;
pub use sink::{email_body, email_subject, persist_report, stdout_view};
