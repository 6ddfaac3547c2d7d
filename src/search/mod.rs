pub mod oracle;
pub mod harness;
pub mod report;
