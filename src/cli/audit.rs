//! Audit log CLI command

use crate::audit::AuditLogger;
use crate::config::ReconPaths;
use crate::error::ReconResult;

/// Handle `budget-recon audit`: print the most recent store writes
pub fn handle_audit_command(paths: &ReconPaths, count: usize, json: bool) -> ReconResult<()> {
    let logger = AuditLogger::new(paths.audit_log());
    let entries = logger.read_recent(count)?;

    if entries.is_empty() {
        println!("No store writes recorded yet.");
        return Ok(());
    }

    for entry in &entries {
        if json {
            println!("{}", serde_json::to_string(entry)?);
        } else {
            println!("{}", entry.format_human_readable());
        }
    }

    Ok(())
}
