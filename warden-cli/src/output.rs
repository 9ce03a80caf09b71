//! Output formatting
//!
//! Shared printing for the check and fetch commands.

use anyhow::Result;
use colored::*;
use warden_core::domain::LogRecord;
use warden_core::parse_log;

/// Validate `content`, print the outcome and fail when invalid
pub fn report(content: &str, json: bool) -> Result<()> {
    let record = match parse_log(content) {
        Ok(record) => record,
        Err(err) => {
            if json {
                println!(
                    "{}",
                    serde_json::json!({ "valid": false, "field": err.field(), "reason": err.to_string() })
                );
            } else {
                println!("{} {}", "✗".red(), err.to_string().red());
            }
            anyhow::bail!("log failed validation");
        }
    };

    if json {
        println!(
            "{}",
            serde_json::json!({ "valid": true, "record": record })
        );
    } else {
        print_record(&record);
    }

    Ok(())
}

fn print_record(record: &LogRecord) {
    println!("{} {}", "✓".green(), "Log valid".green().bold());
    println!("    Recorded at:     {}", record.recorded_at.to_string().dimmed());
    println!("    CPU usage:       {}%", record.cpu_percent);
    println!("    Max memory:      {} KB", record.max_memory_kb);
    println!("    Execution time:  {} s", record.execution_secs);
    println!("    Exit code:       {}", record.exit_code.to_string().green());
}
