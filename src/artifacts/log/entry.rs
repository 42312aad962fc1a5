use crate::artifacts::objects::commit::Commit;
use chrono::Local;

/// Timestamp format shared with git's medium log format
pub const LOG_DATE_FORMAT: &str = "%a %b %-d %H:%M:%S %Y %z";

/// The block printed for one commit, including the trailing blank line:
///
/// ```text
/// ===
/// commit 3e8bf1d794ca2e9ef8a4007275acf3751c7170ff
/// Merge: 4975af1 2c1ead1
/// Date: Sat Nov 11 12:30:00 2017 -0800
/// Merged development into master.
///
/// ```
///
/// The `Merge:` line only appears for two-parent commits. Dates are shown in the local zone.
pub fn format_entry(commit: &Commit) -> String {
    let mut lines = vec!["===".to_string(), format!("commit {}", commit.oid())];

    if let (Some(parent), Some(secondary_parent)) = (commit.parent(), commit.secondary_parent()) {
        lines.push(format!(
            "Merge: {} {}",
            parent.to_short_oid(),
            secondary_parent.to_short_oid()
        ));
    }

    lines.push(format!(
        "Date: {}",
        commit
            .timestamp()
            .with_timezone(&Local)
            .format(LOG_DATE_FORMAT)
    ));
    lines.push(commit.message().to_string());
    lines.push(String::new());

    let mut entry = lines.join("\n");
    entry.push('\n');
    entry
}
