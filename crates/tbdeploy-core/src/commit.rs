//! Extraction of task references from `git log` output.
//!
//! The log is requested with a sentinel line after every commit, so the raw
//! text can be split back into one block per commit. Each block is scanned for
//! task markers of the form `tb #1234` (any case, spaces or tabs optional
//! before the `#`).

use crate::TaskId;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Sentinel written after every commit in the log output.
pub const DELIMITER: &str = "------[teambox integration delimiter]------";

fn task_marker() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| Regex::new(r"(?i)\btb[ \t]*#([0-9]+)").expect("task marker pattern is valid"))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedLog {
    /// Referenced task ids in log order, repeats included.
    pub task_ids: Vec<TaskId>,
    /// Subject lines of commits that reference no task.
    pub untasked: Vec<String>,
}

impl ParsedLog {
    /// Drop repeated task ids, keeping the first occurrence of each.
    pub fn dedupe(&mut self) {
        let mut seen = HashSet::new();
        self.task_ids.retain(|id| seen.insert(*id));
    }

    pub fn is_empty(&self) -> bool {
        self.task_ids.is_empty() && self.untasked.is_empty()
    }
}

/// Every task id referenced in `text`, in order of appearance.
pub fn extract_task_ids(text: &str) -> Vec<TaskId> {
    task_marker()
        .captures_iter(text)
        .filter_map(|caps| match caps[1].parse::<TaskId>() {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!("Ignoring task reference {}: {}", &caps[1], e);
                None
            }
        })
        .collect()
}

/// First non-blank line of a commit block, trimmed.
pub fn subject_line(block: &str) -> Option<&str> {
    block.lines().map(str::trim).find(|line| !line.is_empty())
}

/// Split raw log text on `delimiter` and sort each commit into either task
/// references or untasked subjects.
pub fn parse_log(text: &str, delimiter: &str) -> ParsedLog {
    let mut parsed = ParsedLog::default();

    for block in text.split(delimiter) {
        let ids = extract_task_ids(block);

        if ids.is_empty() {
            if let Some(subject) = subject_line(block) {
                tracing::debug!("Untasked commit: {}", subject);
                parsed.untasked.push(subject.to_string());
            }
            continue;
        }

        tracing::debug!("Commit references tasks {:?}", ids);
        parsed.task_ids.extend(ids);
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_markers_case_insensitively() {
        assert_eq!(extract_task_ids("tb #1 TB#2 Tb  #3 tB\t#4"), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_marker_stays_on_one_line() {
        assert!(extract_task_ids("tb\n\n#5").is_empty());
        assert!(extract_task_ids("tb # 5").is_empty());
        assert_eq!(extract_task_ids("see tb #5\n#6"), vec![5]);
    }

    #[test]
    fn test_marker_must_start_a_word() {
        assert!(extract_task_ids("stb #12 and #13").is_empty());
        assert_eq!(extract_task_ids("(tb #12)"), vec![12]);
    }

    #[test]
    fn test_overflowing_reference_is_skipped() {
        assert_eq!(
            extract_task_ids("tb #99999999999999999999999 tb #5"),
            vec![5]
        );
    }

    #[test]
    fn test_parse_mixed_log() {
        let text = format!(
            "tb #100\ntb#200\n{d}\nNo task here\n{d}\nTB #300 extra",
            d = DELIMITER
        );
        let parsed = parse_log(&text, DELIMITER);

        assert_eq!(parsed.task_ids, vec![100, 200, 300]);
        assert_eq!(parsed.untasked, vec!["No task here".to_string()]);
    }

    #[test]
    fn test_untasked_subject_is_first_non_blank_line() {
        let text = format!(
            "\n\n   Angelo: Some very informative subject line (`1c0e472`)  \n\nMore details\n{}\n",
            DELIMITER
        );
        let parsed = parse_log(&text, DELIMITER);

        assert!(parsed.task_ids.is_empty());
        assert_eq!(
            parsed.untasked,
            vec!["Angelo: Some very informative subject line (`1c0e472`)".to_string()]
        );
    }

    #[test]
    fn test_blank_blocks_are_ignored() {
        let text = format!("{d}\n\n{d}   \n", d = DELIMITER);
        assert!(parse_log(&text, DELIMITER).is_empty());
        assert!(parse_log("", DELIMITER).is_empty());
    }

    #[test]
    fn test_dedupe_keeps_first_occurrence() {
        let mut parsed = ParsedLog {
            task_ids: vec![3, 1, 3, 2, 1],
            untasked: vec![],
        };
        parsed.dedupe();
        assert_eq!(parsed.task_ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_sample_commit() {
        let commit = "Angelo DiNardi: Some very informative subject line (`1c0e472`)\n\n\
                      More interesting details down in the body of the commit\n\n\
                      tb #237095\n\
                      tb #237099\n\n\
                      Change-Id: I82a75a7aafc85673e9245428f38709dcd9c46d4b\n";
        let parsed = parse_log(&format!("{}{}\n", commit, DELIMITER), DELIMITER);

        assert_eq!(parsed.task_ids, vec![237095, 237099]);
        assert!(parsed.untasked.is_empty());
    }
}
