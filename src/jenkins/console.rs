//! Bounding and searching console output before it is handed to the
//! assistant.

use regex::RegexBuilder;

use crate::error::{JenkinsError, Result};
use crate::summaries::{LogMatch, LogSearchResult};

/// Returns the last `n` lines of `text`. When lines were dropped the output
/// starts with a notice naming how many.
///
/// Callers skip tail mode entirely when `n == 0`.
pub fn tail_lines(text: &str, n: usize) -> String {
    let lines: Vec<&str> = text.lines().collect();
    if lines.len() <= n {
        return lines.join("\n");
    }

    let omitted = lines.len() - n;
    let mut out = format!("... [{omitted} lines omitted, showing last {n} lines] ...\n");
    out.push_str(&lines[omitted..].join("\n"));
    out
}

/// Keeps the head and tail of logs longer than `ceiling` lines and replaces
/// the middle with a single marker line.
pub fn truncate_middle(text: &str, ceiling: usize) -> String {
    let lines: Vec<&str> = text.lines().collect();
    if lines.len() <= ceiling {
        return text.to_string();
    }

    let head = ceiling / 2;
    let tail = ceiling - head;
    let omitted = lines.len() - ceiling;

    let mut kept: Vec<String> = Vec::with_capacity(ceiling + 1);
    kept.extend(lines[..head].iter().map(|l| (*l).to_string()));
    kept.push(format!("... [{omitted} lines omitted] ..."));
    kept.extend(lines[lines.len() - tail..].iter().map(|l| (*l).to_string()));
    kept.join("\n")
}

/// Case-insensitive regex search over the lines of `text`.
///
/// Every match yields one block of up to `context` lines on either side.
/// Lines already shown in a previous block are neither shown again nor
/// matched again, so blocks never overlap. The scan stops once
/// `max_matches` blocks have been produced.
///
/// # Errors
///
/// Returns `InvalidInput` when `pattern` is not a valid regular expression.
pub fn search_lines(
    text: &str,
    pattern: &str,
    context: usize,
    max_matches: usize,
) -> Result<LogSearchResult> {
    let regex = RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|_| JenkinsError::invalid_input(format!("Invalid regex pattern: {pattern}")))?;

    let lines: Vec<&str> = text.lines().collect();

    if max_matches == 0 {
        return Ok(LogSearchResult {
            pattern: pattern.to_string(),
            total_matches: 0,
            total_lines: lines.len(),
            truncated: lines.iter().any(|line| regex.is_match(line)),
            matches: Vec::new(),
        });
    }

    let mut matches = Vec::new();
    let mut truncated = false;
    // Index of the first line not yet shown in any block.
    let mut next_free = 0usize;

    for (idx, line) in lines.iter().enumerate() {
        if idx < next_free || !regex.is_match(line) {
            continue;
        }

        let start = idx.saturating_sub(context).max(next_free);
        let end = (idx + context).min(lines.len() - 1);

        let block = (start..=end)
            .map(|i| {
                let marker = if i == idx { '>' } else { ' ' };
                format!("{marker} {}: {}", i + 1, lines[i])
            })
            .collect::<Vec<_>>()
            .join("\n");

        matches.push(LogMatch {
            line_number: idx + 1,
            start_line: start + 1,
            end_line: end + 1,
            context: block,
        });
        next_free = end + 1;

        if matches.len() >= max_matches {
            truncated = true;
            break;
        }
    }

    Ok(LogSearchResult {
        pattern: pattern.to_string(),
        total_matches: matches.len(),
        total_lines: lines.len(),
        truncated,
        matches,
    })
}
