//! Line scanner for schedulable constructs
//!
//! This is a heuristic text scan, not a parser.  Each physical line is matched
//! against the handful of recognized registration patterns; everything else is
//! silently ignored.  Registration bodies are delimited by a signed
//! brace/paren depth counter, bounded by the end of the source so unbalanced
//! delimiters can never cause unbounded scanning.

use crate::queue::QueueClass;

/// A parsed occurrence of synchronous or deferred work, before step emission.
#[derive(Debug, Clone)]
pub(crate) struct ScheduledUnit {
    /// Identity shared by every step later emitted for this unit.
    pub unit: u32,
    /// Literal or reconstructed call text, for display.
    pub code: String,
    /// Short description derived from the unit's output.
    pub label: String,
    pub queue_class: QueueClass,
    /// 1-based line number of the construct in the source text.
    pub source_line: usize,
    /// What the unit would print, if anything.
    pub output: Option<String>,
    /// Units discovered lexically inside this unit's body, in order.
    pub nested: Vec<ScheduledUnit>,
}

/// Scan source text into scheduled units, in source order.
pub(crate) fn scan_units(source: &str) -> Vec<ScheduledUnit> {
    let lines: Vec<&str> = source.lines().collect();
    let mut units = Vec::new();
    let mut next_unit: u32 = 0;

    // First line index not yet claimed by a registration's body block.
    let mut skip_until = 0;

    for (i, raw) in lines.iter().enumerate() {
        if i < skip_until {
            continue;
        }
        let line = raw.trim();
        let line_no = i + 1;

        // Synchronous console.log at the top level (column 0, not inside a
        // callback body).
        if line.starts_with("console.log(") && indent_of(raw) == 0 {
            let output = extract_log_text(line);
            units.push(ScheduledUnit {
                unit: take_id(&mut next_unit),
                code: line.to_string(),
                label: short_label(&output),
                queue_class: QueueClass::CallStack,
                source_line: line_no,
                output: Some(output),
                nested: Vec::new(),
            });
            continue;
        }

        if line.starts_with("setTimeout(") {
            let end = block_end(&lines, i);
            let logs = logs_in_range(&lines, i, end);
            let nested = nested_continuations(&lines, i, end, &mut next_unit);

            let first_output = logs.first().map(|(_, text)| text.clone());
            let label = first_output
                .as_deref()
                .map(short_label)
                .unwrap_or_else(|| QueueClass::Macrotask.fallback_label().to_string());

            // When the body registers no continuations of its own, extra
            // output lines beyond the first become synchronous children so
            // they still print during the macrotask's turn.
            let children = if nested.is_empty() {
                logs.iter()
                    .skip(1)
                    .map(|(log_line, text)| ScheduledUnit {
                        unit: take_id(&mut next_unit),
                        code: "console.log(...)".to_string(),
                        label: short_label(text),
                        queue_class: QueueClass::CallStack,
                        source_line: *log_line,
                        output: Some(text.clone()),
                        nested: Vec::new(),
                    })
                    .collect()
            } else {
                nested
            };

            units.push(ScheduledUnit {
                unit: take_id(&mut next_unit),
                code: "setTimeout(() => { ... }, 0)".to_string(),
                label,
                queue_class: QueueClass::Macrotask,
                source_line: line_no,
                output: first_output,
                nested: children,
            });
            skip_until = end + 1;
            continue;
        }

        if line.starts_with("Promise.resolve()") {
            let end = block_end(&lines, i);
            // Each chained .then with an output line becomes its own
            // successively ordered microtask unit.
            for (log_line, text) in logs_in_range(&lines, i, end) {
                units.push(ScheduledUnit {
                    unit: take_id(&mut next_unit),
                    code: ".then(() => { console.log(...) })".to_string(),
                    label: short_label(&text),
                    queue_class: QueueClass::Microtask,
                    source_line: log_line,
                    output: Some(text),
                    nested: Vec::new(),
                });
            }
            skip_until = end + 1;
            continue;
        }

        if line.starts_with("queueMicrotask(") {
            let end = block_end(&lines, i);
            units.push(single_callback_unit(
                take_id(&mut next_unit),
                "queueMicrotask(() => { ... })",
                QueueClass::Microtask,
                line_no,
                logs_in_range(&lines, i, end),
            ));
            skip_until = end + 1;
            continue;
        }

        if line.starts_with("requestAnimationFrame(") {
            let end = block_end(&lines, i);
            units.push(single_callback_unit(
                take_id(&mut next_unit),
                "requestAnimationFrame(() => { ... })",
                QueueClass::AnimationFrame,
                line_no,
                logs_in_range(&lines, i, end),
            ));
            skip_until = end + 1;
            continue;
        }

        if line.starts_with("requestIdleCallback(") {
            let end = block_end(&lines, i);
            units.push(single_callback_unit(
                take_id(&mut next_unit),
                "requestIdleCallback(() => { ... })",
                QueueClass::Idle,
                line_no,
                logs_in_range(&lines, i, end),
            ));
            skip_until = end + 1;
        }
    }

    units
}

fn take_id(next: &mut u32) -> u32 {
    let id = *next;
    *next += 1;
    id
}

/// Build a unit for registrations that take a single callback and keep only
/// the first output line found in the body.
fn single_callback_unit(
    unit: u32,
    code: &str,
    queue_class: QueueClass,
    source_line: usize,
    logs: Vec<(usize, String)>,
) -> ScheduledUnit {
    let output = logs.into_iter().next().map(|(_, text)| text);
    let label = output
        .as_deref()
        .map(short_label)
        .unwrap_or_else(|| queue_class.fallback_label().to_string());
    ScheduledUnit {
        unit,
        code: code.to_string(),
        label,
        queue_class,
        source_line,
        output,
        nested: Vec::new(),
    }
}

fn indent_of(raw: &str) -> usize {
    raw.len() - raw.trim_start().len()
}

/// Find the inclusive last line index of the block starting at `start`.
///
/// Tracks a signed depth over braces and parens; the block ends on the line
/// where depth returns to zero or below after having gone positive.  If the
/// closing delimiter never appears the block is clamped to the last line.
pub(crate) fn block_end(lines: &[&str], start: usize) -> usize {
    let mut depth: i32 = 0;
    let mut opened = false;

    for (j, line) in lines.iter().enumerate().skip(start) {
        for ch in line.chars() {
            match ch {
                '{' | '(' => {
                    depth += 1;
                    opened = true;
                }
                '}' | ')' => depth -= 1,
                _ => {}
            }
        }
        if opened && depth <= 0 {
            return j;
        }
    }

    lines.len().saturating_sub(1)
}

/// Collect `(line_number, output_text)` for every logging call between
/// `start` and `end` inclusive.  Line numbers are 1-based.
fn logs_in_range(lines: &[&str], start: usize, end: usize) -> Vec<(usize, String)> {
    let mut logs = Vec::new();
    for (j, line) in lines.iter().enumerate().skip(start) {
        if j > end {
            break;
        }
        let trimmed = line.trim();
        if trimmed.starts_with("console.log(") {
            logs.push((j + 1, extract_log_text(trimmed)));
        }
    }
    logs
}

/// Find immediate continuations registered inside a macrotask body; each
/// output line of a continuation chain becomes its own nested microtask unit.
fn nested_continuations(
    lines: &[&str],
    start: usize,
    end: usize,
    next_unit: &mut u32,
) -> Vec<ScheduledUnit> {
    let mut nested = Vec::new();
    for j in (start + 1)..=end.min(lines.len().saturating_sub(1)) {
        let trimmed = lines[j].trim();
        if trimmed.starts_with("Promise.resolve()") {
            let inner_end = block_end(lines, j);
            for (log_line, text) in logs_in_range(lines, j, inner_end) {
                nested.push(ScheduledUnit {
                    unit: take_id(next_unit),
                    code: ".then(() => { console.log(...) })".to_string(),
                    label: short_label(&text),
                    queue_class: QueueClass::Microtask,
                    source_line: log_line,
                    output: Some(text),
                    nested: Vec::new(),
                });
            }
        }
    }
    nested
}

/// Extract the first quoted string argument of a logging call.
///
/// Accepts single, double, or backtick quotes.  Falls back to a generic
/// `"output"` when the argument is not a recognizable literal.
pub(crate) fn extract_log_text(line: &str) -> String {
    let args = match line.find("console.log(") {
        Some(pos) => &line[pos + "console.log(".len()..],
        None => return "output".to_string(),
    };

    for (open, ch) in args.char_indices() {
        if ch == '"' || ch == '\'' || ch == '`' {
            let rest = &args[open + ch.len_utf8()..];
            if let Some(close) = rest.find(ch) {
                return rest[..close].to_string();
            }
            break;
        }
    }
    "output".to_string()
}

/// Derive a short display label: the trailing segment after the last `" - "`
/// separator, trimmed.
pub(crate) fn short_label(output: &str) -> String {
    output.rsplit(" - ").next().unwrap_or(output).trim().to_string()
}
