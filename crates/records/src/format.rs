//! Text shown in the panels.

use crate::{DataSource, Record};

/// One master list line: `[index] ID:id value`.
pub fn format_master_line(index: usize, record: &Record) -> String {
    format!("[{}] ID:{} {}", index, record.id, record.value)
}

/// The whole master list, one line per record, no trailing newline.
pub fn format_master_list(source: &DataSource) -> String {
    source
        .iter()
        .enumerate()
        .map(|(index, record)| format_master_line(index, record))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Detail panel text for a record. The last line has no trailing newline.
pub fn format_detail(record: &Record) -> String {
    format!(
        "ID: {}\nprop1: {}\nprop2: {}\nprop3: {}",
        record.id, record.prop1, record.prop2, record.prop3
    )
}

/// Stats panel text. A missing line index is shown as `-1`.
pub fn format_stats(line_index: Option<usize>, buffer_lines: usize, view_lines: usize) -> String {
    let index = line_index.map_or(-1, |i| i as i64);
    format!(
        "buf line index: {}\nbuf lines count: {}\nview lines count: {}\n",
        index, buffer_lines, view_lines
    )
}
