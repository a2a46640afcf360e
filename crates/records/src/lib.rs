//! Record data and panel content formatting for bufnav.
//!
//! - `DataSource` - the ordered records listed in the master panel
//! - `format` - pure functions producing the text of each panel

pub mod format;
mod source;

pub use format::{format_detail, format_master_line, format_master_list, format_stats};
pub use source::{DataSource, Record, RecordsError};
