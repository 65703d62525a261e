//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;
use datatable_lib::event::ActionKind;
use datatable_lib::query::SortDirection;
use simplelog::LevelFilter;

/// Render a JSON list payload as a data table
#[derive(Parser, Debug)]
#[command(name = "datatable")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Render a JSON list payload as a searchable, sortable data table")]
#[command(long_about = r#"
Reads a list payload ({ "data": [...], "pagination": {...} }), applies search,
filters, sort and pagination, and prints the table (or cards on narrow widths).

Examples:
  datatable jobs.json --filter status=failed --sort created_at:desc
  datatable audit.json --key entries --search login --page-size 20 --page 2
  datatable keys.json --width 800 --expand key_1 --events
"#)]
pub struct Args {
    /// Payload file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Member holding the records (default: `data`, else the first array)
    #[arg(short = 'k', long, value_name = "NAME")]
    pub key: Option<String>,

    /// Config file with table options and columns
    #[arg(short = 'c', long, value_name = "PATH", env = "DATATABLE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Viewport width in pixels; below the breakpoint cards are shown
    #[arg(short = 'w', long, default_value = "1280", value_name = "PX")]
    pub width: u32,

    /// Page to show (1-based)
    #[arg(short = 'p', long, value_name = "N")]
    pub page: Option<usize>,

    /// Records per page; enables pagination
    #[arg(long, value_name = "N")]
    pub page_size: Option<usize>,

    /// Free-text search over every field
    #[arg(short = 's', long, value_name = "TERM")]
    pub search: Option<String>,

    /// Column filter, repeatable
    #[arg(short = 'f', long = "filter", value_name = "KEY=VALUE", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,

    /// Sort column and direction
    #[arg(long, value_name = "KEY[:asc|:desc]", value_parser = parse_sort)]
    pub sort: Option<(String, SortDirection)>,

    /// Expand the card with this row key, repeatable
    #[arg(short = 'e', long = "expand", value_name = "ROWKEY")]
    pub expand: Vec<String>,

    /// Row actions to offer
    #[arg(long, value_name = "ACTION", value_delimiter = ',', value_parser = parse_action)]
    pub actions: Vec<ActionKind>,

    /// The payload is already one page; use its pagination as is
    #[arg(long)]
    pub server_side_pagination: bool,

    /// Print the events the table emitted
    #[arg(long)]
    pub events: bool,

    /// Log level for the log file
    #[arg(long, default_value = "info", value_name = "LEVEL", env = "DATATABLE_LOG")]
    pub log_level: LevelFilter,
}

fn parse_filter(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing column key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

fn parse_sort(s: &str) -> Result<(String, SortDirection), String> {
    let (key, direction) = match s.rsplit_once(':') {
        Some((key, "asc")) => (key, SortDirection::Asc),
        Some((key, "desc")) => (key, SortDirection::Desc),
        Some((_, other)) => return Err(format!("unknown direction '{other}', use asc or desc")),
        None => (s, SortDirection::Asc),
    };
    if key.is_empty() {
        return Err("missing column key".to_string());
    }
    Ok((key.to_string(), direction))
}

fn parse_action(s: &str) -> Result<ActionKind, String> {
    ActionKind::ALL
        .into_iter()
        .find(|kind| kind.label().eq_ignore_ascii_case(s.trim()))
        .ok_or_else(|| {
            let known: Vec<&str> = ActionKind::ALL.iter().map(|k| k.label()).collect();
            format!("unknown action '{s}', expected one of {}", known.join(", "))
        })
}
