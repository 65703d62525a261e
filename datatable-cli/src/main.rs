mod args;
mod error;
mod paths;
mod settings;

use std::fs::{self, File};
use std::process;

use clap::Parser;
use datatable_lib::Presenter;
use datatable_lib::column::ColumnSet;
use datatable_lib::event::Actions;
use datatable_lib::model::Row;
use datatable_lib::query::{DEFAULT_PAGE_SIZE_OPTIONS, Pagination};
use datatable_lib::render::render_text;
use datatable_lib::source::SourcePage;
use simplelog::{Config, WriteLogger};
use tokio::time::Instant;

use crate::args::Args;
use crate::error::CliError;
use crate::settings::Settings;

/// Page size used when only `--page` is given.
const DEFAULT_PAGE_SIZE: usize = 10;

fn main() {
    let args = Args::parse();
    init_logging(&args);

    if let Err(e) = run(args) {
        log::error!("{e}");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging(args: &Args) {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else { return };
    if let Some(dir) = path.parent()
        && fs::create_dir_all(dir).is_err()
    {
        return;
    }
    if let Ok(log_file) = File::create(&path) {
        let _ = WriteLogger::init(args.log_level, Config::default(), log_file);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let text = fs::read_to_string(&args.file).map_err(|e| CliError::io(&args.file, e))?;
    let page = SourcePage::from_json(&text, args.key.as_deref())?;
    log::info!("loaded {} records from {}", page.rows.len(), args.file.display());

    let mut settings = Settings::load(args.config.as_deref())?;
    let mut config = settings.table.clone();
    if args.server_side_pagination {
        config = config.with_server_side_pagination(true);
    }
    let columns = ColumnSet::new(settings.columns(&page.rows))?;
    if columns.is_empty() {
        return Err(CliError::InvalidArgument(
            "no columns configured and no record to infer them from".to_string(),
        ));
    }

    let mut table: Presenter<Row> = Presenter::new(columns, config);
    table.resize(args.width);
    table.set_actions(args.actions.iter().copied().collect::<Actions>());
    table.set_pagination(initial_pagination(&args, &page)?);
    table.set_data(page.rows);
    apply_intents(&mut table, &args)?;

    print!("{}", render_text(&table.view()));

    let events = table.drain_events();
    if args.events && !events.is_empty() {
        println!();
        println!("Events:");
        for event in events {
            println!("  {event:?}");
        }
    }
    Ok(())
}

/// Server pagination when the payload is a server page, otherwise local
/// pagination if any paging flag was given.
fn initial_pagination(args: &Args, page: &SourcePage) -> Result<Option<Pagination>, CliError> {
    if args.server_side_pagination {
        return match &page.pagination {
            Some(pagination) => Ok(Some(pagination.clone())),
            None => Err(CliError::InvalidArgument(
                "--server-side-pagination needs a payload with a pagination member".to_string(),
            )),
        };
    }
    if args.page.is_none() && args.page_size.is_none() {
        return Ok(None);
    }
    let page_size = args
        .page_size
        .or(page.pagination.as_ref().map(Pagination::page_size))
        .unwrap_or(DEFAULT_PAGE_SIZE);
    let pagination = Pagination::new(1, page_size, page.rows.len())
        .map_err(|e| CliError::InvalidArgument(format!("--page-size: {e}")))?;
    Ok(Some(pagination.with_size_changer(DEFAULT_PAGE_SIZE_OPTIONS.to_vec())))
}

/// Replays the command line as user intents, in the order a person would
/// perform them: search, filters, sort, paging, expansion.
fn apply_intents(table: &mut Presenter<Row>, args: &Args) -> Result<(), CliError> {
    if let Some(term) = &args.search {
        table.type_search(term.as_str(), Instant::now());
        if let Some(deadline) = table.next_deadline() {
            table.tick(deadline);
        }
    }

    for (key, value) in &args.filters {
        table.apply_filter(key, value.as_str())?;
    }

    if let Some((key, direction)) = &args.sort {
        let sort = table.set_sort(key)?;
        if sort.direction != *direction {
            table.set_sort(key)?;
        }
    }

    if !args.server_side_pagination {
        if let Some(page_size) = args.page_size {
            table.change_page_size(page_size)?;
        }
        if let Some(page) = args.page {
            table.change_page(page)?;
        }
    }

    for key in &args.expand {
        table.toggle_expanded(key)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use datatable_lib::query::SortDirection;

    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["datatable", "payload.json"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    fn page() -> SourcePage {
        SourcePage::from_json(
            r#"{
                "data": [
                    { "id": 1, "status": "open", "queue": "email" },
                    { "id": 2, "status": "done", "queue": "default" },
                    { "id": 3, "status": "open", "queue": "default" }
                ],
                "pagination": { "page": 4, "limit": 2, "total": 31 }
            }"#,
            None,
        )
        .unwrap()
    }

    fn table(args: &Args) -> Presenter<Row> {
        let page = page();
        let mut settings = Settings::default();
        let columns = ColumnSet::new(settings.columns(&page.rows)).unwrap();
        let mut table = Presenter::new(columns, settings.table.clone());
        table.set_pagination(initial_pagination(args, &page).unwrap());
        table.set_data(page.rows);
        table
    }

    #[test]
    fn test_intents_apply_in_order() {
        let args = args(&[
            "--search",
            "default",
            "--filter",
            "status=open",
            "--sort",
            "id:desc",
            "--events",
        ]);
        let mut table = table(&args);
        apply_intents(&mut table, &args).unwrap();

        assert_eq!(table.visible_indices(), vec![2]);
        assert_eq!(table.sort().unwrap().direction, SortDirection::Desc);
        let events = table.drain_events();
        assert_eq!(events.len(), 4);
    }

    #[test]
    fn test_local_pagination_from_flags() {
        let args = args(&["--page", "2"]);
        let pagination = initial_pagination(&args, &page()).unwrap().unwrap();
        assert_eq!(pagination.page_size(), 2);
        assert_eq!(pagination.total(), 3);

        let mut table = table(&args);
        apply_intents(&mut table, &args).unwrap();
        assert_eq!(table.visible_indices(), vec![2]);
    }

    #[test]
    fn test_server_pagination_passes_through() {
        let args = args(&["--server-side-pagination"]);
        let pagination = initial_pagination(&args, &page()).unwrap().unwrap();
        assert_eq!(pagination.current(), 4);
        assert_eq!(pagination.total(), 31);
    }

    #[test]
    fn test_unknown_filter_column_fails() {
        let args = args(&["--filter", "owner=me"]);
        let mut table = table(&args);
        assert!(matches!(
            apply_intents(&mut table, &args),
            Err(CliError::Table(_))
        ));
    }
}
