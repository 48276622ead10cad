use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use dashboard_core::{update, AppState, Msg, Sort, TableState};
use dashboard_engine::{EngineHandle, PageOutcome, Resource};
use dashboard_logging::{dashboard_debug, dashboard_info};

use super::effects::{EffectRunner, Loaded};
use super::persistence::{load_saved_view, save_view};
use super::render::{render_detail_page, render_table_page};
use super::tables::{detail_modal, is_resource_location, modal_target, table_config};

const TICK_INTERVAL: Duration = Duration::from_millis(75);

const HELP: &str = "\
commands:
  page N              go to page N
  size N              show N rows per page
  next | prev         step through pages
  sort COLUMN [desc]  sort by COLUMN; `sort off` clears
  search TEXT         search every searchable column
  filter COLUMN V,V   select filter values; no values clears the column
  clear               drop search and filters
  open ID | close     show or hide a row's detail
  url LOCATION        jump to a dashboard location
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Msg),
    Help,
    Quit,
}

enum Event {
    Line(String),
    Tick(Instant),
    InputClosed,
}

pub struct BrowseOptions {
    pub resource: Resource,
    pub views_dir: PathBuf,
    /// Starting location; the saved view or the bare page when absent.
    pub location: Option<String>,
}

pub fn run_browse(engine: EngineHandle, options: BrowseOptions) -> anyhow::Result<()> {
    let BrowseOptions {
        resource,
        views_dir,
        location,
    } = options;
    let location = location
        .or_else(|| load_saved_view(&views_dir, resource))
        .unwrap_or_else(|| resource.dashboard_path());

    let mut browser = Browser {
        resource,
        runner: EffectRunner::new(engine, resource),
        last_url: String::new(),
    };
    let mut state = AppState::new(table_config(resource), &location);
    browser.runner.load_location(&state.table().location());
    println!("{HELP}");

    let (event_tx, event_rx) = mpsc::channel::<Event>();
    let input_tx = event_tx.clone();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if input_tx.send(Event::Line(line)).is_err() {
                return;
            }
        }
        let _ = input_tx.send(Event::InputClosed);
    });
    // Background tick drives the search debounce and engine polling.
    thread::spawn(move || {
        while event_tx.send(Event::Tick(Instant::now())).is_ok() {
            thread::sleep(TICK_INTERVAL);
        }
    });

    while let Ok(event) = event_rx.recv() {
        match event {
            Event::Line(line) => {
                let command = parse_command(&line, resource, state.table(), Instant::now());
                match command {
                    Ok(Command::Dispatch(msg)) => state = browser.dispatch(state, msg),
                    Ok(Command::Help) => println!("{HELP}"),
                    Ok(Command::Quit) => break,
                    Err(message) => println!("{message}"),
                }
            }
            Event::Tick(now) => {
                state = browser.dispatch(state, Msg::Tick { now });
                for loaded in browser.runner.poll() {
                    state = browser.show(state, loaded);
                }
            }
            Event::InputClosed => break,
        }
    }

    save_view(&views_dir, resource, &state.table().location());
    dashboard_info!("Browse session for {} ended", resource);
    Ok(())
}

struct Browser {
    resource: Resource,
    runner: EffectRunner,
    last_url: String,
}

impl Browser {
    fn dispatch(&mut self, state: AppState, msg: Msg) -> AppState {
        let reseeded = matches!(msg, Msg::LocationChanged(_));
        let opened = matches!(msg, Msg::ModalOpened(_));

        let (mut state, effects) = update(state, msg);
        self.runner.run(effects);
        if reseeded {
            self.runner.load_location(&state.table().location());
        }
        if opened {
            if let Some((resource, id)) = modal_target(state.modal()) {
                self.runner.load_detail(resource, id);
            }
        }

        if state.consume_dirty() {
            let url = state.table().location();
            if url != self.last_url {
                println!("> {url}");
                self.last_url = url;
            }
        }
        state
    }

    fn show(&mut self, state: AppState, loaded: Loaded) -> AppState {
        match loaded {
            Loaded::Table(outcome) => {
                let state = match &outcome {
                    PageOutcome::Render(table) => {
                        self.dispatch(state, Msg::PageCountChanged(Some(table.page_count)))
                    }
                    _ => state,
                };
                let view = state.view();
                print!(
                    "{}",
                    render_table_page(&view.table, state.table().config(), &outcome)
                );
                state
            }
            Loaded::Detail(outcome) => {
                if state.modal().is_open() {
                    print!("{}", render_detail_page(&outcome));
                } else {
                    dashboard_debug!("Detail for {} arrived after close", self.resource);
                }
                state
            }
            Loaded::Dashboard(_) => state,
        }
    }
}

/// Parses one line of browse input into a core message.
pub fn parse_command(
    line: &str,
    resource: Resource,
    table: &TableState,
    now: Instant,
) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    let msg = match word {
        "" => Msg::NoOp,
        "help" | "?" => return Ok(Command::Help),
        "quit" | "q" | "exit" => return Ok(Command::Quit),
        "next" | "n" => Msg::NextPage,
        "prev" | "p" => Msg::PreviousPage,
        "page" => {
            let page = parse_positive(rest, "page")?;
            Msg::PaginationChanged {
                page_index: page - 1,
                page_size: table.page_size(),
            }
        }
        "size" => Msg::PaginationChanged {
            page_index: table.page_index(),
            page_size: parse_positive(rest, "size")?,
        },
        "sort" => {
            let mut parts = rest.split_whitespace();
            match (parts.next(), parts.next()) {
                (None, _) => return Err("usage: sort COLUMN [asc|desc] | sort off".to_string()),
                (Some("off"), None) => Msg::SortingChanged(None),
                (Some(column), None | Some("asc")) => Msg::SortingChanged(Some(Sort::asc(column))),
                (Some(column), Some("desc")) => Msg::SortingChanged(Some(Sort::desc(column))),
                (Some(_), Some(other)) => return Err(format!("unknown sort direction {other:?}")),
            }
        }
        "search" => Msg::SearchInput {
            value: rest.to_string(),
            at: now,
        },
        "filter" => {
            let (column, values) = rest.split_once(' ').unwrap_or((rest, ""));
            let config = table.config();
            let Some(declared) = config.filterable_column(column) else {
                let known: Vec<&str> = config.filterable.iter().map(|c| c.id.as_str()).collect();
                return Err(format!(
                    "{column:?} is not filterable; try one of: {}",
                    known.join(", ")
                ));
            };
            let values: Vec<String> = values
                .split(',')
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(ToOwned::to_owned)
                .collect();
            if let Some(unknown) = values
                .iter()
                .find(|value| !declared.options.iter().any(|option| &option.value == *value))
            {
                return Err(format!("{unknown:?} is not an option of {}", declared.title));
            }
            Msg::FilterSelected {
                column: column.to_string(),
                values,
            }
        }
        "clear" => Msg::FiltersCleared,
        "open" => {
            if rest.is_empty() {
                return Err("usage: open ID".to_string());
            }
            let modal = detail_modal(resource, rest)
                .ok_or_else(|| format!("{resource} rows have no detail view"))?;
            Msg::ModalOpened(modal)
        }
        "close" => Msg::ModalClosed,
        "url" => {
            if !is_resource_location(resource, rest) {
                return Err(format!("locations must stay on {}", resource.dashboard_path()));
            }
            Msg::LocationChanged(rest.to_string())
        }
        other => return Err(format!("unknown command {other:?}; type `help`")),
    };
    Ok(Command::Dispatch(msg))
}

fn parse_positive(raw: &str, what: &str) -> Result<u64, String> {
    match raw.parse::<u64>() {
        Ok(value) if value >= 1 => Ok(value),
        _ => Err(format!("{what} must be a number of at least 1")),
    }
}
