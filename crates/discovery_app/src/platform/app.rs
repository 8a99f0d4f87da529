use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use discovery_core::{update, AppState, ItemId, Msg};
use discovery_engine::{AssetResolver, DetailRecord, FetchError, TmdbProvider};
use engine_logging::{engine_error, engine_info, engine_warn};

use super::commands::{parse_command, Command, HELP};
use super::effects::EffectRunner;
use super::persistence::ThemeStore;
use super::render;
use super::theme::Theme;
use crate::config::Cli;

const TICK_INTERVAL: Duration = Duration::from_millis(75);

/// Everything the main loop reacts to.
pub enum AppEvent {
    Core(Msg),
    Line(String),
    Details {
        id: ItemId,
        result: Result<DetailRecord, FetchError>,
    },
    InputClosed,
}

pub fn run_app(cli: Cli) -> anyhow::Result<()> {
    if cli.api_key.trim().is_empty() {
        anyhow::bail!("an API key is required (--api-key or TMDB_API_KEY)");
    }

    let provider =
        TmdbProvider::new(cli.provider_settings()).context("failed to build the TMDB client")?;
    let themes = ThemeStore::new(&cli.state_dir);
    let theme = themes.load();

    let (app_tx, app_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(Arc::new(provider), app_tx.clone())
        .context("failed to start the engine")?;

    spawn_input_reader(app_tx.clone()).context("failed to start the input reader")?;

    // Background tick to throttle rendering.
    thread::spawn(move || {
        while app_tx.send(AppEvent::Core(Msg::Tick)).is_ok() {
            thread::sleep(TICK_INTERVAL);
        }
    });

    engine_info!("discovery started catalog={:?}", cli.catalog);
    let mut app = App {
        state: AppState::with_config(cli.coordinator_config()),
        runner,
        themes,
        theme,
        assets: AssetResolver::default(),
        out: io::stdout(),
    };
    app.print(HELP.lines().map(str::to_string).collect())?;
    app.dispatch(Msg::Mounted);

    for event in app_rx {
        match event {
            AppEvent::Core(Msg::Tick) => {
                if app.state.consume_dirty() {
                    app.render()?;
                }
            }
            AppEvent::Core(msg) => app.dispatch(msg),
            AppEvent::Line(line) => match parse_command(&line) {
                Ok(Command::Quit) => break,
                Ok(command) => app.run_command(command)?,
                Err(err) => app.print(vec![err.to_string()])?,
            },
            AppEvent::Details { id, result } => app.show_details(id, result)?,
            AppEvent::InputClosed => break,
        }
    }

    app.dispatch(Msg::Unmounted);
    engine_info!("discovery stopped");
    Ok(())
}

struct App {
    state: AppState,
    runner: EffectRunner,
    themes: ThemeStore,
    theme: Theme,
    assets: AssetResolver,
    out: io::Stdout,
}

impl App {
    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.enqueue(effects);
    }

    fn run_command(&mut self, command: Command) -> io::Result<()> {
        match command {
            Command::Type(text) => self.dispatch(Msg::QueryTextChanged(text)),
            Command::Submit(text) => {
                let text = text.unwrap_or_else(|| self.state.view().raw_text);
                self.dispatch(Msg::QuerySubmitted(text));
            }
            Command::Next => self.dispatch(Msg::NextPage),
            Command::Previous => self.dispatch(Msg::PreviousPage),
            Command::Page(page) => self.dispatch(Msg::PageRequested(page)),
            Command::Clear => self.dispatch(Msg::ClearClicked),
            Command::Dismiss => self.dispatch(Msg::SuggestionsDismissed),
            Command::Pick(index) => {
                let picked = index
                    .checked_sub(1)
                    .and_then(|index| self.state.view().suggestions.items.get(index).cloned());
                match picked {
                    Some(item) => {
                        self.dispatch(Msg::SuggestionsDismissed);
                        self.runner.request_details(item.id);
                    }
                    None => return self.print(vec![format!("no suggestion {index}")]),
                }
            }
            Command::Details(id) => self.runner.request_details(id),
            Command::Theme => {
                self.theme = self.theme.toggle();
                if let Err(err) = self.themes.set(self.theme) {
                    engine_error!("Failed to persist theme: {}", err);
                }
                return self.render();
            }
            Command::Help => return self.print(HELP.lines().map(str::to_string).collect()),
            Command::Quit => {}
        }
        Ok(())
    }

    fn show_details(
        &mut self,
        id: ItemId,
        result: Result<DetailRecord, FetchError>,
    ) -> io::Result<()> {
        match result {
            Ok(record) => {
                let lines = render::render_details(&record, self.theme, &self.assets);
                self.print(lines)
            }
            Err(err) => {
                engine_warn!("details for {} unavailable: {}", id, err);
                self.print(vec![format!("could not load title {id}")])
            }
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let lines = render::render(&self.state.view(), self.theme, &self.assets);
        self.print(lines)
    }

    fn print(&mut self, lines: Vec<String>) -> io::Result<()> {
        let mut out = self.out.lock();
        writeln!(out)?;
        for line in lines {
            writeln!(out, "{line}")?;
        }
        out.flush()
    }
}

fn spawn_input_reader(app_tx: mpsc::Sender<AppEvent>) -> io::Result<()> {
    thread::Builder::new()
        .name("discovery-input".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(err) => {
                        engine_warn!("stdin read failed: {}", err);
                        break;
                    }
                };
                if app_tx.send(AppEvent::Line(line)).is_err() {
                    return;
                }
            }
            let _ = app_tx.send(AppEvent::InputClosed);
        })?;
    Ok(())
}
