use super::context::AppContext;
use super::progress::Spinner;
use super::{prompts, render};
use crate::output::Output;
use color_eyre::Result;
use moviemania_core::shortcuts::{ENTER, ESCAPE};
use moviemania_core::{DetailUpdate, RatingChange, Session, SessionError, Shortcuts};
use moviemania_sources::MovieProvider;
use owo_colors::OwoColorize;
use tracing::{debug, warn};

const HELP: &str = "\
<text>     search for movies (at least 3 characters)
<empty>    Enter: focus the search box and clear it
:N         open result N (again to close it)
:r N       rate the open movie (1-10)
:a         add the open movie to your watched list
:d <id>    remove a movie from your watched list
:w         show your watched list
:esc, :b   close the open movie
:h         this help
:q         quit";

/// One line typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Query(String),
    Enter,
    Escape,
    /// Zero-based result position
    Select(usize),
    Rate(u8),
    Add,
    Delete(String),
    Watched,
    Help,
    Quit,
    Invalid(String),
}

impl Action {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Action::Enter;
        }
        let Some(command) = trimmed.strip_prefix(':') else {
            return Action::Query(line.to_string());
        };

        let mut parts = command.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let arg = parts.next();

        match (name, arg) {
            ("q" | "quit", None) => Action::Quit,
            ("h" | "help", None) => Action::Help,
            ("w" | "watched", None) => Action::Watched,
            ("a" | "add", None) => Action::Add,
            ("esc" | "b" | "back", None) => Action::Escape,
            ("r" | "rate", Some(value)) => match value.parse::<u8>() {
                Ok(rating) => Action::Rate(rating),
                Err(_) => Action::Invalid(format!("not a rating: {}", value)),
            },
            ("d" | "delete", Some(id)) => Action::Delete(id.to_string()),
            (index, None) => match index.parse::<usize>() {
                Ok(n) if n >= 1 => Action::Select(n - 1),
                _ => Action::Invalid(format!("unknown command :{}", command)),
            },
            _ => Action::Invalid(format!("unknown command :{}", command)),
        }
    }
}

pub async fn run_interactive(output: &Output) -> Result<()> {
    let context = AppContext::load()?;
    let mut session = context.session()?;
    let mut shortcuts = Shortcuts::new();

    if output.is_human() && !output.is_quiet() {
        println!("{}", session.window_title().bright_cyan().bold());
        println!("{}", "Type a title to search, :h for help".dimmed());
    }
    render::print_watched(session.watched(), &session.summary(), output);

    loop {
        let line = prompts::prompt_line("🔍")?;
        let action = Action::parse(&line);
        debug!(?action, "Interactive input");

        match action {
            Action::Quit => break,
            Action::Help => output.info(HELP),
            Action::Query(text) => {
                session.focus_search();
                let spinner = Spinner::start(output, "Loading...");
                session.search(text).await;
                spinner.finish();
                render::print_search_view(session.search_state().view(), output);
            }
            Action::Enter => {
                if shortcuts.press(ENTER, &mut session) > 0 && session.search_state().query.is_empty() {
                    render::print_search_view(session.search_state().view(), output);
                }
            }
            Action::Escape => {
                if shortcuts.press(ESCAPE, &mut session) == 0 {
                    output.info("No movie is open");
                } else {
                    output.info(session.window_title());
                }
            }
            Action::Select(index) => {
                session.blur_search();
                select(&mut session, &mut shortcuts, index, output).await;
            }
            Action::Rate(rating) => match session.set_rating(rating) {
                Ok(RatingChange::WriteThrough { rating, .. }) => {
                    output.success(format!("Rating updated to {}/10", rating));
                }
                Ok(RatingChange::Pending) => output.info(format!("Rating {}/10 chosen, :a to add", rating)),
                Err(e) => output.error(e.to_string()),
            },
            Action::Add => match session.add_to_list() {
                Ok(entry) => {
                    shortcuts.sync(&session);
                    output.success(format!("Added {} rated {}/10", entry.title, entry.user_rating));
                    render::print_watched(session.watched(), &session.summary(), output);
                }
                Err(e) => output.error(e.to_string()),
            },
            Action::Delete(id) => match session.delete_watched(&id) {
                Ok(true) => {
                    output.success(format!("Removed {}", id));
                    render::print_watched(session.watched(), &session.summary(), output);
                }
                Ok(false) => output.warn(format!("{} is not in your watched list", id)),
                Err(e) => output.error(e.to_string()),
            },
            Action::Watched => render::print_watched(session.watched(), &session.summary(), output),
            Action::Invalid(message) => output.warn(format!("{}, :h for help", message)),
        }
    }

    Ok(())
}

async fn select<P: MovieProvider + ?Sized + 'static>(
    session: &mut Session<P>,
    shortcuts: &mut Shortcuts<P>,
    index: usize,
    output: &Output,
) {
    let request = match session.select_result(index) {
        Ok(request) => request,
        Err(SessionError::NoSuchResult(_)) => {
            output.warn(format!("There is no result {}", index + 1));
            return;
        }
        Err(e) => {
            output.error(e.to_string());
            return;
        }
    };
    shortcuts.sync(session);

    // Selecting the open movie again closes it
    let Some(request) = request else {
        output.info(session.window_title());
        return;
    };

    let spinner = Spinner::start(output, "Loading...");
    let response = request.execute(session.provider()).await;
    spinner.finish();

    match session.apply_detail(response) {
        DetailUpdate::Loaded => {
            let state = session.detail_state();
            if let Some(detail) = state.current() {
                let watched = session.watched().iter().any(|entry| entry.id == detail.id);
                output.info(session.window_title());
                render::print_detail(detail, Some(render::rating_hint(state, watched)), output);
            }
        }
        DetailUpdate::Failed(message) => output.error(message),
        DetailUpdate::Stale => warn!("Dropped detail response for a closed selection"),
    }
}
