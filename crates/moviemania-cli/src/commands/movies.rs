use super::context::AppContext;
use super::progress::Spinner;
use super::render;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use moviemania_core::{watched, DetailUpdate, SearchView, Session};
use moviemania_sources::MovieProvider;
use tracing::info;

pub async fn run_search(query: String, output: &Output) -> Result<()> {
    let context = AppContext::load()?;
    let mut session = context.session()?;

    let spinner = Spinner::start(output, format!("Searching for \"{}\"...", query.trim()));
    session.search(query).await;
    spinner.finish();

    let view = session.search_state().view();
    let failed = matches!(view, SearchView::Error(_));
    render::print_search_view(view, output);

    if failed {
        return Err(eyre!("Search failed"));
    }
    Ok(())
}

/// Open `id` in the session and wait for its details
async fn load_detail<P: MovieProvider + ?Sized>(session: &mut Session<P>, id: &str, output: &Output) -> Result<()> {
    let spinner = Spinner::start(output, format!("Fetching {}...", id));
    let update = session.open(id).await;
    spinner.finish();

    match update {
        Some(DetailUpdate::Loaded) => Ok(()),
        Some(DetailUpdate::Failed(message)) => Err(eyre!(message)),
        // A fresh session has nothing selected, so opening never toggles closed
        Some(DetailUpdate::Stale) | None => Err(eyre!("Movie {} could not be opened", id)),
    }
}

pub async fn run_show(id: &str, output: &Output) -> Result<()> {
    let context = AppContext::load()?;
    let mut session = context.session()?;
    load_detail(&mut session, id, output).await?;

    let state = session.detail_state();
    if let Some(detail) = state.current() {
        let watched = session.watched().iter().any(|entry| entry.id == detail.id);
        let hint = watched.then(|| render::rating_hint(state, true));
        render::print_detail(detail, hint, output);
    }
    Ok(())
}

pub async fn run_add(id: &str, rating: u8, output: &Output) -> Result<()> {
    let context = AppContext::load()?;
    let mut session = context.session()?;

    if let Some(entry) = watched::find(session.watched(), id) {
        output.warn(format!("{} is already in your watched list (rated {}/10)", entry.title, entry.user_rating));
        output.info(format!("Use `moviemania rate {} <N>` to change its rating.", id));
        return Ok(());
    }

    load_detail(&mut session, id, output).await?;

    session.set_rating(rating)?;
    let entry = session.add_to_list()?;
    info!("Added {} to watched list", entry.id);
    output.success(format!("Added {} ({}) rated {}/10", entry.title, entry.year, entry.user_rating));
    Ok(())
}
