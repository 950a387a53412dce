use super::context::AppContext;
use super::render;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use moviemania_core::watched;
use tracing::info;

pub fn run_watched(output: &Output) -> Result<()> {
    let context = AppContext::load()?;
    let list = context.watched_list()?;
    let entries = list.get();
    render::print_watched(entries, &watched::summary(entries), output);
    Ok(())
}

pub fn run_rate(id: &str, rating: u8, output: &Output) -> Result<()> {
    let context = AppContext::load()?;
    let mut list = context.watched_list()?;

    let Some(entry) = watched::find(list.get(), id).cloned() else {
        return Err(eyre!(
            "{} is not in your watched list. Use `moviemania add {} --rating {}` first.",
            id,
            id,
            rating
        ));
    };

    list.update(|entries| watched::update_rating(entries, id, rating))?;
    info!("Changed rating of {} from {} to {}", id, entry.user_rating, rating);
    output.success(format!("Rated {} {}/10 (was {}/10)", entry.title, rating, entry.user_rating));
    Ok(())
}

pub fn run_remove(id: &str, output: &Output) -> Result<()> {
    let context = AppContext::load()?;
    let mut list = context.watched_list()?;

    let Some(entry) = watched::find(list.get(), id).cloned() else {
        output.warn(format!("{} is not in your watched list", id));
        return Ok(());
    };

    list.update(|entries| watched::delete(entries, id))?;
    info!("Removed {} from watched list", id);
    output.success(format!("Removed {} from your watched list", entry.title));
    Ok(())
}
