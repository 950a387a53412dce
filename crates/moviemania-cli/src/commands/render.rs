use crate::output::Output;
use comfy_table::{Attribute, Cell, Color, Table};
use moviemania_core::{DetailState, SearchView};
use moviemania_models::{round_average, MovieDetail, SearchResult, WatchedEntry, WatchedSummary};
use owo_colors::OwoColorize;
use serde_json::json;

const PROMPT_MESSAGE: &str = "Start by searching a movie!";
const NO_WATCHED_MESSAGE: &str = "No Movies Watched yet!";

fn styled(mut table: Table) -> Table {
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

fn header(cells: &[&str]) -> Vec<Cell> {
    cells
        .iter()
        .map(|c| Cell::new(c).fg(Color::Cyan).add_attribute(Attribute::Bold))
        .collect()
}

fn optional_number(value: Option<impl std::fmt::Display>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "N/A".to_string())
}

pub fn results_table(results: &[SearchResult]) -> Table {
    let mut table = Table::new();
    table.set_header(header(&["#", "Title", "Year", "IMDb ID"]));
    for (index, result) in results.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&result.title),
            Cell::new(&result.year),
            Cell::new(&result.id),
        ]);
    }
    styled(table)
}

pub fn detail_table(detail: &MovieDetail) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new(&detail.title).fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new(&detail.year),
    ]);
    table.add_row(vec![
        Cell::new("Released"),
        Cell::new(format!("{} • {}", detail.release_date, detail.runtime_label())),
    ]);
    table.add_row(vec![Cell::new("Genre"), Cell::new(&detail.genre)]);
    table.add_row(vec![
        Cell::new("IMDb rating"),
        Cell::new(format!("⭐ {}", optional_number(detail.external_rating))),
    ]);
    table.add_row(vec![Cell::new("Plot"), Cell::new(&detail.plot)]);
    table.add_row(vec![Cell::new("Starring"), Cell::new(&detail.actors)]);
    table.add_row(vec![Cell::new("Directed by"), Cell::new(&detail.director)]);
    styled(table)
}

pub fn watched_table(entries: &[WatchedEntry]) -> Table {
    let mut table = Table::new();
    table.set_header(header(&["Title", "Year", "IMDb", "Yours", "Runtime", "IMDb ID"]));
    for entry in entries {
        table.add_row(vec![
            Cell::new(&entry.title),
            Cell::new(&entry.year),
            Cell::new(format!("⭐ {}", optional_number(entry.external_rating))),
            Cell::new(format!("🌟 {}", entry.user_rating)),
            Cell::new(format!("⏳ {} min", optional_number(entry.runtime_minutes))),
            Cell::new(&entry.id),
        ]);
    }
    styled(table)
}

/// The watched table, or a placeholder when nothing has been watched
pub fn watched_listing(entries: &[WatchedEntry]) -> String {
    if entries.is_empty() {
        NO_WATCHED_MESSAGE.to_string()
    } else {
        watched_table(entries).to_string()
    }
}

pub fn summary_line(summary: &WatchedSummary) -> String {
    format!(
        "#️⃣ {} movies  ⭐ {}  🌟 {}  ⏳ {} min",
        summary.count,
        round_average(summary.avg_external_rating),
        round_average(summary.avg_user_rating),
        round_average(summary.avg_runtime_minutes),
    )
}

/// Line under the detail table describing where the rating control stands
pub fn rating_hint(state: &DetailState, watched: bool) -> String {
    match (watched, state.rating) {
        (true, Some(rating)) => format!("Already watched, you rated it {}/10. Use :r N to change it.", rating),
        (false, Some(rating)) => format!("Your rating: {}/10. Use :a to add it to your list.", rating),
        (_, None) => "Rate this movie with :r N (1-10).".to_string(),
    }
}

pub fn print_search_view(view: SearchView<'_>, output: &Output) {
    match view {
        SearchView::Loading => output.info("Loading..."),
        SearchView::Error(message) => output.error(message),
        SearchView::Prompt => output.info(PROMPT_MESSAGE),
        SearchView::Results(results) => {
            if output.is_human() {
                if output.is_quiet() {
                    return;
                }
                println!("Found {} results", results.len().bold());
                if !results.is_empty() {
                    println!("{}", results_table(results));
                }
            } else {
                output.json(&json!({ "type": "results", "count": results.len(), "results": results }));
            }
        }
    }
}

pub fn print_detail(detail: &MovieDetail, hint: Option<String>, output: &Output) {
    if output.is_human() {
        if output.is_quiet() {
            return;
        }
        println!("{}", detail_table(detail));
        if let Some(hint) = hint {
            println!("{}", hint.dimmed());
        }
    } else {
        output.json(&json!({ "type": "detail", "movie": detail }));
    }
}

pub fn print_watched(entries: &[WatchedEntry], summary: &WatchedSummary, output: &Output) {
    if output.is_human() {
        if output.is_quiet() {
            return;
        }
        println!("{}", "Movies you watched".bright_cyan().bold());
        println!("{}", summary_line(summary));
        println!("{}", watched_listing(entries));
    } else {
        output.json(&json!({ "type": "watched", "summary": summary, "movies": entries }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail() -> MovieDetail {
        MovieDetail {
            id: "tt0372784".to_string(),
            title: "Batman Begins".to_string(),
            year: "2005".to_string(),
            poster_url: "N/A".to_string(),
            release_date: "15 Jun 2005".to_string(),
            runtime_minutes: None,
            genre: "Action, Crime, Drama".to_string(),
            external_rating: Some(8.2),
            plot: "After witnessing his parents' death...".to_string(),
            actors: "Christian Bale, Michael Caine".to_string(),
            director: "Christopher Nolan".to_string(),
        }
    }

    #[test]
    fn test_results_table_numbers_rows_from_one() {
        let results = vec![
            SearchResult {
                id: "tt001".to_string(),
                title: "Batman".to_string(),
                year: "1989".to_string(),
                poster_url: "N/A".to_string(),
            },
            SearchResult {
                id: "tt002".to_string(),
                title: "Batgirl".to_string(),
                year: "2022".to_string(),
                poster_url: "N/A".to_string(),
            },
        ];
        let rendered = results_table(&results).to_string();
        assert!(rendered.contains("Batman"));
        assert!(rendered.contains("tt002"));
        assert!(rendered.contains(" 1 "));
        assert!(rendered.contains(" 2 "));
    }

    #[test]
    fn test_detail_table_shows_missing_runtime() {
        let rendered = detail_table(&detail()).to_string();
        assert!(rendered.contains("15 Jun 2005 • N/A"));
        assert!(rendered.contains("⭐ 8.2"));
        assert!(rendered.contains("Christopher Nolan"));
    }

    #[test]
    fn test_summary_line_formats_averages() {
        let entries = vec![
            WatchedEntry::from_detail(&MovieDetail { runtime_minutes: Some(140), ..detail() }, 7),
            WatchedEntry::from_detail(&MovieDetail { runtime_minutes: Some(120), ..detail() }, 8),
        ];
        let line = summary_line(&WatchedSummary::from_entries(&entries));
        assert!(line.contains("2 movies"));
        assert!(line.contains("🌟 7.50"));
        assert!(line.contains("⏳ 130 min"));
    }

    #[test]
    fn test_empty_watched_list_shows_placeholder() {
        assert_eq!(watched_listing(&[]), "No Movies Watched yet!");

        let entries = vec![WatchedEntry::from_detail(&detail(), 9)];
        let listing = watched_listing(&entries);
        assert!(listing.contains("Batman Begins"));
        assert!(!listing.contains("No Movies Watched yet!"));
    }

    #[test]
    fn test_rating_hint() {
        let mut state = DetailState::default();
        assert!(rating_hint(&state, false).contains(":r N"));

        state.rating = Some(6);
        assert!(rating_hint(&state, false).contains(":a"));
        assert!(rating_hint(&state, true).contains("Already watched"));
    }
}
