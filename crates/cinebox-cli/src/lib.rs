//! Cinebox CLI support library.
//!
//! Rendering for the listing view plus tracing setup. Rendering is kept as
//! pure functions so the exact user-facing strings are unit tested.

use cinebox_core::models::Movie;

/// What the listing shows when there is nothing to list — whether because
/// the collection is empty or because the fetch failed. The two conditions
/// share one message; the fetch error is only visible at debug level.
pub const EMPTY_LIST_MESSAGE: &str = "No movies for now.";

/// Renders the outcome of a listing fetch.
pub fn render_movie_list(outcome: anyhow::Result<Vec<Movie>>) -> String {
    match outcome {
        Ok(movies) if !movies.is_empty() => render_movie_table(&movies),
        Ok(_) => EMPTY_LIST_MESSAGE.to_string(),
        Err(error) => {
            tracing::debug!(error = %error, "listing fetch failed; showing empty state");
            EMPTY_LIST_MESSAGE.to_string()
        }
    }
}

/// Fixed-width table of the movie collection, in the order the API returned
/// it.
pub fn render_movie_table(movies: &[Movie]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<36} {:<30} {:<14} {:>6} {:>20}\n",
        "ID", "Title", "Genre", "Year", "Uploaded At"
    ));
    out.push_str(&"-".repeat(110));
    out.push('\n');

    for movie in movies {
        let genre = movie.metadata.genre.as_deref().unwrap_or("-");
        let year = movie
            .metadata
            .year
            .map(|year| year.to_string())
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "{:<36} {:<30} {:<14} {:>6} {:>20}\n",
            movie.id.to_string(),
            truncate_string(&movie.title, 30),
            truncate_string(genre, 14),
            year,
            movie.uploaded_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ));
    }

    out
}

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}

/// Initialize tracing for the CLI binary.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
