// UI layer: prints search results, runs the book selection loop and drives
// one search from query to detail view. Everything writes to a caller
// supplied `Write` so the flow can be checked without a terminal.

use crate::api::BookSource;
use crate::book::{parse_response, BookRecord, SearchResults};
use crate::prompt::Prompt;
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::time::Duration;

pub const QUERY_PROMPT: &str = "Enter a search term (e.g., title, author, or keyword)";
pub const SELECT_PROMPT: &str =
    "Enter the number of the book you want to view details for (0 to exit)";

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    EmptyQuery,
    FetchFailed,
    NoResults,
    Exited,
    /// The user viewed the book with this 1-based number.
    Viewed(usize),
}

impl Outcome {
    /// Process exit code for this outcome.
    pub fn exit_code(self) -> u8 {
        match self {
            Outcome::FetchFailed => 1,
            Outcome::EmptyQuery => 2,
            Outcome::NoResults | Outcome::Exited | Outcome::Viewed(_) => 0,
        }
    }
}

pub fn show_error(out: &mut impl Write, message: &str) -> io::Result<()> {
    writeln!(out, "\nError: {}", message)
}

pub fn show_no_results(out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "\nNo results found for the search term. Please try again with a different query."
    )
}

/// Print the numbered summary list. Returns `false` (after printing the
/// no-results message) when there is nothing to list.
pub fn display_summaries(out: &mut impl Write, results: Option<&SearchResults>) -> io::Result<bool> {
    let results = match results {
        Some(results) if !results.is_empty() => results,
        _ => {
            show_no_results(out)?;
            return Ok(false);
        }
    };

    writeln!(out, "\nFound {} books:\n", results.len())?;
    for (idx, book) in results.iter().enumerate() {
        writeln!(
            out,
            "{}. {} by {} (Published: {})",
            idx + 1,
            book.title(),
            book.author_line(),
            book.year_label()
        )?;
    }
    Ok(true)
}

pub fn display_detail(out: &mut impl Write, book: &BookRecord) -> io::Result<()> {
    writeln!(out, "\nTitle: {}", book.title())?;
    writeln!(out, "Author(s): {}", book.author_line())?;
    writeln!(out, "Published Year: {}", book.year_label())?;
    writeln!(out, "ISBN: {}", book.isbn())
}

/// Ask for a book number until the user picks a valid one or 0.
///
/// Invalid input re-prompts in a loop; end of input counts as 0.
pub fn select_book(
    prompt: &mut impl Prompt,
    out: &mut impl Write,
    results: &SearchResults,
) -> Result<Outcome> {
    loop {
        let answer = match prompt.ask(SELECT_PROMPT)? {
            Some(answer) => answer,
            None => {
                tracing::debug!("input closed at selection prompt");
                writeln!(out, "Exiting.")?;
                return Ok(Outcome::Exited);
            }
        };

        let choice: i64 = match answer.trim().parse() {
            Ok(choice) => choice,
            Err(_) => {
                writeln!(out, "Please enter a valid number.")?;
                continue;
            }
        };

        if choice == 0 {
            writeln!(out, "Exiting.")?;
            return Ok(Outcome::Exited);
        }

        let book = usize::try_from(choice)
            .ok()
            .and_then(|number| results.get(number).map(|book| (number, book)));
        match book {
            Some((number, book)) => {
                display_detail(out, book)?;
                return Ok(Outcome::Viewed(number));
            }
            None => {
                writeln!(
                    out,
                    "Invalid choice. Please enter a number corresponding to a book."
                )?;
            }
        }
    }
}

/// Run one search: read the query, fetch, list results and let the user
/// pick a book.
pub fn run(
    source: &impl BookSource,
    prompt: &mut impl Prompt,
    out: &mut impl Write,
) -> Result<Outcome> {
    let query = prompt.ask(QUERY_PROMPT)?.unwrap_or_default();
    let query = query.trim();
    if query.is_empty() {
        show_error(out, "Search term cannot be empty.")?;
        return Ok(Outcome::EmptyQuery);
    }

    writeln!(out, "\nSearching for books...\n")?;
    out.flush()?;

    // Drawn on stderr and hidden when stderr is not a terminal.
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Querying for \"{}\"", query));
    spinner.enable_steady_tick(Duration::from_millis(100));
    let response = source.search(query);
    spinner.finish_and_clear();

    let data = match response {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!(error = %e, "search request failed");
            writeln!(out, "Error fetching data from the API: {}", e)?;
            show_error(
                out,
                "Failed to retrieve data. Please check your network or try again later.",
            )?;
            return Ok(Outcome::FetchFailed);
        }
    };

    let Some(results) = parse_response(&data).filter(|results| !results.is_empty()) else {
        display_summaries(out, None)?;
        return Ok(Outcome::NoResults);
    };

    display_summaries(out, Some(&results))?;
    select_book(prompt, out, &results)
}
