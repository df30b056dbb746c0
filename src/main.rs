// Entrypoint for the book search CLI.
// - Keeps `main` small: set up logging, build the client and hand it to
//   the UI flow.
// - Log output goes to stderr so stdout only carries the dialogue.

use book_search::{api::OpenLibraryClient, prompt::TerminalPrompt, ui};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Endpoint comes from `BOOK_SEARCH_URL`, see `OpenLibraryClient::from_env`.
    let client = OpenLibraryClient::from_env()?;
    tracing::debug!(url = client.base_url(), "using search endpoint");

    let mut prompt = TerminalPrompt::new();
    let mut stdout = std::io::stdout().lock();
    let outcome = ui::run(&client, &mut prompt, &mut stdout)?;
    tracing::debug!(?outcome, "run finished");

    Ok(ExitCode::from(outcome.exit_code()))
}
