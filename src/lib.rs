// Library root
// -----------
// The binary (`main.rs`) is a thin wrapper; the search flow lives here so it
// can be exercised with canned responses and scripted input.
//
// Module responsibilities:
// - `api`: blocking HTTP client for the Open Library search endpoint.
// - `book`: book records and parsing of the raw JSON response.
// - `prompt`: line input from the terminal, or from a script in tests.
// - `ui`: result listing, the book selection loop and the overall run.
pub mod api;
pub mod book;
pub mod prompt;
pub mod ui;
