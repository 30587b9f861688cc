use clap::ValueEnum;
use comfy_table::Table;
use indicatif::{ProgressBar, ProgressStyle};
use movie_explorer_models::{MediaKind, MovieDetails, MovieSummary};
use owo_colors::OwoColorize;
use serde_json::json;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Human => {
                println!("{} {}", "✓".green(), msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({
                    "type": "success",
                    "message": msg.as_ref()
                }));
            }
        }
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Human => {
                println!("{}", msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({
                    "type": "info",
                    "message": msg.as_ref()
                }));
            }
        }
    }

    pub fn error(&self, msg: impl AsRef<str>) {
        match self.format {
            OutputFormat::Human => {
                eprintln!("{} {}", "✗".red(), msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({
                    "type": "error",
                    "message": msg.as_ref()
                }));
            }
        }
    }

    /// Spinner shown while a request is in flight. Human output only.
    pub fn spinner(&self, msg: &str) -> Option<ProgressBar> {
        if self.quiet || self.format != OutputFormat::Human {
            return None;
        }
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(msg.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        Some(spinner)
    }

    pub fn movie_table(&self, movies: &[MovieSummary]) {
        match self.format {
            OutputFormat::Human => {
                let mut table = Table::new();
                table.set_header(vec!["#", "Title", "Year", "Kind", "IMDb id"]);
                for (index, movie) in movies.iter().enumerate() {
                    table.add_row(vec![
                        (index + 1).to_string(),
                        movie.title.clone(),
                        movie.year.clone(),
                        kind_label(movie.kind).to_string(),
                        movie.imdb_id.clone(),
                    ]);
                }
                println!("{table}");
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&serde_json::to_value(movies).unwrap_or_default());
            }
        }
    }

    pub fn details_view(&self, details: &MovieDetails) {
        match self.format {
            OutputFormat::Human => {
                let title = details.title.as_deref().unwrap_or(details.imdb_id.as_str());
                match details.year.as_deref() {
                    Some(year) => println!("{} ({})", title.bold(), year),
                    None => println!("{}", title.bold()),
                }
                print_field("Rated", details.rated.as_deref());
                print_field("Released", details.released.as_deref());
                print_field("Runtime", details.runtime.as_deref());
                print_field("Genre", details.genre.as_deref());
                print_field("Director", details.director.as_deref());
                print_field("Cast", details.actors.as_deref());
                if let Some(rating) = details.imdb_rating.as_deref() {
                    let votes = details.imdb_votes.as_deref().unwrap_or("unknown");
                    println!("  {:<10} {}/10 ({} votes)", "IMDb:", rating, votes);
                }
                for rating in &details.ratings {
                    println!("  {:<10} {} ({})", "Rating:", rating.value, rating.source);
                }
                if let Some(plot) = details.plot.as_deref() {
                    println!();
                    println!("{}", plot);
                }
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&serde_json::to_value(details).unwrap_or_default());
            }
        }
    }

    pub fn print_json(&self, value: &serde_json::Value) {
        match self.format {
            OutputFormat::Json => println!("{}", value),
            OutputFormat::JsonPretty => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
                );
            }
            OutputFormat::Human => {}
        }
    }
}

fn print_field(label: &str, value: Option<&str>) {
    if let Some(value) = value {
        println!("  {:<10} {}", format!("{}:", label), value);
    }
}

fn kind_label(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Movie => "movie",
        MediaKind::Series => "series",
        MediaKind::Episode => "episode",
    }
}
