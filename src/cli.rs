//! CLI - Command Line Interface for FlixTUI
//!
//! The same catalog the TUI browses, as scriptable subcommands.
//! Output is JSON when `--json` is given or stdout is not a terminal.
//!
//! # Examples
//!
//! ```bash
//! flixtui trending --kind anime --limit 5
//! flixtui search "blade runner" --json
//! flixtui seasons 1396
//! flixtui episodes 1396 2
//! flixtui embed 1396 --kind tv --season 2 --episode 5 --provider vidsrc.net
//! flixtui theme light
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::api::EmbedProvider;
use crate::models::{MediaKind, ThemePreference};

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Network error
    NetworkError = 3,
    /// The request worked but matched nothing
    NoResults = 5,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// FlixTUI - browse trending movies, TV and anime from the terminal
///
/// Run without arguments to launch interactive TUI.
/// Use subcommands for scriptable automation.
#[derive(Parser, Debug)]
#[command(
    name = "flixtui",
    version,
    author = "Gorka & Hermes",
    about = "Terminal catalog browser for movies, TV shows and anime",
    long_about = "Browse trending titles, search the catalog and build \
                  embed-player links for any movie or episode.\n\n\
                  Run without arguments to launch the interactive TUI.\n\
                  Use subcommands for automation and scripting.",
    after_help = "EXAMPLES:\n\
                  flixtui                                   Launch interactive TUI\n\
                  flixtui search \"blade runner\"             Search the catalog\n\
                  flixtui embed 1396 -k tv -s 2 -e 5        Episode embed link\n\
                  flixtui trending --kind anime --json      Trending anime as JSON"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Debug-level logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// This week's trending titles
    #[command(visible_alias = "tr")]
    Trending(TrendingCmd),

    /// Search for movies and TV shows
    #[command(visible_alias = "s")]
    Search(SearchCmd),

    /// List the playable seasons of a TV show
    Seasons(SeasonsCmd),

    /// List the episodes of one season
    #[command(visible_alias = "ep")]
    Episodes(EpisodesCmd),

    /// Build the embed-player URL for a movie or episode
    Embed(EmbedCmd),

    /// Show or set the persisted colour theme
    Theme(ThemeCmd),
}

/// Weekly trending titles
#[derive(Args, Debug)]
pub struct TrendingCmd {
    /// Which feed to read
    #[arg(long, short = 'k', value_enum, default_value = "movie")]
    pub kind: TrendingKind,

    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,
}

/// Trending feed selector
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrendingKind {
    #[default]
    Movie,
    Tv,
    /// Japanese animation from the TV feed
    Anime,
}

/// Search for movies and TV shows by query
#[derive(Args, Debug)]
pub struct SearchCmd {
    /// Search query (title, keywords)
    #[arg(required = true)]
    pub query: String,

    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,
}

/// Seasons of a TV show
#[derive(Args, Debug)]
pub struct SeasonsCmd {
    /// TMDB id of the show
    pub id: u64,
}

/// Episodes of one season
#[derive(Args, Debug)]
pub struct EpisodesCmd {
    /// TMDB id of the show
    pub id: u64,

    /// Season number
    pub season: u16,
}

/// Embed-player URL for a title
#[derive(Args, Debug)]
pub struct EmbedCmd {
    /// TMDB id
    pub id: u64,

    /// Movie or TV show
    #[arg(long, short = 'k', value_enum, default_value = "movie")]
    pub kind: KindArg,

    /// Embed provider (defaults to the configured one)
    #[arg(long, short = 'p', value_enum)]
    pub provider: Option<ProviderArg>,

    /// Season number (TV only)
    #[arg(long, short = 's', default_value = "1")]
    pub season: u16,

    /// Episode number (TV only)
    #[arg(long, short = 'e', default_value = "1")]
    pub episode: u16,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindArg {
    #[default]
    Movie,
    Tv,
}

impl From<KindArg> for MediaKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Movie => MediaKind::Movie,
            KindArg::Tv => MediaKind::Tv,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderArg {
    #[value(name = "vidsrc.cc", alias = "cc")]
    VidsrcCc,
    #[value(name = "vidsrc.net", alias = "net")]
    VidsrcNet,
    #[value(name = "videasy", alias = "player.videasy.net")]
    Videasy,
}

impl From<ProviderArg> for EmbedProvider {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::VidsrcCc => EmbedProvider::VidsrcCc,
            ProviderArg::VidsrcNet => EmbedProvider::VidsrcNet,
            ProviderArg::Videasy => EmbedProvider::Videasy,
        }
    }
}

/// Show or set the theme
#[derive(Args, Debug)]
pub struct ThemeCmd {
    /// New theme; omit to print the current one
    #[arg(value_enum)]
    pub theme: Option<ThemeArg>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeArg {
    Dark,
    Light,
}

impl From<ThemeArg> for ThemePreference {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Dark => ThemePreference::Dark,
            ThemeArg::Light => ThemePreference::Light,
        }
    }
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

/// Embed command response
#[derive(Debug, Serialize, Deserialize)]
pub struct EmbedResponse {
    pub id: u64,
    pub kind: MediaKind,
    pub provider: EmbedProvider,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode: Option<u16>,
    pub url: String,
}

impl fmt::Display for EmbedResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}

/// Theme command response
#[derive(Debug, Serialize, Deserialize)]
pub struct ThemeResponse {
    pub theme: ThemePreference,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<PathBuf>,
}

impl fmt::Display for ThemeResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.theme)
    }
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print one value: JSON envelope or its display form
    pub fn print<T: Serialize + fmt::Display>(&self, data: &T) -> anyhow::Result<()> {
        if self.json {
            let output = JsonOutput::success(data);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", data);
        }
        Ok(())
    }

    /// Print a list: JSON envelope or one line per item
    pub fn print_list<T: Serialize + fmt::Display>(&self, items: &[T]) -> anyhow::Result<()> {
        if self.json {
            let output = JsonOutput::success(items);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            for item in items {
                println!("{}", item);
            }
        }
        Ok(())
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
