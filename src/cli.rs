//! CLI definitions for CCA
//!
//! This module contains the clap CLI structure definitions, separated from
//! main.rs so they stay testable from the library side.

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};
use clap_complete::Shell as CompletionShell;

/// Build clap styles using our theme colors.
///
/// - Green: headers, usage, command names (accent color)
/// - White: descriptions, placeholders (renders as light gray on dark terminals)
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

#[derive(Parser)]
#[command(name = "cca")]
#[command(about = "[ Code Complexity Analyzer ] - analyze the complexity of your code with AI!")]
#[command(
    long_about = "Code Complexity Analyzer (CCA) - AI-powered complexity analysis for source code.

CCA sends your code to the Gemini generative-language API and parses the
reply into time complexity, space complexity and an explanation, or into
free-form optimization suggestions.

QUICK START:
    cca analyze main.rs            Analyze a file (language inferred)
    cat algo.py | cca analyze -l Python
    cca optimize main.rs           Ask for optimization suggestions

CONFIGURATION:
    cca config show                Display the current configuration
    cca languages list             Show the configured language set

The API key is read from api_key in ~/.config/cca/config.toml or the
GEMINI_API_KEY environment variable."
)]
#[command(version)]
#[command(styles = build_cli_styles())]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze time and space complexity of code
    #[command(long_about = "Analyze the time and space complexity of a piece of code.

Sends the code to the Gemini API and prints a structured report with the
time complexity, space complexity and the model's explanation. When no
file is given, code is read from stdin.

EXAMPLES:
    cca analyze src/main.rs              Analyze a file, language inferred
    cca analyze algo.py                  Python inferred from the extension
    cat snippet.txt | cca analyze --language C++
    cca analyze legacy.f90 -l Fortran    Any language name is accepted")]
    Analyze {
        /// Path to the source file (stdin when omitted)
        #[arg(help = "Path to the source file (reads stdin when omitted)")]
        file: Option<String>,
        /// Language of the code (inferred from the extension when omitted)
        #[arg(long, short, help = "Language of the code (overrides inference)")]
        language: Option<String>,
    },

    /// Suggest optimizations for code
    #[command(long_about = "Ask the Gemini API for optimization suggestions.

The model's suggestions are printed verbatim (trimmed), without the
structured complexity report.

EXAMPLES:
    cca optimize src/main.rs
    cat hot_loop.c | cca optimize --language C")]
    Optimize {
        /// Path to the source file (stdin when omitted)
        #[arg(help = "Path to the source file (reads stdin when omitted)")]
        file: Option<String>,
        /// Language of the code (inferred from the extension when omitted)
        #[arg(long, short, help = "Language of the code (overrides inference)")]
        language: Option<String>,
    },

    /// Manage configured languages
    #[command(
        subcommand,
        long_about = "Manage the list of languages CCA offers for analysis.

The list only drives extension inference warnings; any language name can
be passed to --language regardless of the list.

EXAMPLES:
    cca languages list               Show configured languages
    cca languages add Go             Add Go to the list
    cca languages remove JavaScript  Remove JavaScript from the list"
    )]
    Languages(LanguageCommands),

    /// Configuration management
    #[command(
        subcommand,
        long_about = "View and edit the CCA configuration file.

Configuration is stored in ~/.config/cca/config.toml and includes the API
model, endpoint, timeout, optional API key and the language list.

EXAMPLES:
    cca config show          Display current configuration
    cca config edit          Open config in $EDITOR"
    )]
    Config(ConfigCommands),

    /// Generate shell completions (internal use)
    #[command(hide = true)]
    Completions {
        /// Shell to generate completions for
        #[arg(long, value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand)]
pub enum LanguageCommands {
    /// List all configured languages
    List,
    /// Add a language to the configuration
    Add {
        /// Language name to add
        #[arg(help = "Name of the language (e.g., Go, Kotlin)")]
        name: String,
    },
    /// Remove a language from the configuration
    Remove {
        /// Language name to remove
        #[arg(help = "Name of the language to remove")]
        name: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration as TOML
    Show,
    /// Open configuration file in your default editor
    #[command(long_about = "Open the configuration file in your default editor.

Uses the $EDITOR environment variable (defaults to 'vi').
Config file location: ~/.config/cca/config.toml")]
    Edit,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn analyze_accepts_language_flag() {
        let cli = Cli::try_parse_from(["cca", "analyze", "main.rs", "--language", "Rust"]).unwrap();
        match cli.command {
            Commands::Analyze { file, language } => {
                assert_eq!(file.as_deref(), Some("main.rs"));
                assert_eq!(language.as_deref(), Some("Rust"));
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn analyze_file_is_optional() {
        let cli = Cli::try_parse_from(["cca", "analyze", "-l", "Python"]).unwrap();
        match cli.command {
            Commands::Analyze { file, language } => {
                assert!(file.is_none());
                assert_eq!(language.as_deref(), Some("Python"));
            }
            _ => panic!("expected analyze"),
        }
    }
}
