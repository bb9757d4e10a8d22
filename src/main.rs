//! Code Complexity Analyzer (CCA) - CLI entry point

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser};
use std::fs;
use std::io::Read;
use std::path::Path;

use cca::cli::{Cli, Commands, ConfigCommands, LanguageCommands};
use cca::config::language_from_extension;
use cca::{
    extract_text, parse_complexity_analysis, parse_optimization_suggestions, AnalysisRequest,
    Config, GeminiClient, TaskKind,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { file, language } => {
            run_task(file.as_deref(), language.as_deref(), TaskKind::Complexity)
        }
        Commands::Optimize { file, language } => {
            run_task(file.as_deref(), language.as_deref(), TaskKind::Optimization)
        }
        Commands::Languages(cmd) => match cmd {
            LanguageCommands::List => cmd_languages_list(),
            LanguageCommands::Add { name } => cmd_languages_add(&name),
            LanguageCommands::Remove { name } => cmd_languages_remove(&name),
        },
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => cmd_config_show(),
            ConfigCommands::Edit => cmd_config_edit(),
        },
        Commands::Completions { shell } => cmd_completions(shell),
    }
}

/// Run a complexity or optimization request end to end.
fn run_task(file: Option<&str>, language: Option<&str>, kind: TaskKind) -> Result<()> {
    let config = Config::load()?;

    let code = read_code(file)?;
    if code.trim().is_empty() {
        bail!("No code to analyze. Provide a non-empty file or pipe source on stdin.");
    }

    let language = resolve_language(file, language)?;
    if !config.is_language_enabled(&language) {
        eprintln!("Warning: Language '{}' is not in the configured list.", language);
        eprintln!("Add it with: cca languages add {}", language);
        eprintln!();
    }

    let request = AnalysisRequest::new(code, language, kind);
    let client = GeminiClient::from_config(&config.api)?;

    eprintln!("Requesting {}...", request.kind.label());
    let raw = client.generate(&request.prompt())?;

    match extract_text(&raw) {
        Ok(text) => match request.kind {
            TaskKind::Complexity => {
                let record = parse_complexity_analysis(&text, &request.language, &request.code);
                print!("{}", record);
            }
            TaskKind::Optimization => {
                println!("{}", parse_optimization_suggestions(&text));
            }
        },
        // An unextractable response is an expected outcome of the API's
        // non-guaranteed shape; the message is the result.
        Err(err) => println!("{}", err),
    }

    Ok(())
}

/// Read the code from a file, or from stdin when it is piped.
fn read_code(file: Option<&str>) -> Result<String> {
    match file {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            if atty::is(atty::Stream::Stdin) {
                bail!("No input file given and stdin is a terminal. Pass a file or pipe code in.");
            }
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read code from stdin")?;
            Ok(buffer)
        }
    }
}

/// The --language flag wins; otherwise infer from the file extension.
fn resolve_language(file: Option<&str>, language: Option<&str>) -> Result<String> {
    if let Some(lang) = language {
        return Ok(lang.to_string());
    }
    if let Some(path) = file {
        if let Some(lang) = language_from_extension(Path::new(path)) {
            return Ok(lang.to_string());
        }
    }
    bail!("Could not determine the language. Pass it with --language.");
}

fn cmd_languages_list() -> Result<()> {
    let config = Config::load()?;

    println!("Configured languages:");
    for language in &config.languages.enabled {
        println!("  {}", language);
    }
    Ok(())
}

fn cmd_languages_add(name: &str) -> Result<()> {
    let mut config = Config::load()?;

    if config.add_language(name) {
        config.save()?;
        println!("Added language: {}", name);
    } else {
        println!("Language '{}' is already configured.", name);
    }
    Ok(())
}

fn cmd_languages_remove(name: &str) -> Result<()> {
    let mut config = Config::load()?;

    if config.remove_language(name) {
        config.save()?;
        println!("Removed language: {}", name);
    } else {
        println!("Language '{}' is not in the configured list.", name);
    }
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config = Config::load()?;
    let contents = toml::to_string_pretty(&config).context("Failed to serialize config")?;
    print!("{}", contents);
    Ok(())
}

fn cmd_config_edit() -> Result<()> {
    let path = Config::config_path()?;
    if !path.exists() {
        Config::default().save()?;
    }

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    let status = std::process::Command::new(&editor)
        .arg(&path)
        .status()
        .with_context(|| format!("Failed to launch editor: {}", editor))?;

    if !status.success() {
        bail!("Editor exited with an error");
    }
    Ok(())
}

fn cmd_completions(shell: clap_complete::Shell) -> Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "cca", &mut std::io::stdout());
    Ok(())
}
