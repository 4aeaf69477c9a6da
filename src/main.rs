use anyhow::{Context, Result};
use article_normalizer::config::{find_config_file, get_config, load_config, Config, ConfigFile};
use article_normalizer::models::{Article, ArticleCollection};
use clap::{Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Article Normalizer - Normalize article/DOI link JSON into one canonical collection
#[derive(Parser, Debug)]
#[command(name = "article-normalizer")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Normalize heterogeneous article JSON records into one canonical collection", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for inspection
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Read a list- or object-shaped JSON file and write the canonical form
    #[command(alias = "n")]
    Normalize {
        /// Input JSON file (default: from config)
        input: Option<PathBuf>,

        /// Output file (default: from config)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Renumber articles sequentially starting at this index
        #[arg(long)]
        reindex: Option<i64>,
    },

    /// Show a summary of the articles in a JSON file
    #[command(alias = "i")]
    Inspect {
        /// Input JSON file (default: from config)
        input: Option<PathBuf>,

        /// Output format
        #[arg(long, short, value_enum, default_value_t = OutputFormat::Auto)]
        format: OutputFormat,
    },

    /// Write the articles as an object keyed by their index
    Keyed {
        /// Input JSON file (default: from config)
        input: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Write a default configuration file
    Init {
        /// Where to write it (default: ./article-normalizer.toml)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration from file if specified or found in default locations
    let config_path = cli.config.clone().or_else(find_config_file);
    let config = match &config_path {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?,
        None => get_config(),
    };

    init_tracing(&cli, &config);

    if let Some(path) = &config_path {
        tracing::info!("Using config file: {}", path.display());
    }

    match cli.command {
        Commands::Normalize {
            input,
            output,
            reindex,
        } => {
            let input = input.unwrap_or_else(|| config.io.default_input.clone());
            let output = output.unwrap_or_else(|| config.io.default_output.clone());

            let mut collection = load(&input).await?;
            if let Some(start) = reindex {
                collection.reindex(start);
            }

            collection
                .to_json(&output)
                .await
                .with_context(|| format!("Failed to write {}", output.display()))?;

            tracing::info!(
                "Normalized {} articles: {} -> {}",
                collection.len(),
                input.display(),
                output.display()
            );
            if !cli.quiet {
                eprintln!(
                    "Normalized: {} -> {} ({} articles)",
                    input.display(),
                    output.display(),
                    collection.len()
                );
            }
        }

        Commands::Inspect { input, format } => {
            let input = input.unwrap_or_else(|| config.io.default_input.clone());
            let collection = load(&input).await?;
            output_articles(collection.articles(), format)?;
        }

        Commands::Keyed { input, output } => {
            let input = input.unwrap_or_else(|| config.io.default_input.clone());
            let collection = load(&input).await?;
            let text = serde_json::to_string_pretty(&collection.to_indexed_dict())?;

            match output {
                Some(path) => {
                    tokio::fs::write(&path, text)
                        .await
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    tracing::info!("Keyed {} articles into {}", collection.len(), path.display());
                }
                None => println!("{text}"),
            }
        }

        Commands::Config {
            command: ConfigCommands::Init { path, force },
        } => {
            let path = path.unwrap_or_else(|| PathBuf::from("article-normalizer.toml"));
            if path.exists() && !force {
                anyhow::bail!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                );
            }
            ConfigFile::default().save(&path)?;
            if !cli.quiet {
                eprintln!("Wrote default configuration to {}", path.display());
            }
        }
    }

    Ok(())
}

fn init_tracing(cli: &Cli, config: &Config) {
    let log_level = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };

    let env_filter = if cli.quiet { "error" } else { log_level };

    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("article_normalizer={}", env_filter)),
    );

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn load(path: &Path) -> Result<ArticleCollection> {
    ArticleCollection::from_json(path)
        .await
        .with_context(|| format!("Failed to load articles from {}", path.display()))
}

fn output_articles(articles: &[Article], format: OutputFormat) -> Result<()> {
    let actual_format = if format == OutputFormat::Auto {
        if std::io::stdout().is_terminal() {
            OutputFormat::Table
        } else {
            OutputFormat::Json
        }
    } else {
        format
    };

    match actual_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(articles)?);
        }
        OutputFormat::Plain => {
            for article in articles {
                println!("{}", article.title.as_deref().unwrap_or("(untitled)"));
                if let Some(ref url) = article.url {
                    println!("  URL: {}", url);
                }
                if let Some(ref author) = article.author {
                    println!("  Author: {}", author);
                }
                for doi in article.all_dois() {
                    println!("  DOI: {}", doi);
                }
                println!();
            }
        }
        OutputFormat::Table => {
            use comfy_table::{Attribute, Cell, Table};
            let mut table = Table::new();
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.set_header(vec!["#", "Title", "URL", "Links", "DOIs", "Count"]);

            for article in articles {
                table.add_row(vec![
                    Cell::new(article.index.map(|i| i.to_string()).unwrap_or_default()),
                    Cell::new(truncate(article.title.as_deref().unwrap_or(""), 50))
                        .add_attribute(Attribute::Bold),
                    Cell::new(truncate(article.url.as_deref().unwrap_or(""), 40)),
                    Cell::new(article.paperlinks.len()),
                    Cell::new(article.all_dois().len()),
                    Cell::new(article.count.map(|c| c.to_string()).unwrap_or_default()),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Auto => unreachable!(),
    }

    Ok(())
}

/// Truncate to `max` characters, appending "..." when cut
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_inspect_and_keyed() {
        let cli = Cli::parse_from(["article-normalizer", "inspect", "--format", "plain"]);
        match cli.command {
            Commands::Inspect { input, format } => {
                assert_eq!(input, None);
                assert_eq!(format, OutputFormat::Plain);
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::parse_from(["article-normalizer", "-q", "i", "data.json"]);
        assert!(cli.quiet);
        match cli.command {
            Commands::Inspect { input, format } => {
                assert_eq!(input, Some(PathBuf::from("data.json")));
                assert_eq!(format, OutputFormat::Auto);
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::parse_from(["article-normalizer", "keyed", "in.json", "-o", "keyed.json"]);
        match cli.command {
            Commands::Keyed { input, output } => {
                assert_eq!(input, Some(PathBuf::from("in.json")));
                assert_eq!(output, Some(PathBuf::from("keyed.json")));
            }
            other => panic!("unexpected command: {:?}", other),
        }

        assert!(Cli::try_parse_from(["article-normalizer", "inspect", "--format", "xml"]).is_err());
    }

    #[test]
    fn test_output_articles_explicit_formats() {
        let articles = vec![
            Article::builder()
                .title("A title long enough to be cut when shown in the summary table")
                .url("https://example.com/article")
                .doi("10.1/a")
                .index(1)
                .build(),
            Article::default(),
        ];

        for format in [OutputFormat::Table, OutputFormat::Json, OutputFormat::Plain] {
            assert!(output_articles(&articles, format).is_ok());
        }
        assert!(output_articles(&[], OutputFormat::Table).is_ok());
    }

    #[test]
    fn test_parse_normalize() {
        let cli = Cli::parse_from([
            "article-normalizer",
            "-vv",
            "normalize",
            "in.json",
            "-o",
            "out.json",
            "--reindex",
            "1",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Normalize {
                input,
                output,
                reindex,
            } => {
                assert_eq!(input, Some(PathBuf::from("in.json")));
                assert_eq!(output, Some(PathBuf::from("out.json")));
                assert_eq!(reindex, Some(1));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer title here", 10), "a longe...");
        assert_eq!(truncate("ééééééééééé", 5), "éé...");
    }
}
