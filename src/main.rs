use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use folio::{
    Config,
    portfolio::{PortfolioContent, PortfolioStore},
    server::{self, AppState},
};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

/// Serve a portfolio site's API or preview its typewriter.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// The configuration file to use.
    #[arg(short, long, global = true, env = "FOLIO_CONFIG")]
    config: Option<PathBuf>,

    /// Print the JSON schema of the configuration file and exit.
    #[cfg(feature = "json-schema")]
    #[arg(long)]
    generate_config_schema: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the REST API.
    Serve {
        /// The address to bind to.
        #[arg(long)]
        host: Option<String>,

        /// The port to listen on.
        #[arg(short, long)]
        port: Option<u16>,

        /// A YAML or JSON profile to serve instead of the configured one.
        #[arg(long)]
        portfolio: Option<PathBuf>,
    },

    /// Play the hero typewriter in the terminal until a key is pressed.
    Typewriter {
        /// Phrases to cycle through instead of the configured ones.
        phrases: Vec<String>,
    },

    /// Validate a profile file and print a summary.
    Check {
        /// The profile file.
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "json-schema")]
    if cli.generate_config_schema {
        let schema = schemars::schema_for!(Config);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    let level = match cli.command {
        Some(Command::Serve { .. }) => LevelFilter::INFO,
        _ => LevelFilter::WARN,
    };
    folio::logging::init(level);

    let mut config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    match cli.command {
        Some(Command::Serve { host, port, portfolio }) => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if portfolio.is_some() {
                config.portfolio.path = portfolio;
            }
            serve(config)
        }
        Some(Command::Typewriter { phrases }) => {
            let phrases = if phrases.is_empty() { config.typewriter.phrases.clone() } else { phrases };
            folio::preview::run(phrases, config.typewriter.timing())?;
            Ok(())
        }
        Some(Command::Check { file }) => check(file),
        None => {
            folio::preview::run(config.typewriter.phrases.clone(), config.typewriter.timing())?;
            Ok(())
        }
    }
}

fn serve(config: Config) -> Result<()> {
    let content = config.portfolio.load_content().context("loading portfolio")?;
    let state = AppState::new(PortfolioStore::seeded(content));
    let runtime = tokio::runtime::Runtime::new().context("starting runtime")?;
    runtime.block_on(server::run(&config.server, state)).context("running server")?;
    Ok(())
}

fn check(file: PathBuf) -> Result<()> {
    let content =
        PortfolioContent::from_path(&file).with_context(|| format!("invalid profile '{}'", file.display()))?;
    let skills: usize = content.skills.iter().map(|category| category.items.len()).sum();
    println!("{} ({})", content.personal.name, content.personal.title);
    println!("  projects:       {} ({} featured)", content.projects.len(), content.featured_projects().count());
    println!("  skills:         {skills} in {} categories", content.skills.len());
    println!("  experience:     {}", content.experience.len());
    println!("  certifications: {}", content.certifications.len());
    println!("  achievements:   {}", content.achievements.len());
    println!("  coding profiles: {}", content.coding_profiles.len());
    Ok(())
}
