//! Six Nations statistics CLI
//!
//! Filter the historical results by year range and team, then print KPIs,
//! trends, team rankings and the home-scoring heatmap.

use clap::{Parser, Subcommand};
use sixnations_bi::report::OutputFormat;
use sixnations_bi::{Config, Result};

#[derive(Parser)]
#[command(name = "sixnations")]
#[command(about = "Six Nations match statistics (2000-2024)", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "sixnations.toml")]
    config: String,

    /// Results CSV (overrides the config file)
    #[arg(long)]
    data: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// KPIs, trends, rankings and heatmap for a selection
    Summary {
        /// First year to include (default: earliest in the data)
        #[arg(long)]
        from: Option<u16>,
        /// Last year to include (default: latest in the data)
        #[arg(long)]
        to: Option<u16>,
        /// Only matches this team played, home or away
        #[arg(long)]
        team: Option<String>,
        /// Output format
        #[arg(long, default_value = "table")]
        format: OutputFormat,
        /// Show only the top N teams in the ranking
        #[arg(long)]
        top: Option<usize>,
        /// Skip the heatmap in table output
        #[arg(long)]
        no_heatmap: bool,
    },
    /// List the teams in the data
    Teams,
    /// Show what the results table contains
    Status,
    /// Write a default config file
    Init,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    let mut config = if std::path::Path::new(&cli.config).exists() {
        match Config::load(&cli.config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };
    if let Some(path) = cli.data {
        config.data.csv_path = path;
    }

    let result = match cli.command {
        Commands::Summary {
            from,
            to,
            team,
            format,
            top,
            no_heatmap,
        } => {
            if top.is_some() {
                config.report.rank_limit = top;
            }
            if no_heatmap {
                config.report.show_heatmap = false;
            }
            commands::summary(&config, from, to, team, format)
        }
        Commands::Teams => commands::teams(&config),
        Commands::Status => commands::status(&config),
        Commands::Init => commands::init(&cli.config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

mod commands {
    use super::*;
    use sixnations_bi::{aggregate, report, FilterCriteria, TableCache, YearRange};

    pub fn init(config_path: &str) -> Result<()> {
        let config = Config::default();
        config.save(config_path)?;
        println!("Created default config at {}", config_path);

        println!("\nNext steps:");
        println!("  1. Put the results CSV at {}", config.data.csv_path);
        println!("  2. Run 'sixnations status' to check it loads");
        println!("  3. Run 'sixnations summary --from 2015 --team France'");

        Ok(())
    }

    pub fn status(config: &Config) -> Result<()> {
        let cache = TableCache::new(&config.data.csv_path);
        let table = cache.get()?;

        println!("Results Table");
        println!("───────────────────────────────");
        println!("  Path:     {}", config.data.csv_path);
        println!("  Matches:  {}", table.len());
        println!("  Teams:    {}", table.teams().len());
        if let Some((min, max)) = table.year_bounds() {
            println!("  Years:    {} to {}", min, max);
        }
        for (decade, count) in table.decade_counts() {
            println!("  {}:    {} matches", decade, count);
        }

        Ok(())
    }

    pub fn teams(config: &Config) -> Result<()> {
        let cache = TableCache::new(&config.data.csv_path);
        for team in cache.get()?.teams() {
            println!("{}", team);
        }
        Ok(())
    }

    pub fn summary(
        config: &Config,
        from: Option<u16>,
        to: Option<u16>,
        team: Option<String>,
        format: OutputFormat,
    ) -> Result<()> {
        let cache = TableCache::new(&config.data.csv_path);
        let table = cache.get()?;

        let full = FilterCriteria::full_range(table).year_range;
        let mut filter = FilterCriteria::new(YearRange::new(
            from.unwrap_or(full.min),
            to.unwrap_or(full.max),
        ));
        if let Some(team) = team {
            if !table.teams().contains(&team.as_str()) {
                log::warn!("Team '{}' does not appear in the data", team);
            }
            filter = filter.with_team(team);
        }

        let result = aggregate(table, &filter);
        print!("{}", report::render(&result, format, &config.report)?);
        if format == OutputFormat::Json {
            println!();
        }
        Ok(())
    }
}
