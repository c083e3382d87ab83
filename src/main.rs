use bing_wallpaper::{config, output, pipeline};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bing-wallpaper")]
#[command(about = "Collect the Bing wallpaper of the day into Markdown")]
#[command(long_about = "\
Collect the Bing wallpaper of the day into Markdown

Each run fetches today's image from the Bing image archive API, prepends it
to bing-wallpaper.md and regenerates README.md with a gallery of every
wallpaper collected so far.

Files (relative to --dir):

  wallpaper.toml       # Optional config (run 'bing-wallpaper gen-config')
  bing-wallpaper.md    # Archive, read back on every run
  README.md            # Gallery page

Running without a subcommand is the same as 'bing-wallpaper run'.")]
#[command(version)]
struct Cli {
    /// Directory holding the config and the generated files
    #[arg(long, default_value = ".", global = true)]
    dir: PathBuf,

    /// Log debug details (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch today's wallpaper and rewrite both Markdown files
    Run,
    /// Read the archive and report what it holds, without fetching
    Check,
    /// Print a stock wallpaper.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => {
            let config = config::load_config(&cli.dir)?;
            let timestamp = pipeline::timestamp_now();
            let report = pipeline::run(&config, &cli.dir, &timestamp)?;
            output::print_run_output(&report);
        }
        Command::Check => {
            let config = config::load_config(&cli.dir)?;
            let report = pipeline::check(&config, &cli.dir)?;
            output::print_check_output(&report);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose {
        "bing_wallpaper=debug"
    } else {
        "bing_wallpaper=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
