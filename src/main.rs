use anyhow::{anyhow, Context, Result};
use bmirs::display;
use bmirs::error::ErrorSeverity;
use bmirs::logging::{init_logging, LogLevel};
use bmirs::{evaluate, AppConfig, BmiRsError, ExportManager, GaugeTransition, Session, SexAdjustment};
use clap::{Parser, Subcommand};
use colored::*;
use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;

/// bmirs - Body Mass Index calculator
///
/// Computes BMI from weight (kg) and height (cm or m), classifies it and
/// keeps a history of the computations made in an interactive session.
#[derive(Parser)]
#[command(name = "bmirs")]
#[command(author = "bmirs Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Body Mass Index calculator", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute BMI once and print the result
    Compute {
        /// Weight in kilograms
        #[arg(short, long, allow_hyphen_values = true)]
        weight: String,

        /// Height in centimeters, or meters if 3 or less
        #[arg(short = 'H', long, allow_hyphen_values = true)]
        height: String,

        /// Sex adjustment (none, male, female)
        #[arg(short, long)]
        sex: Option<SexAdjustment>,

        /// Output format (text, json)
        #[arg(short = 'f', long, default_value = "text")]
        format: String,
    },

    /// Start an interactive session that keeps a history
    Interactive {
        /// Sex adjustment used when a line does not name one
        #[arg(short, long)]
        sex: Option<SexAdjustment>,
    },

    /// Show or initialize the configuration file
    Config {
        /// Print the active configuration
        #[arg(short, long)]
        show: bool,

        /// Write a default configuration file
        #[arg(short, long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::default_config_path);
    let mut config = if cli.config.is_some() {
        AppConfig::load_from_file(&config_path)?
    } else {
        AppConfig::load_or_default()
    };

    // Set up logging based on verbosity
    config.logging.level = LogLevel::from_verbosity(cli.verbose, config.logging.level);
    init_logging(&config.logging)?;

    if cli.no_color || !config.display.color || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Compute { weight, height, sex, format } => {
            let sex = sex.unwrap_or(config.defaults.sex);
            let outcome = evaluate(&weight, &height, sex)
                .map_err(|err| anyhow!(BmiRsError::from(err).user_message()))?;

            match format.to_lowercase().as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&outcome)?),
                "text" => println!("{}", display::render_outcome(&outcome, config.display.gauge_width)),
                other => return Err(anyhow!("Unsupported output format: {}", other)),
            }
        }

        Commands::Interactive { sex } => {
            let sex = sex.unwrap_or(config.defaults.sex);
            run_interactive(&config, sex)?;
        }

        Commands::Config { show, init } => {
            if init {
                config.save_to_file(&config_path)?;
                println!("{} {}", "✓ Configuration written to".green(), config_path.display());
            }
            if show || !init {
                println!("{}", toml::to_string_pretty(&config)?);
            }
        }
    }

    Ok(())
}

fn run_interactive(config: &AppConfig, default_sex: SexAdjustment) -> Result<()> {
    let mut session = Session::new();
    let stdin = std::io::stdin();
    let animate = config.display.animate && std::io::stdout().is_terminal();

    println!("{}", "BMI Calculator".bold());
    println!("{}", "Enter '<weight> <height> [none|male|female]', or 'help'.".dimmed());
    println!("{}", display::render_result(&session.view(), config.display.gauge_width));

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read input")?;
        let mut parts = line.split_whitespace();

        match parts.next() {
            None => continue,
            Some("quit") | Some("exit") => break,
            Some("help") => print_help(),
            Some("history") => {
                println!("{}", display::render_history(session.history(), &config.display.date_format));
            }
            Some("stats") => match session.history().summary() {
                Some(summary) => println!("{}", display::render_summary(&summary)),
                None => println!("{}", "No entries yet".dimmed()),
            },
            Some("export") => {
                let Some(path) = parts.next() else {
                    println!("{}", "Usage: export <path> [csv|json|text]".yellow());
                    continue;
                };
                if let Err(err) = export_history(config, &session, path, parts.next()) {
                    match err.severity() {
                        ErrorSeverity::Warning | ErrorSeverity::Info => tracing::warn!(error = %err, "export skipped"),
                        _ => tracing::error!(error = %err, "export failed"),
                    }
                    println!("{}", err.user_message().red());
                }
            }
            #[cfg(feature = "charts")]
            Some("chart") => {
                let Some(path) = parts.next() else {
                    println!("{}", "Usage: chart <path.svg>".yellow());
                    continue;
                };
                let path = config.export.resolve(path);
                let series = session.history().chart_series(&config.display.date_format);
                match bmirs::export::chart::render_svg(&series, &path) {
                    Ok(()) => println!("{} {}", "✓ Chart written to".green(), path.display()),
                    Err(err) => println!("{}", BmiRsError::from(err).user_message().red()),
                }
            }
            Some(weight) => {
                let height = parts.next().unwrap_or("");
                let sex = match parts.next() {
                    Some(text) => match text.parse::<SexAdjustment>() {
                        Ok(sex) => sex,
                        Err(message) => {
                            println!("{}", message.red());
                            continue;
                        }
                    },
                    None => default_sex,
                };

                let transition = session.submit(weight, height, sex).ok().map(|(_, t)| t);
                if let (Some(transition), true) = (transition, animate) {
                    play_transition(&transition, config.display.gauge_width)?;
                }
                println!("{}", display::render_result(&session.view(), config.display.gauge_width));
            }
        }
    }

    tracing::info!(entries = session.history().len(), "session ended");
    Ok(())
}

fn export_history(
    config: &AppConfig,
    session: &Session,
    path: &str,
    format: Option<&str>,
) -> bmirs::Result<()> {
    let format = match format {
        Some(text) => bmirs::ExportFormat::from_str(text)?,
        None => config.export.format_for(path),
    };
    let path = config.export.resolve(path);

    let written = ExportManager::new().export(session.history(), format, &path)?;
    println!(
        "{} {} entries to {}",
        "✓ Exported".green(),
        written,
        path.display()
    );
    Ok(())
}

/// Redraw the gauge line in place while the marker moves
fn play_transition(transition: &GaugeTransition, width: usize) -> Result<()> {
    const FRAMES: usize = 15;
    let frame_time = transition.duration / (FRAMES as u32 - 1);
    let mut stdout = std::io::stdout();

    for position in transition.frames(FRAMES) {
        write!(stdout, "\r{}", display::render_gauge(position, width))?;
        stdout.flush()?;
        std::thread::sleep(frame_time);
    }
    writeln!(stdout, "\r{}", " ".repeat(width))?;
    Ok(())
}

fn print_help() {
    println!("{}", "Commands:".bold());
    println!("  <weight> <height> [sex]   compute BMI (height in cm, or m if 3 or less)");
    println!("  history                   show all entries");
    println!("  stats                     summary statistics");
    println!("  export <path> [format]    write history as csv, json or text");
    #[cfg(feature = "charts")]
    println!("  chart <path.svg>          draw the BMI chart");
    println!("  quit                      leave the session");
}
