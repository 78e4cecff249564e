//! Command line shell around the fraction core
//!
//! Reads the fraction, applies config overrides, renders, and decides the
//! exit status. Nothing below this module prints or exits.

use std::cmp::Ordering;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::config::{FracpieConfig, OutputFormat, ShapeColor};
use crate::domain::{Fraction, FractionError};
use crate::render;

/// Denominators above this produce slivers too thin to tell apart
const CROWDED_SECTORS: u64 = 360;

/// Largest denominator the shell will lay out
pub const MAX_SECTORS: u64 = 100_000;

const PROMPT: &str = "Enter a fraction as numerator/denominator (e.g. 7/4 or 25/5): ";

#[derive(Parser)]
#[command(
    name = "fracpie",
    version,
    about = "Draw a fraction as a shaded pie chart",
    long_about = "Draw a fraction as a circle cut into equal sectors, shading one sector per unit.\n\n\
                  Improper and negative fractions are accepted. The picture is labelled with the\n\
                  simplified, mixed-number and reduced-remainder forms.",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub draw: DrawArgs,

    /// Raise log verbosity (-v for info, -vv for debug).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Add two fractions and show the mixed and simplified sum.
    Add {
        #[arg(allow_hyphen_values = true)]
        first: String,
        #[arg(allow_hyphen_values = true)]
        second: String,
    },
    /// Tell which of two fractions is larger.
    Compare {
        #[arg(allow_hyphen_values = true)]
        first: String,
        #[arg(allow_hyphen_values = true)]
        second: String,
    },
}

#[derive(Parser)]
pub struct DrawArgs {
    /// Fraction to draw, as N/D or "N D" (read from standard input when omitted).
    #[arg(value_name = "FRACTION", allow_hyphen_values = true)]
    pub fraction: Option<String>,

    /// Circle radius in pixels.
    #[arg(short, long, value_parser = parse_radius)]
    pub radius: Option<f64>,

    /// Output file (default: fraction_<N>_<D>.<format> in the current directory).
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output format (default: from the output extension, then the config).
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Fill color for shaded sectors, as #rrggbb.
    #[arg(long, value_name = "COLOR")]
    pub fill: Option<ShapeColor>,

    /// Save the effective settings as the new defaults.
    #[arg(long = "write-config")]
    pub write_config: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Png,
    Svg,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Png => OutputFormat::Png,
            FormatArg::Svg => OutputFormat::Svg,
        }
    }
}

fn parse_radius(s: &str) -> Result<f64, String> {
    let radius: f64 = s.parse().map_err(|_| format!("{s:?} is not a number"))?;
    if radius > 0.0 && radius.is_finite() {
        Ok(radius)
    } else {
        Err("radius must be a positive number".to_string())
    }
}

/// Default env_logger filter for the given `-v` count
pub fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Run the parsed command line and map the outcome to an exit status
pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Some(Command::Add { first, second }) => add(&first, &second),
        Some(Command::Compare { first, second }) => compare(&first, &second),
        None => draw(cli.draw),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Prompt for one line on stdin, `None` when input ends first
fn read_fraction_line(
    input: &mut impl BufRead,
    prompt_to: &mut impl Write,
) -> io::Result<Option<String>> {
    write!(prompt_to, "{PROMPT}")?;
    prompt_to.flush()?;
    let mut line = String::new();
    match input.read_line(&mut line)? {
        0 => Ok(None),
        _ => Ok(Some(line)),
    }
}

/// `fraction_7_4`, with a negative numerator spelled `neg`
pub fn default_file_stem(fraction: &Fraction) -> String {
    let n = fraction.numerator();
    let sign = if n < 0 { "neg" } else { "" };
    format!(
        "fraction_{sign}{}_{}",
        n.unsigned_abs(),
        fraction.denominator()
    )
}

/// Refuse sector counts the layout cannot hold in memory
pub fn check_sector_count(fraction: &Fraction) -> anyhow::Result<()> {
    let sectors = fraction.denominator();
    if sectors > MAX_SECTORS {
        anyhow::bail!(
            "Cannot draw {sectors} sectors, the denominator must be at most {MAX_SECTORS}"
        );
    }
    if sectors > CROWDED_SECTORS {
        log::warn!("{sectors} sectors will be hard to tell apart");
    }
    Ok(())
}

/// Pick the format from the flag, then the output extension, then the config
pub fn resolve_format(args: &DrawArgs, config: &FracpieConfig) -> OutputFormat {
    args.format
        .map(OutputFormat::from)
        .or_else(|| args.output.as_deref().and_then(OutputFormat::from_path))
        .unwrap_or(config.default_format)
}

fn draw(args: DrawArgs) -> anyhow::Result<()> {
    let input = match args.fraction.clone() {
        Some(fraction) => fraction,
        None => {
            let stdin = io::stdin();
            match read_fraction_line(&mut stdin.lock(), &mut io::stdout())
                .context("Failed to read from standard input")?
            {
                Some(line) => line,
                None => {
                    println!("\nInput cancelled. Exiting.");
                    return Ok(());
                }
            }
        }
    };

    let fraction = Fraction::parse(&input)?;
    check_sector_count(&fraction)?;

    let mut config = FracpieConfig::load();
    if let Some(radius) = args.radius {
        config.radius = radius;
    }
    if let Some(fill) = args.fill {
        config.fill_color = fill;
    }
    let format = resolve_format(&args, &config);
    if args.write_config {
        config.default_format = format;
        config.save();
    }

    let path = args.output.unwrap_or_else(|| {
        PathBuf::from(format!(
            "{}.{}",
            default_file_stem(&fraction),
            format.extension()
        ))
    });
    render::render_to_file(&fraction, &config, format, &path)?;
    log::info!("Rendered {} to {}", fraction, path.display());
    println!("Saved {}", path.display());
    Ok(())
}

/// Lines printed by `fracpie add`
pub fn add_report(a: &Fraction, b: &Fraction) -> Result<Vec<String>, FractionError> {
    let sum = a.checked_add(b)?;
    let mixed = sum.to_mixed();
    let simplified = sum.simplify();

    let mut lines = vec![format!("{a} + {b} = {sum}")];
    if mixed.whole > 0 {
        lines.push(format!("= {mixed}"));
    }
    if sum.numerator() == 0 {
        lines.push("Already in simplest form".to_string());
    } else if simplified.denominator.get() != sum.denominator() {
        lines.push(format!("Simplified: {}{simplified}", mixed.sign()));
    } else if mixed.whole == 0 {
        lines.push("Already in simplest form".to_string());
    }
    Ok(lines)
}

/// Lines printed by `fracpie compare`
pub fn compare_report(a: &Fraction, b: &Fraction) -> Vec<String> {
    let verdict = match a.cmp_value(b) {
        Ordering::Greater => format!("{a} is larger than {b}"),
        Ordering::Less => format!("{b} is larger than {a}"),
        Ordering::Equal => format!("{a} equals {b}"),
    };
    vec![
        verdict,
        format!("({:.3} vs {:.3})", a.to_f64(), b.to_f64()),
    ]
}

fn add(first: &str, second: &str) -> anyhow::Result<()> {
    let a = Fraction::parse(first)?;
    let b = Fraction::parse(second)?;
    for line in add_report(&a, &b)? {
        println!("{line}");
    }
    Ok(())
}

fn compare(first: &str, second: &str) -> anyhow::Result<()> {
    let a = Fraction::parse(first)?;
    let b = Fraction::parse(second)?;
    for line in compare_report(&a, &b) {
        println!("{line}");
    }
    Ok(())
}
