use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::{Path, PathBuf};
use tracing::info;

use polarplot::config::{Config, ConfigOverrides};
use polarplot::data::{demo_series, DataFile};
use polarplot::renderer::{render_chart, Canvas};
use polarplot::{Plot, PolarChart, Series};

#[derive(Parser, Debug)]
#[command(name = "polarplot")]
#[command(author, version, about = "Polar chart renderer for the terminal and PNG files")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Config file path (default: ~/.config/polarplot/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// TOML data file with [[series]] tables; built-in demo data if omitted
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    #[command(flatten)]
    overrides: ConfigOverrides,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive terminal view (default)
    Show,

    /// Render the chart to a PNG file
    Render {
        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Image width in pixels
        #[arg(long, default_value = "800")]
        width: u32,

        /// Image height in pixels
        #[arg(long, default_value = "600")]
        height: u32,

        /// Highlight the ring and spoke under this point, as X,Y in pixels
        #[arg(long, value_parser = parse_point)]
        cursor: Option<(f64, f64)>,

        /// Redraw the series at this index (from 0) in the cursor color
        #[arg(long)]
        highlight: Option<usize>,
    },

    /// Write a commented default config file
    InitConfig,

    /// Print shell completions
    Completions {
        shell: Shell,
    },
}

fn parse_point(s: &str) -> std::result::Result<(f64, f64), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{}'", s))?;
    let x = x.trim().parse::<f64>().map_err(|e| e.to_string())?;
    let y = y.trim().parse::<f64>().map_err(|e| e.to_string())?;
    Ok((x, y))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(matches!(args.command, None | Some(Command::Show)))?;

    match &args.command {
        Some(Command::InitConfig) => {
            let path = Config::init_default_config()?;
            println!("Wrote default config to {}", path.display());
            return Ok(());
        }
        Some(Command::Completions { shell }) => {
            clap_complete::generate(
                *shell,
                &mut Args::command(),
                "polarplot",
                &mut std::io::stdout(),
            );
            return Ok(());
        }
        _ => {}
    }

    let mut config = load_config(args.config.as_deref())?;
    config.merge_args(&args.overrides);
    let series = load_series(args.data.as_deref(), &config)?;

    match args.command {
        Some(Command::Render {
            output,
            width,
            height,
            cursor,
            highlight,
        }) => render(&output, width, height, cursor, highlight, config, series),
        _ => show(config, series, args.config),
    }
}

/// Log to stderr, except in the terminal view where stderr shares the screen:
/// there logs go to a file in the cache directory, or nowhere.
fn init_logging(interactive: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("polarplot=info".parse()?);
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if !interactive {
        builder.with_writer(std::io::stderr).init();
        return Ok(());
    }

    let file = log_path().and_then(|path| {
        let parent = path.parent()?;
        std::fs::create_dir_all(parent).ok()?;
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .ok()
    });
    match file {
        Some(file) => builder
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .init(),
        None => builder.with_writer(std::io::sink).init(),
    }
    Ok(())
}

/// Log file for the terminal view (~/.cache/polarplot/polarplot.log)
fn log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|p| p.join("polarplot").join("polarplot.log"))
}

/// Explicit path must load; otherwise fall back to the default path, then defaults.
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            Config::load(path).with_context(|| format!("loading config {}", path.display()))
        }
        None => Ok(Config::load_from_default_path().unwrap_or_default()),
    }
}

fn load_series(path: Option<&Path>, config: &Config) -> Result<Vec<Series>> {
    match path {
        Some(path) => {
            let file = DataFile::load(path)
                .with_context(|| format!("loading data {}", path.display()))?;
            let series = file.into_series(&config.series);
            info!("Loaded {} series from {}", series.len(), path.display());
            Ok(series)
        }
        None => Ok(demo_series(&config.series)),
    }
}

fn render(
    output: &Path,
    width: u32,
    height: u32,
    cursor: Option<(f64, f64)>,
    highlight: Option<usize>,
    config: Config,
    series: Vec<Series>,
) -> Result<()> {
    if width == 0 || height == 0 {
        bail!("image size must be non-zero, got {}x{}", width, height);
    }
    if let Some(index) = highlight {
        if index >= series.len() {
            bail!("no series {} to highlight, {} loaded", index, series.len());
        }
    }

    let mut chart = PolarChart::new(&config.polar);
    let plot = Plot::new(width as f64, height as f64, config, series);
    let mut canvas = Canvas::new(width as usize, height as usize);

    render_chart(&mut canvas, &mut chart, &plot, cursor);
    if let Some(series) = highlight.and_then(|i| plot.series.get(i)) {
        chart.draw_series_highlight(
            &plot,
            &mut canvas,
            series,
            plot.config.grid.cursor_color,
            series.line_width * 2.0,
        );
    }
    canvas.save_png(output)?;
    Ok(())
}

#[cfg(feature = "terminal")]
fn show(config: Config, series: Vec<Series>, config_path: Option<PathBuf>) -> Result<()> {
    info!("Starting interactive view");
    polarplot::display::terminal::run(config, series, config_path)
}

#[cfg(not(feature = "terminal"))]
fn show(_config: Config, _series: Vec<Series>, _config_path: Option<PathBuf>) -> Result<()> {
    bail!("built without the terminal feature; use `polarplot render`")
}
