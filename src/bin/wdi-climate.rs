use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use std::path::{Path, PathBuf};
use wdi_climate::slice::{self, CountryScope};
use wdi_climate::viz::ChartFormat;
use wdi_climate::{AnalysisConfig, SourceTable, corr, report, stats, storage};

#[derive(Parser, Debug)]
#[command(
    name = "wdi-climate",
    version,
    about = "Slice World Bank WDI exports and chart climate indicators"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render every configured chart (bar charts, time series, heatmaps).
    Run(RunArgs),
    /// Export one indicator slice to CSV or JSON.
    Slice(SliceArgs),
    /// Print (and optionally save) the indicator correlation matrix for a country.
    Corr(CorrArgs),
    /// Print the default configuration as JSON.
    Config,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ImageFormat {
    Svg,
    Png,
}

impl From<ImageFormat> for ChartFormat {
    fn from(f: ImageFormat) -> Self {
        match f {
            ImageFormat::Svg => ChartFormat::Svg,
            ImageFormat::Png => ChartFormat::Png,
        }
    }
}

#[derive(Args, Debug)]
struct RunArgs {
    /// World Bank wide-format CSV export.
    #[arg(short, long)]
    data: PathBuf,
    /// JSON configuration (defaults to the built-in climate report).
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Directory receiving the charts.
    #[arg(short, long, default_value = "charts")]
    out_dir: PathBuf,
    /// Image format of the charts.
    #[arg(long, value_enum, default_value_t = ImageFormat::Svg)]
    format: ImageFormat,
    /// Print per-country statistics for every bar-chart indicator.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

#[derive(Args, Debug)]
struct SliceArgs {
    #[arg(short, long)]
    data: PathBuf,
    /// Indicator code (e.g., AG.LND.FRST.ZS).
    #[arg(short, long)]
    indicator: String,
    /// Append the cross-country "World" average row.
    #[arg(long, default_value_t = false)]
    world: bool,
    /// Write years as rows and countries as columns.
    #[arg(long, default_value_t = false)]
    transpose: bool,
    /// Output file; format inferred from the extension (csv or json).
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct CorrArgs {
    #[arg(short, long)]
    data: PathBuf,
    /// Country name, or "World" for the cross-country average.
    #[arg(long, default_value = "World")]
    country: String,
    /// Indicator codes separated by comma or semicolon (defaults to the configured heatmap set).
    #[arg(short, long)]
    indicators: Option<String>,
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Save the matrix (csv or json by extension).
    #[arg(long)]
    out: Option<PathBuf>,
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            // Format up to 4 decimals, then trim trailing zeros and trailing dot.
            let s = format!("{:.4}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

fn parse_list(s: &str) -> Vec<String> {
    s.split([',', ';'])
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    match path {
        Some(p) => AnalysisConfig::from_path(p),
        None => Ok(AnalysisConfig::default()),
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("csv")
        .to_ascii_lowercase()
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Slice(args) => cmd_slice(args),
        Command::Corr(args) => cmd_corr(args),
        Command::Config => {
            println!("{}", serde_json::to_string_pretty(&AnalysisConfig::default())?);
            Ok(())
        }
    }
}

fn cmd_run(args: RunArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let source = SourceTable::from_path(&args.data)?;
    let written = report::run(&source, &config, &args.out_dir, args.format.into())?;
    eprintln!("Wrote {} charts to {}", written.len(), args.out_dir.display());

    if args.stats {
        for code in &config.bar_indicators {
            let slices = slice::load_indicator(&source, code);
            let augmented = slice::with_world_average(&slices.by_country);
            let selected = augmented.select_rows(&config.countries);
            for s in stats::summarize(&selected) {
                println!(
                    "{} • {}  count={} missing={}  min={} max={} mean={} median={}",
                    s.key,
                    code,
                    s.count,
                    s.missing,
                    fmt_opt(s.min),
                    fmt_opt(s.max),
                    fmt_opt(s.mean),
                    fmt_opt(s.median)
                );
            }
        }
    }
    Ok(())
}

fn cmd_slice(args: SliceArgs) -> Result<()> {
    let slices = slice::read_indicator(&args.data, &args.indicator)?;
    let by_country = if args.world {
        slice::with_world_average(&slices.by_country)
    } else {
        slices.by_country
    };
    info!("{} rows for {}", by_country.n_rows(), args.indicator);

    match extension_of(&args.out).as_str() {
        "csv" if args.transpose => storage::save_table_csv(&by_country.transpose(), "year", &args.out)?,
        "csv" => storage::save_table_csv(&by_country, "country", &args.out)?,
        "json" if args.transpose => storage::save_json(&by_country.transpose(), &args.out)?,
        "json" => storage::save_json(&by_country, &args.out)?,
        other => bail!("unsupported format: {}", other),
    }
    eprintln!("Saved {} rows to {}", by_country.n_rows(), args.out.display());
    Ok(())
}

fn cmd_corr(args: CorrArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let codes = match args.indicators.as_deref() {
        Some(list) => parse_list(list),
        None => config.heatmap_indicators.clone(),
    };
    if codes.is_empty() {
        bail!("no indicator codes given");
    }
    let scope = CountryScope::from_name(&args.country);
    let country = slice::read_country(&args.data, &scope)?;
    let matrix = corr::indicator_correlations(&country, &codes);

    println!("{}\t{}", scope, matrix.codes().join("\t"));
    for (code, row) in matrix.codes().iter().zip(matrix.values()) {
        let cells: Vec<String> = row
            .iter()
            .map(|v| if v.is_finite() { format!("{v:.3}") } else { "NaN".into() })
            .collect();
        println!("{}\t{}", code, cells.join("\t"));
    }

    if let Some(path) = args.out.as_ref() {
        match extension_of(path).as_str() {
            "csv" => storage::save_matrix_csv(&matrix, path)?,
            "json" => storage::save_json(&matrix, path)?,
            other => bail!("unsupported format: {}", other),
        }
        eprintln!("Saved matrix to {}", path.display());
    }
    Ok(())
}
