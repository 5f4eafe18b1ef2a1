use bin_packer3d::job::{CuboidSpec, PackJob};
use bin_packer3d::report::PackingReport;
use bin_packer3d::{Packager, SortDirection, Strategy, render};
use clap::Parser;
use tracing::Level;

#[derive(Parser)]
#[command(name = "bin_packer3d", about = "3D bin packing with weight limits")]
struct Cli {
    /// Bins as ID:LxHxB:max_weight (e.g. small:4x4x5:50)
    #[arg(long = "bin", num_args = 1..)]
    bins: Vec<String>,

    /// Items as ID:LxHxB:weight (e.g. 1:1x4x2:5)
    #[arg(long = "item", num_args = 1..)]
    items: Vec<String>,

    /// Read bins, items and options from a JSON job file instead
    #[arg(long, conflicts_with_all = ["bins", "items"])]
    input: Option<std::path::PathBuf>,

    /// Ordering heuristic: first-fit, first-fit-decreasing, or heaviest-first
    #[arg(long, default_value = "first-fit", value_parser = parse_strategy)]
    strategy: Strategy,

    /// Sort direction: asc or desc (also 1 / -1)
    #[arg(long, default_value = "desc", allow_hyphen_values = true, value_parser = parse_direction)]
    sort: SortDirection,

    /// Digits after the decimal point in the output
    #[arg(long, allow_hyphen_values = true)]
    precision: Option<i64>,

    /// Print the full report as JSON
    #[arg(long)]
    json: bool,

    /// Show a top-down ASCII layout of each used bin
    #[arg(long)]
    layout: bool,

    /// Log every placement decision to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn parse_strategy(s: &str) -> Result<Strategy, String> {
    s.parse().map_err(|e: bin_packer3d::Error| e.to_string())
}

fn parse_direction(s: &str) -> Result<SortDirection, String> {
    s.parse().map_err(|e: bin_packer3d::Error| e.to_string())
}

fn parse_dimensions(s: &str) -> Result<(f64, f64, f64), String> {
    let parts: Vec<&str> = s.split('x').collect();
    if parts.len() != 3 {
        return Err(format!("invalid dimensions '{}', expected LxHxB", s));
    }
    let parse = |p: &str, name: &str| {
        p.parse::<f64>()
            .map_err(|_| format!("invalid {} in '{}'", name, s))
    };
    Ok((
        parse(parts[0], "length")?,
        parse(parts[1], "height")?,
        parse(parts[2], "breadth")?,
    ))
}

fn parse_cuboid(s: &str) -> Result<CuboidSpec, String> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 3 {
        return Err(format!("invalid definition '{}', expected ID:LxHxB:weight", s));
    }
    if parts[0].is_empty() {
        return Err(format!("missing id in '{}'", s));
    }
    let (length, height, breadth) = parse_dimensions(parts[1])?;
    let weight = parts[2]
        .parse::<f64>()
        .map_err(|_| format!("invalid weight in '{}'", s))?;
    Ok(CuboidSpec::new(parts[0], length, height, breadth, weight))
}

fn load_job(cli: &Cli) -> Result<PackJob, String> {
    if let Some(path) = &cli.input {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        return serde_json::from_str(&text)
            .map_err(|e| format!("invalid job file {}: {}", path.display(), e));
    }

    let bins = cli
        .bins
        .iter()
        .map(|b| parse_cuboid(b))
        .collect::<Result<Vec<_>, _>>()?;
    let items = cli
        .items
        .iter()
        .map(|i| parse_cuboid(i))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(PackJob {
        bins,
        items,
        strategy: cli.strategy.to_string(),
        sort: cli.sort,
        precision: cli.precision,
    })
}

fn run(cli: &Cli) -> Result<(PackingReport, Packager), String> {
    let job = load_job(cli)?;
    let (packager, precision) = job.pack().map_err(|e| e.to_string())?;
    Ok((PackingReport::from_packager(&packager, precision), packager))
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let (report, packager) = run(&cli).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    if cli.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    for (bin, packed) in report.bins.iter().zip(packager.bins()) {
        println!(
            "Bin {} ({}x{}x{}, max weight {}):",
            bin.id, bin.length, bin.height, bin.breadth, bin.max_weight
        );
        for item in &bin.fitted_items {
            let [x, y, z] = item.position;
            println!(
                "  {} {}x{}x{} @ ({}, {}, {}) rotation {}",
                item.id, item.length, item.height, item.breadth, x, y, z, item.rotation
            );
        }
        println!(
            "  fitted volume {} / {}, weight {} / {}",
            bin.total_fitted_volume, bin.volume, bin.total_fitted_weight, bin.max_weight
        );
        if cli.layout && !packed.fitted_items().is_empty() {
            print!("{}", render::render_bin(packed));
        }
        println!();
    }

    if !report.unfitted_items.is_empty() {
        let ids: Vec<&str> = report.unfitted_items.iter().map(|i| i.id.as_str()).collect();
        println!("Unfitted: {}", ids.join(", "));
    }

    println!(
        "Summary: {} item{} fitted into {} bin{} ({} strategy), lower bound {}",
        report.fitted_count(),
        if report.fitted_count() == 1 { "" } else { "s" },
        report.bins_used(),
        if report.bins_used() == 1 { "" } else { "s" },
        report.strategy,
        report.lower_bound,
    );
}
