use clap::Parser;
use colored::Colorize;
use depmisuse::analysis::{Classification, DependencyClassifier, ShadowingMode};
use depmisuse::batch::{BatchRunner, ProjectOutcome};
use depmisuse::config::{Config, ProjectConfig};
use depmisuse::report::{ProjectReport, ReportFormat, Reporter};
use miette::{miette, IntoDiagnostic, Result, WrapErr};
use std::path::PathBuf;
use tracing::{info, warn};

/// depmisuse - Unused direct and used transitive dependency detection
#[derive(Parser, Debug)]
#[command(name = "depmisuse")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Project root (config lookup and relative project paths)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Declared dependencies JSON (single project mode)
    #[arg(long, value_name = "FILE", requires = "used_classes")]
    declared: Option<PathBuf>,

    /// Used classes, one fully qualified name per line (single project mode)
    #[arg(long, value_name = "FILE", requires = "declared")]
    used_classes: Option<PathBuf>,

    /// Write unused direct dependencies to this file
    #[arg(long, value_name = "FILE")]
    unused_output: Option<PathBuf>,

    /// Write used transitive dependencies (JSON) to this file
    #[arg(long, value_name = "FILE")]
    transitives_output: Option<PathBuf>,

    /// Dependency coordinate that is never reported
    #[arg(long, value_name = "COORDINATE", conflicts_with = "no_excluded_dependency")]
    excluded_dependency: Option<String>,

    /// Report every dependency, including the default excluded one
    #[arg(long)]
    no_excluded_dependency: bool,

    /// Class name prefix of platform classes ignored for transitive usage
    #[arg(long, value_name = "PREFIX", conflicts_with = "no_ambient_prefix")]
    ambient_prefix: Option<String>,

    /// Do not ignore any platform classes
    #[arg(long)]
    no_ambient_prefix: bool,

    /// Which direct classes hide transitive ones
    #[arg(long, value_enum)]
    shadowing: Option<ShadowingArg>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Output file (for json/sarif formats)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Classify configured projects in parallel
    #[arg(long)]
    parallel: bool,

    /// Exit with an error when any misuse is found
    #[arg(long)]
    strict: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Terminal,
    Json,
    Sarif,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => ReportFormat::Terminal,
            OutputFormat::Json => ReportFormat::Json,
            OutputFormat::Sarif => ReportFormat::Sarif,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum ShadowingArg {
    /// All used direct classes, independent of input order
    Complete,
    /// Only direct dependencies listed earlier (legacy behavior)
    Sequential,
}

impl From<ShadowingArg> for ShadowingMode {
    fn from(arg: ShadowingArg) -> Self {
        match arg {
            ShadowingArg::Complete => ShadowingMode::Complete,
            ShadowingArg::Sequential => ShadowingMode::Sequential,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.quiet);

    info!("depmisuse v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;
    let projects = select_projects(&cli, &config)?;

    run(&cli, &config, &projects)
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Reports go to stdout
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else {
        // Try to load from default locations
        Config::from_default_locations(&cli.path)?
    };

    // Override with CLI arguments
    if cli.no_excluded_dependency {
        config.exclusions.dependency = None;
    } else if let Some(excluded) = &cli.excluded_dependency {
        config.exclusions.dependency = Some(excluded.clone());
    }
    if cli.no_ambient_prefix {
        config.exclusions.ambient_prefix = None;
    } else if let Some(prefix) = &cli.ambient_prefix {
        config.exclusions.ambient_prefix = Some(prefix.clone());
    }
    if let Some(shadowing) = cli.shadowing {
        config.shadowing = shadowing.into();
    }

    Ok(config)
}

/// Projects to classify: the one given on the command line, or the
/// configured batch
fn select_projects(cli: &Cli, config: &Config) -> Result<Vec<ProjectConfig>> {
    if let (Some(declared), Some(used_classes)) = (&cli.declared, &cli.used_classes) {
        return Ok(vec![ProjectConfig {
            name: project_name(cli),
            declared_dependencies: declared.clone(),
            used_classes: used_classes.clone(),
            unused_output: cli.unused_output.clone(),
            transitives_output: cli.transitives_output.clone(),
        }]);
    }

    let projects = config.resolved_projects(&cli.path);
    if projects.is_empty() {
        return Err(miette!(
            "Nothing to analyze: pass --declared and --used-classes, or configure projects in {}",
            cli.path.join("depmisuse.yml").display()
        ));
    }

    Ok(projects)
}

fn project_name(cli: &Cli) -> String {
    cli.path
        .canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        .unwrap_or_else(|| "project".to_string())
}

fn run(cli: &Cli, config: &Config, projects: &[ProjectConfig]) -> Result<()> {
    use indicatif::{ProgressBar, ProgressStyle};
    use std::time::Instant;

    let start_time = Instant::now();

    let classifier = DependencyClassifier::with_options(config.classifier_options());
    info!(
        "Excluded dependency: {}, ambient prefix: {}, shadowing: {}",
        config.exclusions.dependency.as_deref().unwrap_or("none"),
        config.exclusions.ambient_prefix.as_deref().unwrap_or("none"),
        config.shadowing
    );

    let runner = BatchRunner::new(classifier).with_parallel(cli.parallel);

    let outcomes = if projects.len() > 1 && !cli.quiet {
        let pb = ProgressBar::new(projects.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .into_diagnostic()?
                .progress_chars("#>-"),
        );
        let outcomes = runner.run_with(projects, |outcome| {
            pb.set_message(outcome.name.clone());
            pb.inc(1);
        });
        pb.finish_and_clear();
        outcomes
    } else {
        runner.run(projects)
    };

    let (succeeded, failed): (Vec<ProjectOutcome>, Vec<ProjectOutcome>) =
        outcomes.into_iter().partition(ProjectOutcome::is_ok);

    // A lone project fails with its own diagnostic
    if projects.len() == 1 {
        if let Some(outcome) = failed.into_iter().next() {
            let name = outcome.name;
            return outcome
                .result
                .map(|_| ())
                .into_diagnostic()
                .wrap_err_with(|| format!("Failed to classify dependencies of {}", name));
        }
    } else {
        for outcome in &failed {
            if let Err(e) = &outcome.result {
                eprintln!("{}: {}: {}", "Error".red(), outcome.name, e);
            }
        }
    }

    let classified: Vec<(String, PathBuf, Classification)> = succeeded
        .into_iter()
        .filter_map(|outcome| {
            let ProjectOutcome {
                name,
                declared_dependencies,
                result,
            } = outcome;
            result
                .ok()
                .map(|classification| (name, declared_dependencies, classification))
        })
        .collect();

    for (name, _, classification) in &classified {
        info!("{}: {}", name, classification.stats());
    }

    let reports: Vec<ProjectReport<'_>> = classified
        .iter()
        .map(|(name, declared, classification)| ProjectReport {
            name,
            declared_dependencies: declared,
            classification,
        })
        .collect();

    let format = cli
        .format
        .map(ReportFormat::from)
        .unwrap_or_else(|| ReportFormat::from_name(&config.report.format));
    let reporter = Reporter::new(format, cli.output.clone());
    reporter.report(&reports)?;

    info!(
        "Classified {} projects in {:.2}s",
        reports.len(),
        start_time.elapsed().as_secs_f64()
    );

    let failed_count = projects.len() - reports.len();
    if failed_count > 0 {
        return Err(miette!(
            "{} of {} projects could not be classified",
            failed_count,
            projects.len()
        ));
    }

    let findings: usize = classified.iter().map(|(_, _, c)| c.finding_count()).sum();
    if cli.strict && findings > 0 {
        warn!("Strict mode: failing on {} findings", findings);
        return Err(miette!("Found {} dependency misuse issues", findings));
    }

    Ok(())
}
