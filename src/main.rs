use anyhow::{bail, Context};
use candidate_finder::apis::{load_raw_records, HttpSearchClient};
use candidate_finder::config::Config;
use candidate_finder::export::{columns, export_to_path, row};
use candidate_finder::{
    build_table, logging, ExperienceRange, FacetOptions, FilterCriteria, NormalizedCandidateRecord,
    SearchNotice, SearchRequest, Session,
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "candidate_finder")]
#[command(about = "AI-powered candidate search with normalized filtering and export")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the remote service for candidates matching a job description
    Search {
        /// Job description sent to the search service
        #[arg(long, short = 'j')]
        job_description: String,
        /// Number of candidates (page size) to request, 1-100
        #[arg(long = "count", short = 'n', default_value_t = 1)]
        n: u32,
        /// Access token; overrides config and CANDIDATE_FINDER_TOKEN
        #[arg(long)]
        token: Option<String>,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Load a saved search response (.json or .csv) instead of calling the service
    Import {
        /// Path to the saved response
        file: PathBuf,
        #[command(flatten)]
        view: ViewArgs,
    },
}

#[derive(Args)]
struct ViewArgs {
    /// Keep only these locations (repeatable)
    #[arg(long = "location", value_name = "NAME")]
    locations: Vec<String>,
    /// Keep only these disability categories (repeatable)
    #[arg(long = "disability", value_name = "NAME")]
    disabilities: Vec<String>,
    /// Keep only these education levels (repeatable)
    #[arg(long = "education", value_name = "NAME")]
    educations: Vec<String>,
    /// Minimum years of experience (inclusive)
    #[arg(long)]
    min_experience: Option<f64>,
    /// Maximum years of experience (inclusive)
    #[arg(long)]
    max_experience: Option<f64>,
    /// Print the values available for each filter
    #[arg(long)]
    facets: bool,
    /// Export the filtered view (.csv or .json)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
}

impl ViewArgs {
    fn criteria(&self, config: &Config) -> anyhow::Result<FilterCriteria> {
        let range = ExperienceRange::new(
            self.min_experience.unwrap_or(config.filters.experience_min),
            self.max_experience.unwrap_or(config.filters.experience_max),
        )?;
        Ok(FilterCriteria::default()
            .with_locations(self.locations.iter().cloned())
            .with_disabilities(self.disabilities.iter().cloned())
            .with_educations(self.educations.iter().cloned())
            .with_experience(range))
    }
}

fn print_table(table: &[NormalizedCandidateRecord]) {
    let columns = columns(table);
    let rows: Vec<Vec<String>> = table.iter().map(|record| row(record, &columns)).collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, col)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(col.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
    };
    println!("{}", line(&columns));
    for row in &rows {
        println!("{}", line(row));
    }
}

fn print_facets(options: &FacetOptions) {
    let join = |values: &std::collections::BTreeSet<String>| {
        values.iter().cloned().collect::<Vec<_>>().join(", ")
    };
    println!("\nLocation: {}", join(&options.locations));
    println!("Disability: {}", join(&options.disabilities));
    println!("Education Qualification: {}", join(&options.educations));
}

fn show(session: &Session, view: &ViewArgs, config: &Config) -> anyhow::Result<()> {
    let criteria = view.criteria(config)?;
    let Some(table) = session.table() else {
        bail!("no candidates loaded");
    };

    let filtered = session.view(&criteria).unwrap_or_default();
    if criteria.is_unconstrained() {
        println!("Displaying all candidates within the default experience range:");
    } else {
        println!("Displaying {} candidates:", filtered.len());
    }
    print_table(&filtered);

    if view.facets {
        print_facets(&FacetOptions::from_table(table));
    }

    if let Some(path) = &view.output {
        export_to_path(&filtered, path)
            .with_context(|| format!("exporting to {}", path.display()))?;
        println!("\n💾 Saved {} candidates to {}", filtered.len(), path.display());
    }
    Ok(())
}

fn report(notice: &SearchNotice) -> anyhow::Result<()> {
    match notice {
        SearchNotice::Found(_) => {
            println!("✅ {}", notice);
            Ok(())
        }
        _ => bail!("{}", notice),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let _log_guard = logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load()?;
    debug!(endpoint = %config.search.endpoint, "Configuration loaded");

    let mut session = Session::new();

    match cli.command {
        Commands::Search {
            job_description,
            n,
            token,
            view,
        } => {
            // Validate filters before spending a request
            view.criteria(&config)?;
            let request = SearchRequest::new(job_description, n)?;
            let mut client = HttpSearchClient::new(&config.search)?;
            if let Some(token) = token {
                client = client.with_token(token);
            }

            println!("🔄 Searching for the best candidates...");
            let notice = session.search(&client, &request).await;
            report(&notice)?;
            show(&session, &view, &config)?;
        }
        Commands::Import { file, view } => {
            info!("Importing candidates from {}", file.display());
            view.criteria(&config)?;
            let outcome = load_raw_records(&file).and_then(|raw| build_table(&raw));
            let notice = session.apply(outcome);
            report(&notice)?;
            show(&session, &view, &config)?;
        }
    }

    Ok(())
}
