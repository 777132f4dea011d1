mod render;

use anyhow::{anyhow, Context, Result};
use app::{fetch_catalog, RefreshOrchestrator};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use data_loader::{Book, Catalog, Review, User};
use render::Labels;
use sources::{CatalogSource, FileSource, HttpSource};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use view_model::{Locale, Placeholders, ViewModelBuilder};

/// Bookshelf - books with their authors and reviews
#[derive(Parser)]
#[command(name = "bookshelf")]
#[command(about = "Render a book list joined with its authors and reviews", long_about = None)]
struct Cli {
    /// Directory holding books.json, users.json and reviews.json
    #[arg(short, long, default_value = "data", global = true)]
    data_dir: PathBuf,

    /// Fetch from a JSON API instead (expects /books, /users, /reviews)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Language of labels and placeholder texts
    #[arg(long, value_enum, default_value = "ru", global = true)]
    locale: LocaleArg,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum LocaleArg {
    Ru,
    En,
}

impl From<LocaleArg> for Locale {
    fn from(arg: LocaleArg) -> Self {
        match arg {
            LocaleArg::Ru => Locale::Ru,
            LocaleArg::En => Locale::En,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every book with its author and reviews
    List {
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a single book
    Show {
        /// Book ID to display
        #[arg(long)]
        id: String,

        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Report dangling and duplicated references in the catalog
    Check {
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Time the join on a synthetic catalog
    Benchmark {
        /// Number of books to generate
        #[arg(long, default_value = "10000")]
        books: usize,

        /// Number of users to generate
        #[arg(long, default_value = "2000")]
        users: usize,

        /// Number of reviews to generate
        #[arg(long, default_value = "30000")]
        reviews: usize,

        /// Number of timed runs
        #[arg(long, default_value = "20")]
        iterations: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let locale = Locale::from(cli.locale);

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::List { format } => {
            handle_list(build_source(&cli.data_dir, cli.base_url.as_deref()), locale, format)
                .await?
        }
        Commands::Show { ref id, format } => {
            handle_show(
                build_source(&cli.data_dir, cli.base_url.as_deref()),
                locale,
                id,
                format,
            )
            .await?
        }
        Commands::Check { format } => {
            handle_check(build_source(&cli.data_dir, cli.base_url.as_deref()), format).await?
        }
        Commands::Benchmark {
            books,
            users,
            reviews,
            iterations,
        } => handle_benchmark(books, users, reviews, iterations, locale)?,
    }

    Ok(())
}

/// `--base-url` wins over `--data-dir`
fn build_source(data_dir: &Path, base_url: Option<&str>) -> Arc<dyn CatalogSource> {
    match base_url {
        Some(url) => Arc::new(HttpSource::new(url)),
        None => Arc::new(FileSource::new(data_dir)),
    }
}

/// Run one refresh and return the published views
async fn refresh_books(
    source: Arc<dyn CatalogSource>,
    locale: Locale,
    show_loading: bool,
) -> Result<Arc<Vec<view_model::BookView>>> {
    let labels = Labels::for_locale(locale);
    let orchestrator =
        RefreshOrchestrator::new(source).with_placeholders(Placeholders::for_locale(locale));

    if show_loading {
        println!("{}", labels.loading.dimmed());
    }
    let start = Instant::now();
    orchestrator
        .refresh()
        .await
        .context("Failed to load books")?;
    tracing::debug!("Refreshed in {:?}", start.elapsed());

    Ok(orchestrator.books().await)
}

/// Handle the 'list' command
async fn handle_list(
    source: Arc<dyn CatalogSource>,
    locale: Locale,
    format: OutputFormat,
) -> Result<()> {
    let books = refresh_books(source, locale, format == OutputFormat::Text).await?;

    let mut out = io::stdout().lock();
    match format {
        OutputFormat::Text => render::render_list(&mut out, &books, &Labels::for_locale(locale))?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, books.as_slice())?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Handle the 'show' command
async fn handle_show(
    source: Arc<dyn CatalogSource>,
    locale: Locale,
    id: &str,
    format: OutputFormat,
) -> Result<()> {
    let books = refresh_books(source, locale, false).await?;
    let book = books
        .iter()
        .find(|b| b.id == id)
        .ok_or_else(|| anyhow!("Book {} not found", id))?;

    let mut out = io::stdout().lock();
    match format {
        OutputFormat::Text => render::render_card(&mut out, book, &Labels::for_locale(locale))?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, book)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Handle the 'check' command
async fn handle_check(source: Arc<dyn CatalogSource>, format: OutputFormat) -> Result<()> {
    let catalog = fetch_catalog(source.as_ref())
        .await
        .context("Failed to fetch catalog")?;
    let report = catalog.dangling_references();

    let mut out = io::stdout().lock();
    match format {
        OutputFormat::Text => {
            let (books, users, reviews) = catalog.counts();
            writeln!(
                out,
                "{} books, {} users, {} reviews",
                books, users, reviews
            )?;
            render::render_report(&mut out, &report)?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &report)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Handle the 'benchmark' command
fn handle_benchmark(
    books: usize,
    users: usize,
    reviews: usize,
    iterations: usize,
    locale: Locale,
) -> Result<()> {
    if iterations == 0 {
        return Err(anyhow!("iterations must be at least 1"));
    }

    let catalog = synthetic_catalog(books, users, reviews);
    let report = catalog.dangling_references();
    println!(
        "Synthetic catalog: {} books, {} users, {} reviews ({} dangling references)",
        books,
        users,
        reviews,
        report.dangling_count()
    );

    let mut timings: Vec<Duration> = Vec::with_capacity(iterations);
    for _ in 0..iterations {
        let start = Instant::now();
        let builder = ViewModelBuilder::new(&catalog.users, &catalog.reviews)
            .with_placeholders(Placeholders::for_locale(locale));
        let views = builder.build_all(&catalog.books);
        timings.push(start.elapsed());
        debug_assert_eq!(views.len(), books);
    }

    // Total, average, percentiles and throughput
    let total_time: Duration = timings.iter().sum();
    let avg_latency = total_time / (timings.len() as u32);
    timings.sort();
    let p50 = timings[timings.len() / 2];
    let p95 = timings[((timings.len() as f32 * 0.95) as usize).min(timings.len() - 1)];
    let throughput = (books * iterations) as f64 / total_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Total time: {:?}", total_time);
    println!("Average per join: {:?}", avg_latency);
    println!("P50: {:?}", p50);
    println!("P95: {:?}", p95);
    println!("Throughput: {:.0} books/second", throughput);

    Ok(())
}

/// Random catalog where roughly one reference in ten dangles
fn synthetic_catalog(books: usize, users: usize, reviews: usize) -> Catalog {
    // Ids are drawn from a range 10% wider than the collection
    let pick = |n: usize| (rand::random::<u32>() as usize) % (n + n / 10 + 1);

    let user_list = (0..users)
        .map(|i| User {
            id: format!("u{i}"),
            name: format!("User {i}"),
        })
        .collect();
    let review_list = (0..reviews)
        .map(|i| Review {
            id: format!("r{i}"),
            text: format!("Review {i}"),
            user_id: format!("u{}", pick(users)),
        })
        .collect();
    let book_list = (0..books)
        .map(|i| Book {
            id: format!("b{i}"),
            name: (pick(10) != 0).then(|| format!("Book {i}")),
            author_id: format!("u{}", pick(users)),
            review_ids: (0..pick(8)).map(|_| format!("r{}", pick(reviews))).collect(),
            description: None,
        })
        .collect();

    Catalog::new(book_list, user_list, review_list)
}
