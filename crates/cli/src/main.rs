// ABOUTME: CLI for extracting a job description from a saved page or a live URL.
// ABOUTME: Prints the extension response JSON (or just the text) and exits 2 when nothing was found.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;
use jobtailor_scout::{load_sites_from_str, ExtractionResponse, Extractor};

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

#[derive(Parser, Debug)]
#[command(name = "jobtailor")]
#[command(about = "Extract the job description from a job posting page")]
struct Args {
    /// Saved HTML file to read (requires --url)
    #[arg(long = "html")]
    html: Option<PathBuf>,

    /// Page URL for the saved HTML (required with --html)
    #[arg(long = "url")]
    url: Option<String>,

    /// Print only the job description text
    #[arg(long = "text")]
    text: bool,

    /// Output file path (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// JSON file replacing the built-in known-site table
    #[arg(long = "sites")]
    sites: Option<PathBuf>,

    /// Print elapsed time in ms to stderr
    #[arg(long = "timing")]
    timing: bool,

    /// Page URL to fetch (fetch mode)
    #[arg()]
    target: Option<String>,
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(io::stderr)
        .init();
}

fn build_extractor(sites: Option<&PathBuf>) -> Result<Extractor> {
    let mut builder = Extractor::builder();
    if let Some(path) = sites {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading site table {}", path.display()))?;
        builder = builder.sites(load_sites_from_str(&json)?);
    }
    Ok(builder.build()?)
}

fn fetch(url: &str) -> Result<String> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(FETCH_TIMEOUT)
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .build()?;
    let resp = client.get(url).send()?.error_for_status()?;
    Ok(resp.text()?)
}

/// Reads the page from the chosen input and runs the extractor on it.
fn run(args: &Args) -> Result<ExtractionResponse> {
    let (html, url) = match (&args.html, &args.url, &args.target) {
        (Some(_), _, Some(_)) => bail!("cannot use both --html and a positional URL"),
        (Some(_), None, None) => bail!("--url is required when using --html"),
        (Some(path), Some(url), None) => {
            let html = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            (html, url.clone())
        }
        (None, Some(_), Some(_)) => bail!("--url is only valid with --html"),
        (None, None, Some(target)) => {
            url::Url::parse(target).with_context(|| format!("invalid URL {}", target))?;
            tracing::info!(url = %target, "fetching page");
            let html = fetch(target).with_context(|| format!("fetching {}", target))?;
            (html, target.clone())
        }
        (None, _, None) => bail!("a URL is required, or use --html with --url"),
    };

    let extractor = build_extractor(args.sites.as_ref())?;
    Ok(extractor.respond_html(&html, &url))
}

fn render(response: &ExtractionResponse, text_only: bool) -> Result<String> {
    if text_only {
        Ok(response.job_description.clone())
    } else {
        Ok(serde_json::to_string_pretty(response)?)
    }
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    init_logging();

    let start = Instant::now();
    let response = match run(&args) {
        Ok(response) => response,
        Err(e) => {
            eprintln!("error: {:#}", e);
            return ExitCode::from(1);
        }
    };
    let elapsed = start.elapsed();

    let output = match render(&response, args.text) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("error: {:#}", e);
            return ExitCode::from(1);
        }
    };

    if let Some(path) = &args.output {
        if let Err(e) = fs::write(path, &output) {
            eprintln!("error writing to {:?}: {}", path, e);
            return ExitCode::from(1);
        }
    } else {
        println!("{}", output);
    }

    if args.timing {
        let _ = writeln!(io::stderr(), "elapsed: {}ms", elapsed.as_millis());
    }

    if response.meta.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    }
}
