use std::path::PathBuf;
use std::time::Duration;

use apidocs_update::config::{
    DEFAULT_ARCHIVE_URL, DEFAULT_EMBED_DIR, DEFAULT_RELEASES_URL, DEFAULT_VERSION_FILE,
};
use apidocs_update::{Config, Outcome};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Refresh the bundled Swagger UI assets from the latest upstream release
#[derive(Parser, Debug)]
#[command(name = "apidocs-update")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding the bundled assets
    #[arg(long, default_value = DEFAULT_EMBED_DIR)]
    embed_dir: PathBuf,

    /// File recording the installed release tag
    #[arg(long, default_value = DEFAULT_VERSION_FILE)]
    version_file: PathBuf,

    /// Releases listing endpoint
    #[arg(long, default_value = DEFAULT_RELEASES_URL)]
    releases_url: String,

    /// Source archive URL, with {version} standing for the release tag
    #[arg(long, default_value = DEFAULT_ARCHIVE_URL)]
    archive_url: String,

    /// Per-request timeout
    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,

    /// Reinstall even if already at the latest release
    #[arg(long)]
    force: bool,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Config {
            embed_dir: args.embed_dir,
            version_file: args.version_file,
            releases_url: args.releases_url,
            archive_url: args.archive_url,
            timeout: Duration::from_secs(args.timeout_secs),
            force: args.force,
        }
    }
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match apidocs_update::run(&args.into()) {
        Ok(outcome @ Outcome::Updated { .. }) => {
            println!("{}", outcome);
            println!("review and commit the embed directory and version file");
        }
        Ok(outcome) => println!("{}", outcome),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
