//! # claphcl demo application
//!
//! A sample CLI tool that shows how to feed clap flag defaults from an HCL
//! document with [claphcl](https://docs.rs/claphcl). This is **not** a real
//! app; it exists to demonstrate and manually verify the crate's features.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example hcl_demo -- show
//! cargo run --example hcl_demo -- --config demo.hcl serve
//! ```
//!
//! ## Features demonstrated
//!
//! | Feature                  | How to exercise it                                                  |
//! |--------------------------|---------------------------------------------------------------------|
//! | Config file              | `cargo run --example hcl_demo -- --config demo.hcl show`            |
//! | Missing file is fine     | `cargo run --example hcl_demo -- --config nope.hcl show`            |
//! | CLI beats config         | `cargo run --example hcl_demo -- --config demo.hcl --color red show`|
//! | Grouped flag             | `display { width = 120 }` sets `--width`                            |
//! | Subcommand flag          | `serve { port = 9000 }` sets `serve --port`                         |
//! | Prefixed flag            | `serve { tls-cert = "a.pem" }` sets `serve --cert`                  |
//! | Raw fragment             | `serve { limits { burst = 5 } }` feeds `serve --limits`             |
//! | Strict mode              | add `typo = 1` to the file and run any command                      |
//!
//! A document exercising all of the above:
//!
//! ```text
//! color = "green"
//! display {
//!   width = 120
//! }
//! serve {
//!   port = 9000
//!   tls-cert = "a.pem"
//!   limits {
//!     burst = 5
//!     paths = ["/api", "/static"]
//!   }
//! }
//! ```

use std::path::PathBuf;

use clap::{Args, CommandFactory, FromArgMatches, Parser, Subcommand};
use serde::Deserialize;

use claphcl::{HclConfig, HclError, RawConfig};

/// claphcl demo: a sample CLI app reading flag defaults from a document.
#[derive(Parser, Debug)]
#[command(name = "hcl-demo")]
struct Cli {
    /// Configuration document to read defaults from.
    #[arg(long, default_value = "~/.hcl-demo.hcl")]
    config: PathBuf,

    /// Output color.
    #[arg(long, default_value = "yellow")]
    color: String,

    #[command(flatten)]
    display: DisplayArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct DisplayArgs {
    /// Wrap output at this many columns.
    #[arg(long, default_value_t = 80, help_heading = "Display")]
    width: usize,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the effective settings.
    Show,
    /// Pretend to start a server.
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,

        /// Certificate file. Configured as `tls-cert`.
        #[arg(long)]
        cert: Option<PathBuf>,

        /// Rate limits: a file, an inline fragment, or a block in the config.
        #[arg(long)]
        limits: Option<RawConfig>,
    },
}

#[derive(Deserialize, Debug, Default)]
struct Limits {
    #[serde(default)]
    burst: u32,
    #[serde(default)]
    paths: Vec<String>,
}

/// Find `--config` before the full parse, so its document can shape the rest.
fn config_path() -> PathBuf {
    let matches = Cli::command().ignore_errors(true).get_matches();
    matches
        .get_one::<PathBuf>("config")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("~/.hcl-demo.hcl"))
}

fn run() -> Result<(), HclError> {
    let resolver = HclConfig::builder()
        .file(config_path())
        .prefix("cert", "tls-")
        .raw_flag("limits")
        .load()?;

    let matches = resolver.apply(Cli::command())?.get_matches();
    let cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    match cli.command {
        Commands::Show => {
            println!("config: {}", cli.config.display());
            println!("color:  {}", cli.color);
            println!("width:  {}", cli.display.width);
        }
        Commands::Serve {
            port,
            cert,
            limits,
        } => {
            let limits: Limits = match limits {
                Some(raw) => raw.decode()?,
                None => Limits::default(),
            };
            println!("serving on port {port} in {}", cli.color);
            if let Some(cert) = cert {
                println!("tls certificate: {}", cert.display());
            }
            println!("burst limit {} on {:?}", limits.burst, limits.paths);
        }
    }
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
