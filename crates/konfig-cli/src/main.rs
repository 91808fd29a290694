use clap::{Parser, Subcommand};
use konfig::prelude::*;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "konfig", version, about = "Build configuration generator for multi-target Rust projects")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve the manifest and write every generated unit
    Generate {
        /// Manifest to read
        #[arg(long, default_value = "konfig.toml")]
        manifest: PathBuf,

        /// Active flavor; empty applies no flavored overrides
        #[arg(long, env = "KONFIG_FLAVOR", default_value = "")]
        flavor: String,

        /// Root of the per-source-set output directories
        #[arg(long, default_value = "build/konfig")]
        out_dir: PathBuf,

        /// Print a machine-readable summary of written units
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_target(false).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Generate {
            manifest,
            flavor,
            out_dir,
            json,
        } => {
            let manifest = Manifest::load(&manifest)?;
            let summary = GeneratePass::new(manifest, flavor, out_dir).run()?;

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                for unit in &summary.units {
                    println!("{}", unit.path.display());
                }
                println!("fingerprint: {}", summary.fingerprint);
            }

            Ok(())
        }
    }
}
