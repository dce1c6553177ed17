//! fastpack CLI - Build installer fastpacks
//!
//! Commands:
//! - `fastpack build` - Package a resource directory into a fastpack
//! - `fastpack list` - Show the header, descriptor and entries of a fastpack

use clap::{Parser, Subcommand};

mod bundle;
mod logging;

#[derive(Parser)]
#[command(name = "fastpack")]
#[command(author, version, about = "Build tool for installer fastpacks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Package a directory into <DIR>/<NAME>_<VERSION>.jar
    Build {
        /// Directory holding the fastpack resources
        dir: String,

        /// Fastpack display name
        name: String,

        /// Fastpack version (e.g., 6.5.0.1289)
        #[arg(value_name = "VERSION")]
        pack_version: String,

        /// Path to a fastpack.toml configuration file
        #[arg(short, long)]
        config: Option<String>,
    },

    /// List the contents of a fastpack
    List {
        /// Path to the .jar archive
        archive: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            dir,
            name,
            pack_version,
            config,
        } => {
            let config = bundle::load_config(config)?;
            logging::init(&config.log_level);
            bundle::run(&dir, &name, &pack_version, config)?;
        }
        Commands::List { archive } => {
            logging::init(logging::DEFAULT_LEVEL);
            bundle::list(&archive)?;
        }
    }

    Ok(())
}
