// The unicity CLI.
// Builds the library of definite descriptions and lets you inspect or export what it proved.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use unicity::certificate::{Certificate, CertificateStore};
use unicity::checker::CheckerConfig;
use unicity::library::{Library, LibraryConfig};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(
    name = "unicity",
    about = "Conditional definite descriptions in a sequent-calculus kernel",
    version = env!("CARGO_PKG_VERSION")
)]
struct Args {
    /// The most propositional atoms a single tautology step may involve
    #[clap(
        long,
        global = true,
        help = "The most propositional atoms a single tautology step may involve.",
        value_name = "N"
    )]
    max_atoms: Option<usize>,

    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Build the library and report every theorem (default)
    Check,

    /// List the names of the recorded theorems
    List,

    /// Show a single theorem
    Show {
        #[clap(value_name = "NAME")]
        name: String,

        /// Print the whole derivation
        #[clap(long, help = "Print the whole derivation.")]
        steps: bool,
    },

    /// Write a certificate for every theorem to a JSONL file
    Export {
        #[clap(value_name = "FILE")]
        file: PathBuf,
    },
}

fn build(config: &LibraryConfig) -> Library {
    match Library::build(config) {
        Ok(library) => library,
        Err(e) => {
            println!("Error building the library: {}", e);
            std::process::exit(1);
        }
    }
}

fn main() {
    // Use RUST_LOG to control log levels, e.g.:
    //   RUST_LOG=unicity::description=debug cargo run -- check
    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).without_time())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();
    let mut checker = CheckerConfig::default();
    if let Some(max_atoms) = args.max_atoms {
        checker.max_atoms = max_atoms;
    }
    let config = LibraryConfig { checker };
    let library = build(&config);

    match args.command.unwrap_or(Command::Check) {
        Command::Check => {
            for (name, theorem) in library.theory.theorems() {
                println!("{}: {} ({} inferences)", name, theorem, theorem.size());
            }
            println!("{} theorems checked", library.theory.len());
        }

        Command::List => {
            for (name, _) in library.theory.theorems() {
                println!("{}", name);
            }
        }

        Command::Show { name, steps } => {
            let theorem = match library.theory.theorem(&name) {
                Ok(theorem) => theorem,
                Err(e) => {
                    println!("{}", e);
                    std::process::exit(1);
                }
            };
            println!("{}", theorem);
            if steps {
                for line in Certificate::new(&name, theorem).steps {
                    println!("  {}", line);
                }
            }
        }

        Command::Export { file } => {
            let store = CertificateStore::from_theory(&library.theory);
            if let Err(e) = store.save(&file) {
                println!("Error writing {}: {}", file.display(), e);
                std::process::exit(1);
            }
            println!("{} certificates written to {}", store.certs.len(), file.display());
        }
    }
}
