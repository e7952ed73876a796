#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod cmd;

#[derive(Parser)]
#[command(name = "tagval", about = "Tagged value document tools")]
struct Cli {
	/// Log decoding steps to stderr.
	#[arg(short, long, global = true)]
	verbose: bool,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Hash names into type tags.
	Hash(cmd::hash::Args),
	/// Build a document from typed JSON.
	Encode(cmd::encode::Args),
	/// Print a document's root value.
	Show(cmd::show::Args),
	/// Print document size and shape statistics.
	Info(cmd::info::Args),
}

fn main() {
	let cli = Cli::parse();
	init_logging(cli.verbose);

	if let Err(err) = run(cli.command) {
		if err.is_corrupt_data() {
			eprintln!("error: failed to load: corrupt or unsupported data");
			eprintln!("  caused by: {err}");
		} else {
			eprintln!("error: {err}");
		}
		std::process::exit(1);
	}
}

fn init_logging(verbose: bool) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
	let subscriber = FmtSubscriber::builder().with_env_filter(filter).with_writer(std::io::stderr).finish();
	if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
		eprintln!("warning: logging unavailable: {err}");
	}
}

fn run(command: Commands) -> tagval::variant::Result<()> {
	match command {
		Commands::Hash(args) => cmd::hash::run(args),
		Commands::Encode(args) => cmd::encode::run(args),
		Commands::Show(args) => cmd::show::run(args),
		Commands::Info(args) => cmd::info::run(args),
	}
}
