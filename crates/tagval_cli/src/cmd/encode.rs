use std::fs;
use std::path::PathBuf;

use tagval::variant::{Compression, Document, Result, Value};

#[derive(clap::Args)]
pub struct Args {
	/// Typed JSON input: `{"type": <kind>, "value": <payload>}`.
	pub input: PathBuf,
	#[arg(short, long)]
	pub output: PathBuf,
	#[arg(long)]
	pub zstd: bool,
}

/// Parse typed JSON and write it as a binary document.
pub fn run(args: Args) -> Result<()> {
	let Args { input, output, zstd } = args;

	let text = fs::read_to_string(&input)?;
	let root = Value::parse_typed_json(&text)?;
	tracing::debug!(input = %input.display(), kind = %root.kind(), "parsed typed json");

	let compression = if zstd { Compression::Zstd } else { Compression::None };
	let written = Document::new(root).save(&output, compression)?;
	println!("wrote {written} bytes to {} ({})", output.display(), compression.as_str());
	Ok(())
}
