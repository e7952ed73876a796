use std::path::PathBuf;

use tagval::variant::{Document, ReadOptions, Result, TagRegistry};

use crate::cmd::print::{PrintOptions, print_value};
use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// Name used to label matching map keys; repeatable.
	#[arg(long = "name")]
	pub names: Vec<String>,
	#[arg(long = "max-depth")]
	pub max_depth: Option<u32>,
	#[arg(long = "max-items")]
	pub max_items: Option<usize>,
	#[arg(long)]
	pub json: bool,
}

/// Decode a document and print its root value.
pub fn run(args: Args) -> Result<()> {
	let Args {
		path,
		names,
		max_depth,
		max_items,
		json,
	} = args;

	let doc = Document::open_with(&path, &ReadOptions::default())?;

	if json {
		emit_json(&ShowJson {
			path: path.display().to_string(),
			compression: doc.compression.as_str(),
			version: doc.version,
			root: doc.root.to_typed_json(),
		});
		return Ok(());
	}

	let mut options = PrintOptions::default();
	if let Some(max_depth) = max_depth {
		options.max_print_depth = max_depth;
	}
	if let Some(max_items) = max_items {
		options.max_items = max_items;
	}

	let registry = TagRegistry::with_names(names.iter().map(String::as_str));
	println!("path: {}", path.display());
	println!("compression: {}", doc.compression.as_str());
	println!("root:");
	print_value(&doc.root, &registry, options);
	Ok(())
}

#[derive(serde::Serialize)]
struct ShowJson {
	path: String,
	compression: &'static str,
	version: u16,
	root: serde_json::Value,
}
