use tagval::variant::{Result, TagRegistry};

use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	#[arg(required = true)]
	pub names: Vec<String>,
	#[arg(long)]
	pub json: bool,
}

/// Print the type tag of each name.
pub fn run(args: Args) -> Result<()> {
	let Args { names, json } = args;

	let mut registry = TagRegistry::new();
	let rows: Vec<TagJson> = names
		.iter()
		.map(|name| {
			let tag = registry.register(name);
			TagJson {
				name: name.clone(),
				tag: tag.to_string(),
				value: tag.value(),
			}
		})
		.collect();

	if json {
		emit_json(&rows);
		return Ok(());
	}

	for row in &rows {
		println!("{}  {}", row.tag, row.name);
	}
	Ok(())
}

#[derive(serde::Serialize)]
struct TagJson {
	name: String,
	tag: String,
	value: u32,
}
