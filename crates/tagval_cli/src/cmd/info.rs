use std::collections::BTreeMap;
use std::path::PathBuf;

use tagval::variant::{Document, Kind, Result, Value};

use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// Print document header and value tree statistics.
pub fn run(args: Args) -> Result<()> {
	let Args { path, json } = args;

	let doc = Document::open(&path)?;
	let stats = TreeStats::scan(&doc.root);

	if json {
		emit_json(&InfoJson {
			path: path.display().to_string(),
			compression: doc.compression.as_str(),
			version: doc.version,
			stored_len: doc.stored_len,
			decoded_len: doc.decoded_len,
			root_kind: doc.root.kind().name(),
			value_count: stats.value_count,
			max_depth: stats.max_depth,
			kinds: stats.kinds.iter().map(|(kind, count)| (kind.name(), *count)).collect(),
		});
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("compression: {}", doc.compression.as_str());
	println!("version: {}", doc.version);
	println!("stored_len: {}", doc.stored_len);
	println!("decoded_len: {}", doc.decoded_len);
	println!("root_kind: {}", doc.root.kind());
	println!("value_count: {}", stats.value_count);
	println!("max_depth: {}", stats.max_depth);

	let mut entries: Vec<_> = stats.kinds.into_iter().collect();
	entries.sort_by(|left, right| right.1.cmp(&left.1).then_with(|| left.0.cmp(&right.0)));

	println!("kinds:");
	for (kind, count) in entries {
		println!("  {kind}: {count}");
	}

	Ok(())
}

/// Value counts gathered by a full tree walk.
#[derive(Debug, Default)]
pub(crate) struct TreeStats {
	pub value_count: usize,
	pub max_depth: u32,
	pub kinds: BTreeMap<Kind, usize>,
}

impl TreeStats {
	pub(crate) fn scan(root: &Value) -> Self {
		let mut stats = Self::default();
		stats.visit(root, 0);
		stats
	}

	fn visit(&mut self, value: &Value, depth: u32) {
		self.value_count += 1;
		self.max_depth = self.max_depth.max(depth);
		*self.kinds.entry(value.kind()).or_insert(0) += 1;

		match value {
			Value::ValueVector(items) => items.iter().for_each(|item| self.visit(item, depth + 1)),
			Value::ValueMap(map) => map.values().for_each(|item| self.visit(item, depth + 1)),
			_ => {}
		}
	}
}

#[derive(serde::Serialize)]
struct InfoJson {
	path: String,
	compression: &'static str,
	version: u16,
	stored_len: usize,
	decoded_len: usize,
	root_kind: &'static str,
	value_count: usize,
	max_depth: u32,
	kinds: BTreeMap<&'static str, usize>,
}
