use std::fmt::Write as _;

use tagval::variant::{TagRegistry, Value};

/// Output truncation limits for value trees.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Maximum number of entries printed for a single vector or map.
	pub max_items: usize,
	/// Maximum number of Unicode scalar values printed for strings and leaf text.
	pub max_string_len: usize,
	/// Maximum container nesting printed before eliding.
	pub max_print_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_items: 16,
			max_string_len: 200,
			max_print_depth: 6,
		}
	}
}

/// Print one value tree, labelling map keys through `names`.
pub fn print_value(value: &Value, names: &TagRegistry, options: PrintOptions) {
	print!("{}", render_value(value, names, options));
}

/// Render one value tree as indented text.
pub fn render_value(value: &Value, names: &TagRegistry, options: PrintOptions) -> String {
	let mut out = String::new();
	render_into(&mut out, value, 0, 0, names, options);
	out
}

fn render_into(out: &mut String, value: &Value, indent: usize, depth: u32, names: &TagRegistry, options: PrintOptions) {
	let pad = " ".repeat(indent);
	match value {
		Value::None => {
			let _ = writeln!(out, "{pad}none");
		}
		Value::String(text) => {
			let _ = writeln!(out, "{pad}{:?}", truncate(text, options.max_string_len));
		}
		Value::ByteBuffer(bytes) => {
			let _ = writeln!(out, "{pad}bytes[{}]", bytes.len());
		}
		Value::ValueVector(items) => {
			if depth >= options.max_print_depth {
				let _ = writeln!(out, "{pad}[... {} items]", items.len());
				return;
			}
			let _ = writeln!(out, "{pad}[");
			for item in items.iter().take(options.max_items) {
				render_into(out, item, indent + 2, depth + 1, names, options);
			}
			if items.len() > options.max_items {
				let _ = writeln!(out, "{pad}  ... {} more", items.len() - options.max_items);
			}
			let _ = writeln!(out, "{pad}]");
		}
		Value::ValueMap(map) => {
			if depth >= options.max_print_depth {
				let _ = writeln!(out, "{pad}{{ ... {} entries }}", map.len());
				return;
			}
			let _ = writeln!(out, "{pad}{{");
			for (key, item) in map.iter().take(options.max_items) {
				let label = names.label(*key);
				if matches!(item, Value::ValueVector(_) | Value::ValueMap(_)) {
					let _ = writeln!(out, "{pad}  {label} =");
					render_into(out, item, indent + 4, depth + 1, names, options);
				} else {
					let _ = write!(out, "{pad}  {label} = ");
					render_into(out, item, 0, depth + 1, names, options);
				}
			}
			if map.len() > options.max_items {
				let _ = writeln!(out, "{pad}  ... {} more", map.len() - options.max_items);
			}
			let _ = writeln!(out, "{pad}}}");
		}
		Value::TypeTag(tag) => {
			let _ = writeln!(out, "{pad}TypeTag({})", names.label(*tag));
		}
		other => {
			let _ = writeln!(out, "{pad}{}({})", other.kind(), truncate(&other.to_text(), options.max_string_len));
		}
	}
}

fn truncate(text: &str, max_chars: usize) -> String {
	match text.char_indices().nth(max_chars) {
		Some((cut, _)) => format!("{}...", &text[..cut]),
		None => text.to_owned(),
	}
}
