//! Heap accounting for kind changes, measured with a per-thread counting allocator.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

use tagval::variant::{Kind, Matrix3x3, Value};
use tagval_testkit::sample_values;

struct Counting;

thread_local! {
	static LIVE_BYTES: Cell<isize> = const { Cell::new(0) };
	static ALLOCATIONS: Cell<usize> = const { Cell::new(0) };
}

fn track(delta: isize, fresh: bool) {
	let _ = LIVE_BYTES.try_with(|live| live.set(live.get() + delta));
	if fresh {
		let _ = ALLOCATIONS.try_with(|count| count.set(count.get() + 1));
	}
}

unsafe impl GlobalAlloc for Counting {
	unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
		let ptr = unsafe { System.alloc(layout) };
		if !ptr.is_null() {
			track(layout.size() as isize, true);
		}
		ptr
	}

	unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
		unsafe { System.dealloc(ptr, layout) };
		track(-(layout.size() as isize), false);
	}

	unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
		let out = unsafe { System.realloc(ptr, layout, new_size) };
		if !out.is_null() {
			track(new_size as isize - layout.size() as isize, true);
		}
		out
	}
}

#[global_allocator]
static GLOBAL: Counting = Counting;

fn live_bytes() -> isize {
	LIVE_BYTES.with(Cell::get)
}

fn allocations() -> usize {
	ALLOCATIONS.with(Cell::get)
}

#[test]
fn every_kind_transition_releases_old_payload() {
	let before = live_bytes();
	for from in Kind::ALL {
		for to in Kind::ALL {
			let mut value = Value::default_of(from);
			value.set_kind(to);
			assert_eq!(value.kind(), to);
			value.set_kind(Kind::None);
			assert_eq!(live_bytes(), before, "{from} -> {to} leaked");
		}
	}
}

#[test]
fn repeated_assignment_of_every_sample_is_balanced() {
	let samples = sample_values();
	let before = live_bytes();
	{
		let mut value = Value::None;
		for _ in 0..3 {
			for sample in &samples {
				value.assign(sample);
			}
		}
		value.clear();
	}
	assert_eq!(live_bytes(), before);
}

#[test]
fn same_kind_assignment_does_not_allocate() {
	let mut value = Value::from(Matrix3x3::IDENTITY);
	let source = Value::from(Matrix3x3::from_array([3.0; 9]));
	let mut text = Value::from(String::with_capacity(32));

	let before = allocations();
	value.assign(&source);
	value.set_matrix3x3(Matrix3x3::IDENTITY);
	text.set_string("fits in place");
	assert_eq!(allocations(), before);
}
