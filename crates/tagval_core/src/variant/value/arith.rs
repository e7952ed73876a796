use std::ops::{Add, Div, Mul, Sub};

use crate::variant::Value;

fn binary(left: &Value, right: &Value, op: impl Fn(f32, f32) -> f32) -> Value {
	match (left, right) {
		(Value::Float32(a), Value::Float32(b)) => Value::Float32(op(*a, *b)),
		(Value::Color(a), Value::Color(b)) => Value::Color(a.zip_with(*b, op)),
		(Value::Color(a), Value::Float32(b)) => Value::Color(a.map(|channel| op(channel, *b))),
		_ => Value::None,
	}
}

macro_rules! value_op {
	($trait:ident, $method:ident, $op:tt) => {
		impl $trait<&Value> for &Value {
			type Output = Value;

			/// Defined for float pairs, color pairs, and color by float; anything else is `None`.
			fn $method(self, rhs: &Value) -> Value {
				binary(self, rhs, |a, b| a $op b)
			}
		}

		impl $trait for Value {
			type Output = Value;

			fn $method(self, rhs: Value) -> Value {
				binary(&self, &rhs, |a, b| a $op b)
			}
		}
	};
}

value_op!(Add, add, +);
value_op!(Sub, sub, -);
value_op!(Mul, mul, *);
value_op!(Div, div, /);
