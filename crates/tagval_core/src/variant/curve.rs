use serde::{Deserialize, Serialize};

use crate::variant::Color;

/// How a curve or ramp blends between neighbouring points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Interpolation {
	/// Straight line between points.
	#[default]
	Linear = 0,
	/// Hold the previous point's value.
	Step = 1,
	/// Smoothstep easing between points.
	Smooth = 2,
}

impl Interpolation {
	/// Decode a wire mode byte.
	pub fn from_u8(byte: u8) -> Option<Self> {
		match byte {
			0 => Some(Self::Linear),
			1 => Some(Self::Step),
			2 => Some(Self::Smooth),
			_ => None,
		}
	}

	/// Wire mode byte.
	pub fn as_u8(self) -> u8 {
		self as u8
	}

	/// Map a local parameter in `[0, 1]` through the blending mode.
	fn shape(self, t: f32) -> f32 {
		match self {
			Self::Linear => t,
			Self::Step => 0.0,
			Self::Smooth => t * t * (3.0 - 2.0 * t),
		}
	}
}

/// Control point of a [`ResponseCurve`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
	/// Input position.
	pub x: f32,
	/// Output value.
	pub y: f32,
}

impl CurvePoint {
	/// Create a control point.
	pub const fn new(x: f32, y: f32) -> Self {
		Self { x, y }
	}
}

/// Piecewise scalar mapping used for falloffs, weights, and per-channel adjustments.
///
/// Points are kept ordered by `x`. Inputs outside the first/last point clamp to the end values.
/// An empty curve is the identity mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseCurve {
	/// Blending mode between points.
	pub interpolation: Interpolation,
	/// Control points ordered by `x`.
	pub points: Vec<CurvePoint>,
}

impl ResponseCurve {
	/// Straight line from `(0, 0)` to `(1, 1)`.
	pub fn linear() -> Self {
		Self {
			interpolation: Interpolation::Linear,
			points: vec![CurvePoint::new(0.0, 0.0), CurvePoint::new(1.0, 1.0)],
		}
	}

	/// Build a curve, sorting points by `x`.
	pub fn from_points(interpolation: Interpolation, points: impl IntoIterator<Item = CurvePoint>) -> Self {
		let mut curve = Self {
			interpolation,
			points: points.into_iter().collect(),
		};
		curve.sort_points();
		curve
	}

	/// Restore `x` order after the points were filled in directly.
	pub fn sort_points(&mut self) {
		self.points.sort_by(|left, right| left.x.total_cmp(&right.x));
	}

	/// Insert a point keeping `x` order; points sharing an `x` keep insertion order.
	pub fn insert_point(&mut self, point: CurvePoint) {
		let at = self.points.partition_point(|item| item.x <= point.x);
		self.points.insert(at, point);
	}

	/// Evaluate the curve at `x`. A NaN input reads the first point.
	pub fn evaluate(&self, x: f32) -> f32 {
		let (Some(first), Some(last)) = (self.points.first(), self.points.last()) else {
			return x;
		};
		if x.is_nan() || x <= first.x || self.points.len() == 1 {
			return first.y;
		}
		if x >= last.x {
			return last.y;
		}

		let upper = self.points.partition_point(|item| item.x <= x).clamp(1, self.points.len() - 1);
		let from = self.points[upper - 1];
		let to = self.points[upper];
		let span = to.x - from.x;
		if span.is_nan() || span <= 0.0 {
			return to.y;
		}
		let t = self.interpolation.shape((x - from.x) / span);
		from.y + (to.y - from.y) * t
	}
}

/// One response curve per color channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorCurveSet {
	/// Red channel curve.
	pub red: ResponseCurve,
	/// Green channel curve.
	pub green: ResponseCurve,
	/// Blue channel curve.
	pub blue: ResponseCurve,
	/// Alpha channel curve.
	pub alpha: ResponseCurve,
}

impl Default for ColorCurveSet {
	fn default() -> Self {
		Self {
			red: ResponseCurve::linear(),
			green: ResponseCurve::linear(),
			blue: ResponseCurve::linear(),
			alpha: ResponseCurve::linear(),
		}
	}
}

impl ColorCurveSet {
	/// Curves in wire order: red, green, blue, alpha.
	pub fn channels(&self) -> [&ResponseCurve; 4] {
		[&self.red, &self.green, &self.blue, &self.alpha]
	}

	/// Map each channel of `color` through its curve.
	pub fn apply(&self, color: Color) -> Color {
		Color::new(
			self.red.evaluate(color.r),
			self.green.evaluate(color.g),
			self.blue.evaluate(color.b),
			self.alpha.evaluate(color.a),
		)
	}
}

/// Position and color of a [`ColorRamp`] stop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
	/// Position along the ramp, nominally in `[0, 1]`.
	pub position: f32,
	/// Color at this position.
	pub color: Color,
}

impl ColorStop {
	/// Create a stop.
	pub const fn new(position: f32, color: Color) -> Self {
		Self { position, color }
	}
}

/// Color gradient sampled by position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorRamp {
	/// Blending mode between stops.
	pub interpolation: Interpolation,
	/// Stops ordered by position.
	pub stops: Vec<ColorStop>,
}

impl Default for ColorRamp {
	fn default() -> Self {
		Self {
			interpolation: Interpolation::Linear,
			stops: vec![ColorStop::new(0.0, Color::BLACK), ColorStop::new(1.0, Color::WHITE)],
		}
	}
}

impl ColorRamp {
	/// Restore position order after the stops were filled in directly.
	pub fn sort_stops(&mut self) {
		self.stops.sort_by(|left, right| left.position.total_cmp(&right.position));
	}

	/// Insert a stop keeping position order.
	pub fn insert_stop(&mut self, stop: ColorStop) {
		let at = self.stops.partition_point(|item| item.position <= stop.position);
		self.stops.insert(at, stop);
	}

	/// Sample the ramp at `t`; an empty ramp is transparent black and NaN reads the first stop.
	pub fn evaluate(&self, t: f32) -> Color {
		let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
			return Color::TRANSPARENT_BLACK;
		};
		if t.is_nan() || t <= first.position || self.stops.len() == 1 {
			return first.color;
		}
		if t >= last.position {
			return last.color;
		}

		let upper = self.stops.partition_point(|item| item.position <= t).clamp(1, self.stops.len() - 1);
		let from = self.stops[upper - 1];
		let to = self.stops[upper];
		let span = to.position - from.position;
		if span.is_nan() || span <= 0.0 {
			return to.color;
		}
		from.color.lerp(to.color, self.interpolation.shape((t - from.position) / span))
	}
}

#[cfg(test)]
mod tests {
	use crate::variant::{Color, ColorCurveSet, ColorRamp, ColorStop, CurvePoint, Interpolation, Reader, ResponseCurve, SliceSource, Value, Writer};

	#[test]
	fn curve_clamps_and_interpolates() {
		let curve = ResponseCurve::from_points(Interpolation::Linear, [CurvePoint::new(1.0, 10.0), CurvePoint::new(0.0, 0.0)]);
		assert_eq!(curve.points[0].x, 0.0);
		assert_eq!(curve.evaluate(-1.0), 0.0);
		assert_eq!(curve.evaluate(0.5), 5.0);
		assert_eq!(curve.evaluate(2.0), 10.0);
	}

	#[test]
	fn step_and_smooth_modes() {
		let mut curve = ResponseCurve::from_points(Interpolation::Step, [CurvePoint::new(0.0, 1.0), CurvePoint::new(1.0, 3.0)]);
		assert_eq!(curve.evaluate(0.9), 1.0);
		curve.interpolation = Interpolation::Smooth;
		assert_eq!(curve.evaluate(0.5), 2.0);
		assert!(curve.evaluate(0.25) < 1.5);
	}

	#[test]
	fn empty_curve_is_identity() {
		let curve = ResponseCurve::default();
		assert_eq!(curve.evaluate(0.37), 0.37);
	}

	#[test]
	fn insert_point_keeps_order() {
		let mut curve = ResponseCurve::linear();
		curve.insert_point(CurvePoint::new(0.5, 0.9));
		let xs: Vec<f32> = curve.points.iter().map(|point| point.x).collect();
		assert_eq!(xs, vec![0.0, 0.5, 1.0]);
		assert_eq!(curve.evaluate(0.5), 0.9);
	}

	#[test]
	fn curve_set_applies_per_channel() {
		let mut set = ColorCurveSet::default();
		set.red = ResponseCurve::from_points(Interpolation::Linear, [CurvePoint::new(0.0, 1.0), CurvePoint::new(1.0, 0.0)]);
		let out = set.apply(Color::new(0.25, 0.5, 0.75, 1.0));
		assert_eq!(out, Color::new(0.75, 0.5, 0.75, 1.0));
	}

	#[test]
	fn ramp_samples_between_stops() {
		let mut ramp = ColorRamp::default();
		assert_eq!(ramp.evaluate(0.5), Color::new(0.5, 0.5, 0.5, 1.0));
		ramp.insert_stop(ColorStop::new(0.5, Color::rgb(1.0, 0.0, 0.0)));
		assert_eq!(ramp.stops.len(), 3);
		assert_eq!(ramp.evaluate(0.5), Color::rgb(1.0, 0.0, 0.0));
		assert_eq!(ramp.evaluate(2.0), Color::WHITE);

		let empty = ColorRamp {
			interpolation: Interpolation::Linear,
			stops: Vec::new(),
		};
		assert_eq!(empty.evaluate(0.5), Color::TRANSPARENT_BLACK);
	}

	#[test]
	fn nan_inputs_read_the_first_point() {
		assert_eq!(ResponseCurve::linear().evaluate(f32::NAN), 0.0);
		assert_eq!(ColorRamp::default().evaluate(f32::NAN), Color::BLACK);

		let single = ResponseCurve::from_points(Interpolation::Linear, [CurvePoint::new(0.5, 2.0)]);
		assert_eq!(single.evaluate(f32::NAN), 2.0);
		assert_eq!(single.evaluate(0.7), 2.0);
	}

	#[test]
	fn unordered_points_never_index_out_of_range() {
		let curve = ResponseCurve {
			interpolation: Interpolation::Linear,
			points: vec![CurvePoint::new(1.0, 1.0), CurvePoint::new(f32::NAN, 5.0), CurvePoint::new(0.0, 0.0)],
		};
		for x in [-1.0, 0.0, 0.25, 0.5, 1.0, 2.0, f32::NAN] {
			let _ = curve.evaluate(x);
		}

		let ramp = ColorRamp {
			interpolation: Interpolation::Smooth,
			stops: vec![ColorStop::new(1.0, Color::WHITE), ColorStop::new(f32::NAN, Color::BLACK), ColorStop::new(0.0, Color::BLACK)],
		};
		for t in [-1.0, 0.0, 0.5, 1.0, f32::NAN] {
			let _ = ramp.evaluate(t);
		}
	}

	#[test]
	fn decoded_curves_and_ramps_are_reordered() {
		let curve = ResponseCurve {
			interpolation: Interpolation::Linear,
			points: vec![CurvePoint::new(1.0, 10.0), CurvePoint::new(0.0, 0.0), CurvePoint::new(0.5, 2.0)],
		};
		let ramp = ColorRamp {
			interpolation: Interpolation::Linear,
			stops: vec![ColorStop::new(1.0, Color::WHITE), ColorStop::new(0.0, Color::BLACK)],
		};

		let mut writer = Writer::new(Vec::new());
		writer.write_value(&Value::from(curve)).expect("write curve");
		writer.write_value(&Value::from(ramp)).expect("write ramp");
		let bytes = writer.into_inner();

		let mut reader = Reader::new(SliceSource::new(&bytes));
		let curve = reader.read_value().expect("read curve");
		let curve = curve.as_response_curve().expect("curve");
		let xs: Vec<f32> = curve.points.iter().map(|point| point.x).collect();
		assert_eq!(xs, vec![0.0, 0.5, 1.0]);
		assert_eq!(curve.evaluate(0.75), 6.0);

		let ramp = reader.read_value().expect("read ramp");
		let ramp = ramp.as_color_ramp().expect("ramp");
		assert_eq!(ramp.stops[0].color, Color::BLACK);
		assert_eq!(ramp.evaluate(0.5), Color::new(0.5, 0.5, 0.5, 1.0));
	}
}
