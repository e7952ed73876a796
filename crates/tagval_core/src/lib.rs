//! Dynamic tagged values, their compact binary wire format, and their text round trip.

/// Type tags, values, text form, stream writer/reader, and the document container.
pub mod variant;
