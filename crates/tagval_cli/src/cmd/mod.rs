/// Name hashing command.
pub mod hash;
/// Typed JSON to document command.
pub mod encode;
/// Document statistics command.
pub mod info;
/// Value tree rendering.
pub mod print;
/// Document printing command.
pub mod show;
/// Shared output helpers.
pub mod util;
