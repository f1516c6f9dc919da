/// End-to-end tests of the string facade.
pub mod facade;
/// Rendering and parsing ranges produced by real covers.
pub mod notation;
