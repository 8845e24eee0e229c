//! URL handling for Gallery-Harvest
//!
//! Item and list-page locators are compared as strings by the visited sets and
//! used as natural keys by the sink, so every href discovered on a page is
//! resolved to one canonical absolute form before it is used.

mod resolve;

pub use resolve::{comparable_locator, parse_locator, resolve_reference};
