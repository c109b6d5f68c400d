//! URL handling module for Image-Harvester
//!
//! This module derives the site's root origin from the seed, resolves
//! root-relative references against it and decides same-site membership.
//!
//! URLs are kept as raw strings everywhere else in the crate: two spellings
//! of the same resource are two different entries in the crawl state.

mod origin;
mod resolve;

pub use origin::{parse_seed, root_origin, same_origin};
pub use resolve::{is_fetchable, last_segment, resolve_against_root};
