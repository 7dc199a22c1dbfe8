//! Link index and link target resolution.

mod link_index;
pub mod resolution;

pub use link_index::LinkIndex;
pub use resolution::Resolver;
