//! Game identity: catalog, normalization and storefront id resolution.

pub mod catalog;
pub mod normalize;
pub mod resolver;

pub use catalog::{AliasConflict, AliasConflictPolicy, Catalog};
pub use normalize::{normalize, normalize_text};
pub use resolver::{resolve, IdentityResolver};
