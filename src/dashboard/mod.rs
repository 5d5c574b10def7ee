//! Dashboard assembly: run context, per-game composition and page slugs.

pub mod assembler;
pub mod context;
pub mod slug;

pub use assembler::DashboardAssembler;
pub use context::DashboardContext;
pub use slug::create_slug;
