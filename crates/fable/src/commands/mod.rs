//! CLI command implementations.

mod catalog;
mod context;
mod render;
mod resolve;
mod tabs;

pub(crate) use catalog::CatalogArgs;
pub(crate) use render::RenderArgs;
pub(crate) use resolve::ResolveArgs;
pub(crate) use tabs::TabsCommand;
