// Document builder: typed model → abstract document tree.
// Pure; the tree is what both the layout formatter and the JSON layout endpoint consume.

pub mod builder;
pub mod tree;

pub use builder::build;
pub use tree::AbstractDocument;
