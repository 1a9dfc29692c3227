//! Compile orchestration: inline sources, single files, and bundles

mod assets;
mod inline;
mod outcome;

pub use assets::Builder;
pub use inline::InlineCompiler;
pub use outcome::Artifact;
