//! Sentence to sign-language animation token pipeline.
//!
//! ```no_run
//! use signa_core::analyzer::Resources;
//! use signa_core::pipeline::{DirectoryAssets, Pipeline};
//!
//! # fn main() -> signa_core::Result<()> {
//! let mut resources = Resources::new();
//! resources.ensure_ready()?;
//!
//! let mut pipeline = Pipeline::new(
//!     resources.capabilities()?,
//!     DirectoryAssets::new("static/assets"),
//! );
//! let translation = pipeline.process("She went home")?;
//! for token in &translation.tokens {
//!     println!("{}", token);
//! }
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod config;
pub mod error;
pub mod pipeline;

pub use config::Config;
pub use error::{Error, LookupError, Result};
pub use pipeline::{Pipeline, PipelineOptions, Translation};
pub use signa_types::{
    AnimationToken, InputError, LemmaMode, PosTag, TenseCategory, TenseMarker,
};
