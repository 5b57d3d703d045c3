#![deny(missing_docs)]

//! # Fixtures Module
//!
//! Example value generation: literal classes and their regexes, the value
//! source abstraction, and the synthesizer.

pub mod formats;
pub mod source;
pub mod synthesizer;

pub use formats::LiteralClass;
pub use source::{RandomValueSource, ValueSource};
pub use synthesizer::synthesize;
