//! String similarity implementations for the title resolver.
//!
//! - `GestaltMatcher`: Ratcliff/Obershelp pattern matching (the default)
//! - `LevenshteinMatcher`: normalized edit distance

pub mod gestalt;
pub mod levenshtein;

// Re-export for convenience
pub use gestalt::GestaltMatcher;
pub use levenshtein::LevenshteinMatcher;
