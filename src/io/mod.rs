//! Codecs for extract content that has already been loaded into memory.
//!
//! ## Feature flags
//! - `io-csv`: enables [`csv`] (on by default)

#[cfg_attr(docsrs, doc(cfg(feature = "io-csv")))]
#[cfg(feature = "io-csv")]
pub mod csv;
