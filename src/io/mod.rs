//! File input and result output for the command-line jobs.
//!
//! The engine itself only sees in-memory slices; these helpers turn files into
//! those slices and render job results.

pub mod output;
pub mod text;

#[cfg_attr(docsrs, doc(cfg(feature = "io-csv")))]
#[cfg(feature = "io-csv")]
pub mod csv;
