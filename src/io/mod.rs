//! File input for coadd diagnostics

pub mod fits;
