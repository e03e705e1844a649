//! Fixed lookup tables used by the pipeline.
//!
//! All catalogs are immutable static slices sorted by key and searched with
//! binary search; nothing here is initialized at run time.

pub mod fonts;
pub mod palette;
pub mod smiles;

pub use smiles::Smile;
