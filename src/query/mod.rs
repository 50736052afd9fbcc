//! The query-composition and result-shaping pattern shared by every
//! reporting route: parameterized list filters, the long-to-wide pivot,
//! and payload assembly.

pub mod filter;
pub mod pivot;
pub mod table;
