//! Testing utilities for pipeline code.
//!
//! - **Assertions**: ordered comparison, key uniqueness, predicates
//! - **Fixtures**: raw row builders and small sample extracts for both sources
//!
//! # Quick Start
//!
//! ```
//! use retail_etl::testing::*;
//! use retail_etl::{EtlConfig, run_cosmos};
//!
//! # fn main() -> anyhow::Result<()> {
//! let out = run_cosmos(
//!     &sample_cosmos_batches(),
//!     &mappings(&[(5000, 1), (5001, 2)], &[(100, 10)]),
//!     &EtlConfig::default(),
//! )?;
//! assert_unique_by(&out.unified, |r| (r.key(), r.id_product, r.id_store));
//! # Ok(())
//! # }
//! ```

pub mod assertions;
pub mod fixtures;

pub use assertions::*;
pub use fixtures::*;
