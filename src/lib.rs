//! # retail-etl
//!
//! Normalizes raw retail extracts from two providers into one schema,
//! reconciles repeated daily extractions into a deduplicated history and joins
//! facts with mappings and dimensions into two downstream datasets.
//!
//! ## Key Features
//!
//! - **Two source normalizers** - tabular CSV extracts ([`source::cosmos`]) and
//!   nested JSON documents ([`source::galaxy`])
//! - **Incremental reconciliation** - the most recent extraction wins per business key
//! - **Lenient numerics** - blank or malformed quantities become a default, never an error
//! - **Deterministic output** - every grouping is ordered, so reruns are identical
//! - **Lazy batches** - batch content may be supplied by a provider that runs at most once
//!
//! ## Quick Start
//!
//! ```
//! use retail_etl::testing::{mappings, sample_cosmos_batches};
//! use retail_etl::{EtlConfig, run_cosmos};
//! # use anyhow::Result;
//!
//! # fn main() -> Result<()> {
//! let out = run_cosmos(
//!     &sample_cosmos_batches(),
//!     &mappings(&[(5000, 1), (5001, 2)], &[(100, 10)]),
//!     &EtlConfig::default(),
//! )?;
//!
//! // A corrected sale of -2 became two returns.
//! let first = &out.app[0];
//! assert_eq!((first.sales_qty, first.return_qty, first.delivery_qty), (0.0, 2.0, 8.0));
//! # Ok(())
//! # }
//! ```
//!
//! ## Data Flow
//!
//! 1. Raw batches, keyed by label, go through a source normalizer into
//!    [`NormalizedTables`]
//! 2. [`join_all`] outer-joins sales with deliveries and attaches surrogate ids
//!    and dimensions
//! 3. [`project_ml`] and [`project_app`] shape the unified table into the two
//!    output datasets
//!
//! [`run_cosmos`] and [`run_galaxy`] chain all three.
//!
//! ## Building Blocks
//!
//! The transforms are written against a small eager collection API:
//!
//! - [`from_vec`] / [`Collection`] - `map`, `key_by`
//! - keyed operations - `combine_values`, `map_values`, `values`
//! - joins - [`join_inner`](Collection::join_inner), [`join_left`](Collection::join_left),
//!   [`join_full`](Collection::join_full)
//! - [`combiners`] - [`Sum`], [`First`], [`Last`], [`LatestBy`], [`LatestSnapshot`]
//!
//! ## Feature Flags
//!
//! - `io-csv` - CSV reader for tabular extracts and writer for output records (default)
//!
//! ## Logging
//!
//! Row counts are emitted through [`tracing`] at `debug` level per step and at
//! `info` level per finished run. Installing a subscriber is left to the caller.

pub mod batch;
pub mod collection;
pub mod combiners;
pub mod config;
pub mod dataset;
pub mod error;
pub mod helpers;
pub mod io;
pub mod join;
pub mod model;
pub mod pipeline;
pub mod source;
pub mod testing;
pub mod transform;

pub use batch::{Batch, Batches, LabelDate};
pub use collection::{Collection, from_vec};
pub use combiners::{CombineFn, First, Last, LatestBy, LatestSnapshot, Sum};
pub use config::EtlConfig;
pub use dataset::{AppRecord, MlRecord, project_app, project_ml};
pub use error::{EtlError, Result};
pub use join::join_all;
pub use model::{
    BusinessKey, DeliveryFact, NormalizedTables, ProductDim, ProductMapping, ProductPrice, SalesFact,
    StoreDim, StoreMapping, UnifiedRecord,
};
pub use pipeline::{Mappings, PipelineOutput, run_cosmos, run_galaxy};

#[cfg(feature = "io-csv")]
pub use io::csv::{read_csv_rows, write_csv_rows};
