//! Dataset access for bnl segmentations
//!
//! The evaluation core only needs a way to enumerate track ids and load a
//! track's metadata plus its raw annotation. This crate defines that contract
//! as [`TrackSource`] and provides:
//!
//! - [`MemorySource`]: tracks held in memory, mainly for tests
//! - [`JsonDirectorySource`]: one `<id>.json` document per track
//! - [`TrackCache`]: an explicit cache in front of any source
//!
//! # Example
//!
//! ```no_run
//! use bnl_data::{DatasetConfig, JsonDirectorySource, TrackSource};
//!
//! let source = JsonDirectorySource::from_config(&DatasetConfig::from_env());
//! let ids = source.list_ids()?;
//! for track in source.load_many(&ids) {
//!     let hierarchy = track.hierarchy()?;
//!     println!("{}: {} levels", track.summary(), hierarchy.num_layers());
//! }
//! # Ok::<(), bnl_data::DataError>(())
//! ```

#![warn(missing_docs)]

pub mod annotation;
pub mod cache;
pub mod config;
pub mod error;
pub mod json_dir;
pub mod source;
pub mod track;

pub use annotation::{RawAnnotation, RawLayer};
pub use cache::TrackCache;
pub use config::DatasetConfig;
pub use error::{DataError, DataResult};
pub use json_dir::JsonDirectorySource;
pub use source::{MemorySource, TrackSource};
pub use track::{Track, TrackInfo};
