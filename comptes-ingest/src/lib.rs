//! comptes-ingest: load company snapshots from CSV exports or JSON documents

pub mod error;
pub mod rows;
pub mod sources;

pub use error::{IngestError, Result};
pub use rows::snapshot_from_rows;
pub use sources::csv_dir::load_snapshot_dir;
pub use sources::json::{load_snapshot_json, snapshot_from_json_str};
