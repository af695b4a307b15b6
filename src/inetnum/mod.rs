//! Registry dump ingestion.
//!
//! - [`parser`] - Splits `<rir>.db.inetnum` dumps into records and batches them to a sink

mod parser;

pub use parser::{inetnum_to_cidr, parse_inetnum, ParseOptions, ParseStats};
