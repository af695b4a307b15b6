//! Application configuration constants and environment overrides.

use std::collections::BTreeSet;
use std::error::Error;

/// Records written to the sink per batch.
pub const DEFAULT_BATCH_SIZE: usize = 500_000;

/// Environment variable overriding [`DEFAULT_BATCH_SIZE`].
pub const BATCH_SIZE_ENV: &str = "INETNUM_BATCH_SIZE";

pub const INETNUM_COLUMN: &str = "inetnum";
pub const IP_CIDR_COLUMN: &str = "ip_cidr";
pub const COUNTRY_COLUMN: &str = "country";

/// Columns kept from a registry dump when none are selected.
pub const DEFAULT_COLUMNS: [&str; 23] = [
    "netname",
    "mnt-irt",
    "tech-c",
    "mnt-routes",
    "country",
    "admin-c",
    "org",
    "last-modified",
    "source",
    "geoloc",
    "remarks",
    "mnt-by",
    "descr",
    "status",
    "inetnum",
    "abuse-c",
    "language",
    "mnt-lower",
    "ip_cidr",
    "created",
    "notify",
    "mnt-domains",
    "sponsoring-org",
];

pub fn default_columns() -> BTreeSet<String> {
    DEFAULT_COLUMNS.iter().map(|c| c.to_string()).collect()
}

/// Parse a comma separated column list, e.g. `"inetnum, country,ip_cidr"`.
pub fn parse_columns(columns: &str) -> BTreeSet<String> {
    columns
        .split(',')
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .map(|c| c.to_string())
        .collect()
}

/// Resolve the batch size: CLI value, then [`BATCH_SIZE_ENV`], then the default.
pub fn batch_size(cli_value: Option<usize>) -> Result<usize, Box<dyn Error>> {
    let env_value = std::env::var(BATCH_SIZE_ENV).ok();
    resolve_batch_size(cli_value, env_value.as_deref())
}

fn resolve_batch_size(
    cli_value: Option<usize>,
    env_value: Option<&str>,
) -> Result<usize, Box<dyn Error>> {
    let size = match (cli_value, env_value) {
        (Some(size), _) => size,
        (None, Some(env)) => env
            .trim()
            .parse()
            .map_err(|e| format!("Invalid {BATCH_SIZE_ENV}='{env}': {e}"))?,
        (None, None) => DEFAULT_BATCH_SIZE,
    };
    if size == 0 {
        return Err("Batch size must be greater than 0".into());
    }
    Ok(size)
}
