//! Plain text output of CIDR blocks, one per line.

use crate::models::Ipv4;
use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub fn write_cidrs<W: Write>(mut writer: W, cidrs: &[Ipv4]) -> Result<(), Box<dyn Error>> {
    for cidr in cidrs {
        writeln!(writer, "{cidr}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Write `cidrs` to `path`, replacing any existing file.
pub fn write_cidr_file(path: &Path, cidrs: &[Ipv4]) -> Result<(), Box<dyn Error>> {
    let file = File::create(path)
        .map_err(|e| format!("Error creating output file {}: {e}", path.display()))?;
    write_cidrs(BufWriter::new(file), cidrs)?;
    log::info!("Wrote {} CIDRs to {}", cidrs.len(), path.display());
    Ok(())
}
