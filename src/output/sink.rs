//! Destinations for parsed registry records.

use crate::models::InetnumRecord;
use std::error::Error;

/// Destination for batches of parsed records.
pub trait RecordSink {
    fn write_batch(&mut self, records: &[InetnumRecord]) -> Result<(), Box<dyn Error>>;
}

/// Every batch goes to each sink in turn.
impl RecordSink for Vec<Box<dyn RecordSink>> {
    fn write_batch(&mut self, records: &[InetnumRecord]) -> Result<(), Box<dyn Error>> {
        for sink in self.iter_mut() {
            sink.write_batch(records)?;
        }
        Ok(())
    }
}
