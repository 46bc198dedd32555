use crate::{common, error, read};

use serde::Serialize;

/// A scan request ready to be sent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScanInput {
    /// Filter, projection and paging arguments.
    pub filter_input: read::common::FilterInput,
}

impl read::common::Paginated for ScanInput {
    fn set_exclusive_start_key(&mut self, key: Option<common::Record>) {
        self.filter_input.exclusive_start_key = key;
    }
}

impl common::table::TableSchema {
    /// Build a scan of the whole table.
    pub fn scan_input<T: Serialize>(
        &self,
        filter_params: common::filter::FilterParams<T>,
    ) -> error::Result<ScanInput> {
        let filter_input = self.filter_input(filter_params)?;
        Ok(ScanInput { filter_input })
    }
}
