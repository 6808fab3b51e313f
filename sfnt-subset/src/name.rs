//! impl subset() for name
use sfnt_engine::Font;
use sfnt_read::tables::{
    cmap::{encoding, platform},
    name::{name_id, Name, NameRecord, TAG, WINDOWS_ENGLISH_US},
};
use sfnt_write::{
    tables::name::{Name as WriteName, NameRecord as WriteNameRecord},
    FontBuilder,
};

use crate::{Plan, Subset, SubsetError};

// Only the Windows US English records for the core names are kept.
impl Subset for Name<'_> {
    fn subset<'a>(
        &self,
        plan: &Plan,
        _font: &Font<'a>,
        builder: &mut FontBuilder<'a>,
    ) -> Result<(), SubsetError> {
        let mut records = Vec::new();
        for record in self.name_records().iter().filter(is_retained) {
            let mut string = self
                .string(&record)
                .map_err(|_| SubsetError::SubsetTableError(TAG))?;
            if record.name_id == name_id::POSTSCRIPT_NAME {
                if let Some(prefix) = &plan.prefix {
                    string.insert_str(0, prefix);
                }
            }
            records.push(WriteNameRecord::windows_english(record.name_id, &string));
        }
        if records.is_empty() {
            log::debug!("no retained name records, dropping name");
            return Ok(());
        }
        builder.add_table(&WriteName::new(records));
        Ok(())
    }
}

fn is_retained(record: &NameRecord) -> bool {
    record.platform_id == platform::WINDOWS
        && record.encoding_id == encoding::WINDOWS_UNICODE_BMP
        && record.language_id == WINDOWS_ENGLISH_US
        && record.name_id <= name_id::POSTSCRIPT_NAME
}
