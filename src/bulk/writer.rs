use std::io::Write;

use crate::error::Result;
use crate::types::BulkRecord;

pub const BULK_HEADERS: [&str; 8] = [
    "Record Type",
    "Campaign",
    "Ad Group",
    "Keyword Text",
    "Match Type",
    "Bid",
    "State",
    "Campaign Daily Budget",
];

fn to_row(record: &BulkRecord) -> [String; 8] {
    [
        record.record_type.to_string(),
        record.campaign.clone(),
        record.ad_group.clone().unwrap_or_default(),
        record.keyword_text.clone().unwrap_or_default(),
        record.match_type.map(|m| m.to_string()).unwrap_or_default(),
        record.bid.map(|b| format!("{b:.2}")).unwrap_or_default(),
        record.state.clone(),
        record.daily_budget.map(|b| b.to_string()).unwrap_or_default(),
    ]
}

/// Write the bulk sheet as CSV with the platform's column headers.
pub fn write_bulk_csv<W: Write>(out: W, records: &[BulkRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(BULK_HEADERS)?;
    for record in records {
        writer.write_record(to_row(record))?;
    }
    writer.flush()?;
    Ok(())
}

/// The whole sheet in memory, ready to be staged next to its destination.
pub fn render_bulk_csv(records: &[BulkRecord]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_bulk_csv(&mut buf, records)?;
    Ok(buf)
}
