pub mod analysis;
pub mod severity;
pub mod summary;
pub mod trends;
pub mod year;

use clap::Args;
use rust_decimal::Decimal;

use fraud_analytics_core::filters::{apply_filter, RecordFilter};
use fraud_analytics_core::types::{EntityCategory, Record, YearRange};
use fraud_analytics_core::year::{MAX_YEAR, MIN_YEAR};

use crate::input;

/// Record source and filter flags shared by every subcommand
#[derive(Args, Clone, Default)]
pub struct RecordArgs {
    /// Path to a JSON or YAML record file (reads piped stdin when omitted)
    #[arg(long)]
    pub input: Option<String>,

    /// Keep records whose canonical year is at least this (undated records always kept)
    #[arg(long)]
    pub from_year: Option<i32>,

    /// Keep records whose canonical year is at most this (undated records always kept)
    #[arg(long)]
    pub to_year: Option<i32>,

    /// Keep only this category (organization, fraud_type, case, statistic, scheme)
    #[arg(long)]
    pub category: Option<String>,

    /// Case-insensitive search over label and id
    #[arg(long)]
    pub search: Option<String>,

    /// Keep records with a fraud amount strictly above this
    #[arg(long)]
    pub min_amount: Option<Decimal>,
}

impl RecordArgs {
    pub fn filter(&self) -> Result<RecordFilter, Box<dyn std::error::Error>> {
        let year_range = match (self.from_year, self.to_year) {
            (None, None) => None,
            (start, end) => Some(YearRange {
                start: start.unwrap_or(MIN_YEAR),
                end: end.unwrap_or(MAX_YEAR),
            }),
        };

        let category = match self.category.as_deref() {
            None => None,
            Some(raw) => match EntityCategory::parse(raw) {
                EntityCategory::Unknown => {
                    return Err(format!("unknown --category '{}'", raw).into())
                }
                c => Some(c),
            },
        };

        Ok(RecordFilter {
            year_range,
            category,
            search: self.search.clone(),
            min_amount: self.min_amount,
        })
    }

    /// Load records and apply the filter flags.
    pub fn load(&self) -> Result<Vec<Record>, Box<dyn std::error::Error>> {
        let records = input::load_records(self.input.as_deref())?;
        let filter = self.filter()?;
        if filter.is_empty() {
            return Ok(records);
        }
        Ok(apply_filter(&records, &filter)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_open_year_flags() {
        let args = RecordArgs {
            from_year: Some(2012),
            ..Default::default()
        };
        let filter = args.filter().unwrap();
        assert_eq!(filter.year_range, Some(YearRange { start: 2012, end: MAX_YEAR }));
    }

    #[test]
    fn test_bad_category_flag() {
        let args = RecordArgs {
            category: Some("vendor".into()),
            ..Default::default()
        };
        assert!(args.filter().is_err());
    }
}
