//! Text projector for catalog records.
//!
//! Renders a record into the single string that gets embedded. The
//! projection is a pure function with a fixed field order, so re-syncing an
//! unchanged record yields a bit-identical embedding input. That determinism
//! is what would let a future change-detection pass skip unchanged records.

use catalog_sync_shared::Record;

/// Render a record into its embedding text.
///
/// Field order is fixed: description, name, brand, gender, price, primary
/// color, joined by single spaces. A missing primary color renders as the
/// empty string rather than failing.
pub fn project(record: &Record) -> String {
    format!(
        "{} {} {} {} {} {}",
        record.description,
        record.name,
        record.brand,
        record.gender,
        record.price,
        record.primary_color.as_deref().unwrap_or(""),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_sync_shared::Record;

    fn trolley_bag() -> Record {
        Record::new(
            10017413i64,
            "DKNY Unisex Black Large Trolley Bag",
            "DKNY",
            "Unisex",
            11745.0,
            "Black and grey printed trolley bag",
            Some("Black".to_string()),
        )
    }

    #[test]
    fn fixed_field_order() {
        assert_eq!(
            project(&trolley_bag()),
            "Black and grey printed trolley bag DKNY Unisex Black Large Trolley Bag DKNY Unisex 11745 Black"
        );
    }

    #[test]
    fn projection_is_pure() {
        let record = trolley_bag();
        assert_eq!(project(&record), project(&record));

        let clone = record.clone();
        assert_eq!(project(&record), project(&clone));
    }

    #[test]
    fn missing_color_renders_as_empty_string() {
        let mut record = trolley_bag();
        record.primary_color = None;

        let text = project(&record);
        assert!(text.ends_with("11745 "));
    }

    #[test]
    fn fractional_price_is_rendered() {
        let mut record = trolley_bag();
        record.price = 499.5;

        assert!(project(&record).contains(" 499.5 "));
    }
}
