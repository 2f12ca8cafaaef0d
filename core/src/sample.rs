//! Example feedback file, shown to users who have no data at hand.

use crate::errors::Result;
use crate::table::FeedbackTable;

/// Three-row feedback file in the expected format
pub const EXAMPLE_CSV: &str = "\
id,rating,comment,date
1,5,\"It works fine, I guess\",2024-01-15
2,2,\"Terrible product, waste of money\",2024-01-16
3,4,\"Amazing experience, highly recommend!\",2024-01-17
";

/// [`EXAMPLE_CSV`] loaded as a table
pub fn example_table() -> Result<FeedbackTable> {
    FeedbackTable::from_reader(EXAMPLE_CSV.as_bytes())
}
