use dagrid_core::error::DagridError;
use dagrid_core::extraction::json::JsonPageSource;
use dagrid_core::extraction::PageSource;
use dagrid_core::table;
use std::path::Path;

use crate::output;

pub fn run(input_file: &Path) -> Result<(), DagridError> {
    let input = std::fs::read(input_file)?;
    let pages = JsonPageSource::new().extract_pages(&input)?;

    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("=== Page {} ===\n", page.page_number);
        match table::layout(page) {
            Ok(rows) => output::table::print_rows(&rows),
            Err(failure) => println!("  {failure}"),
        }
    }

    Ok(())
}
