use dagrid_core::error::DagridError;
use dagrid_core::model::DevelopmentRecord;

pub fn print(records: &[DevelopmentRecord]) -> Result<(), DagridError> {
    let json = serde_json::to_string_pretty(records)?;
    println!("{json}");
    Ok(())
}
