use dagrid_core::address::{format_address, format_street_name, Gazetteer};
use dagrid_core::error::DagridError;
use std::path::Path;

pub fn run(street: &str, suburb: &str, gazetteer_dir: &Path) -> Result<(), DagridError> {
    let gazetteer = Gazetteer::load_dir(gazetteer_dir)?;

    match format_address(&gazetteer, street, suburb) {
        Some(address) => println!("{address}"),
        None => {
            println!("{}", format_street_name(&gazetteer, street));
            eprintln!("  suburb '{}' not found in gazetteer", suburb.trim());
        }
    }

    Ok(())
}
