use dagrid_core::diagnostics::Diagnostic;
use dagrid_core::model::DevelopmentRecord;
use dagrid_core::table::Row;

pub fn print_records(records: &[DevelopmentRecord]) {
    if records.is_empty() {
        println!("  No applications found.");
        return;
    }

    let id_width = records
        .iter()
        .map(|r| r.application_number.len())
        .max()
        .unwrap_or(10);

    for record in records {
        let received = record
            .received_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".into());
        println!(
            "  {:<width$}  {:<10}  {}",
            record.application_number,
            received,
            record.address,
            width = id_width
        );
        println!("  {:<width$}  {:<10}  {}", "", "", record.description, width = id_width);
        if !record.legal_description.is_empty() {
            println!(
                "  {:<width$}  {:<10}  {}",
                "",
                "",
                record.legal_description,
                width = id_width
            );
        }
    }
    println!();
}

pub fn print_diagnostics(diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }

    let (pages, rows): (Vec<_>, Vec<_>) =
        diagnostics.iter().partition(|d| d.kind.is_structural());
    for d in &pages {
        eprintln!("  warning: {d}");
    }
    if !rows.is_empty() {
        eprintln!("  {} row(s) skipped:", rows.len());
        for d in &rows {
            eprintln!("    {d}");
        }
    }
}

pub fn print_rows(rows: &[Row]) {
    for (i, row) in rows.iter().enumerate() {
        let texts: Vec<String> = row
            .cells
            .iter()
            .map(|c| {
                let text = c.text();
                if text.is_empty() {
                    "·".to_string()
                } else {
                    text
                }
            })
            .collect();
        println!("  {:>3}  {}", i + 1, texts.join(" | "));
    }
}
