use std::fmt::Write;

use crate::mapping::type_map::TypeMap;
use crate::parser::column_extractor::Extraction;

/// Build a markdown report with the extracted columns and any issues found.
pub fn build_report(source_name: &str, extraction: &Extraction, type_map: &TypeMap) -> String {
    let mut report = String::new();

    writeln!(report, "# ddl2xml Conversion Report").unwrap();
    writeln!(report).unwrap();
    writeln!(report, "Source: `{source_name}`").unwrap();
    writeln!(report).unwrap();

    writeln!(report, "## Columns").unwrap();
    writeln!(report).unwrap();
    writeln!(
        report,
        "| Column | Type | Target Type | Length | Precision | Nullable |"
    )
    .unwrap();
    writeln!(
        report,
        "|--------|------|-------------|--------|-----------|----------|"
    )
    .unwrap();

    for column in &extraction.columns {
        let target = type_map.lookup(&column.raw_type).unwrap_or("N/A");
        writeln!(
            report,
            "| {} | {} | {} | {} | {} | {} |",
            column.name,
            column.raw_type,
            target,
            column.size.as_deref().unwrap_or(""),
            column.precision.as_deref().unwrap_or(""),
            if column.nullable() { "yes" } else { "no" }
        )
        .unwrap();
    }

    if !extraction.diagnostics.is_empty() {
        writeln!(report).unwrap();
        writeln!(report, "## Issues").unwrap();
        writeln!(report).unwrap();

        for diagnostic in &extraction.diagnostics {
            writeln!(report, "- **[{}]** {}", diagnostic.kind(), diagnostic).unwrap();
        }

        if extraction.aborted {
            writeln!(report).unwrap();
            writeln!(
                report,
                "Extraction stopped at the first issue; later columns were not examined."
            )
            .unwrap();
        }
    }

    report
}
