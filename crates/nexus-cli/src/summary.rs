use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use nexus_model::{NormalizationOutcome, SummaryStatistics, fields};

use crate::types::NormalizeResult;

/// Canonical fields derived by unit and coordinate rules, in display order.
const DERIVED_FIELDS: [&str; 5] = [
    fields::DISTANCE_KM,
    fields::COORDINATES_CARTESIAN,
    fields::MASS_KG,
    fields::TEMPERATURE_K,
    fields::ENERGY_EV,
];

pub fn print_normalize_summary(result: &NormalizeResult) {
    eprintln!("Input: {}", result.input.display());
    if let Some(path) = &result.output {
        eprintln!("Output: {}", path.display());
    }
    if result.duplicates_removed > 0 {
        eprintln!("Duplicates removed: {}", result.duplicates_removed);
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("NASA ID"),
        header_cell("Dataset"),
        header_cell("Derived"),
        header_cell("Errors"),
        header_cell("Gaps"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);

    for (index, outcome) in result.outcomes.iter().enumerate() {
        table.add_row(vec![
            dim_cell(index + 1),
            id_cell(outcome),
            text_cell(outcome.record.text(fields::DATASET_NAME)),
            derived_cell(outcome),
            count_cell(outcome.errors.len(), Color::Red),
            count_cell(outcome.gaps.len(), Color::Yellow),
        ]);
    }
    table.add_row(vec![
        dim_cell("-"),
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} records", result.outcomes.len())).add_attribute(Attribute::Bold),
        dim_cell("-"),
        count_cell(result.error_count(), Color::Red).add_attribute(Attribute::Bold),
        count_cell(result.gap_count(), Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    eprintln!("{table}");

    let errors: Vec<(usize, String)> = result
        .outcomes
        .iter()
        .enumerate()
        .flat_map(|(index, outcome)| {
            outcome
                .errors
                .iter()
                .map(move |error| (index + 1, error.to_string()))
        })
        .collect();
    if !errors.is_empty() {
        eprintln!("Errors:");
        for (index, error) in errors {
            eprintln!("- record {index}: {error}");
        }
    }
}

pub fn print_statistics(field: &str, count: usize, stats: &SummaryStatistics) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell(field)]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("count"), Cell::new(count)]);
    for (name, value) in [
        ("mean", stats.mean),
        ("median", stats.median),
        ("min", stats.min),
        ("max", stats.max),
        ("std_dev", stats.std_dev),
        ("error_margin", stats.error_margin),
    ] {
        table.add_row(vec![Cell::new(name), Cell::new(format!("{value:.4}"))]);
    }
    eprintln!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn id_cell(outcome: &NormalizationOutcome) -> Cell {
    match outcome.record.text(fields::NASA_ID) {
        Some(id) => Cell::new(id).fg(Color::Blue).add_attribute(Attribute::Bold),
        None => dim_cell("-"),
    }
}

fn text_cell(value: Option<&str>) -> Cell {
    match value {
        Some(text) => Cell::new(text),
        None => dim_cell("-"),
    }
}

fn derived_cell(outcome: &NormalizationOutcome) -> Cell {
    let derived: Vec<&str> = DERIVED_FIELDS
        .into_iter()
        .filter(|field| outcome.record.contains(field))
        .collect();
    if derived.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(derived.join(", ")).fg(Color::Green)
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
