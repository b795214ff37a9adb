use super::format_money;
use cnyre_core::{Cell as ValueCell, Column, ColumnKind};
use cnyre_query::TableView;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use std::fmt::Display;

fn base_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn is_money(column: Column) -> bool {
    matches!(
        column,
        Column::FullMarketValue | Column::AssessmentLand | Column::AssessmentTotal
    )
}

fn render_cell(cell: ValueCell<'_>, column: Column) -> Cell {
    let text = match cell {
        ValueCell::Null => return Cell::new("-").fg(Color::DarkGrey),
        ValueCell::Float(v) if is_money(column) => format_money(v as f64),
        other => other.to_string(),
    };
    let rendered = Cell::new(text);
    match column.kind() {
        ColumnKind::Float | ColumnKind::SmallInt => rendered.set_alignment(CellAlignment::Right),
        ColumnKind::Text | ColumnKind::Category => rendered,
    }
}

/// One row per property in `view`, restricted to `columns`
pub fn property_table(view: &TableView, columns: &[Column]) -> Table {
    let mut table = base_table();
    table.set_header(
        columns
            .iter()
            .map(|c| Cell::new(c.name()).add_attribute(Attribute::Bold).fg(Color::Green)),
    );
    for record in view.iter() {
        table.add_row(
            columns
                .iter()
                .map(|&column| render_cell(record.cell(column), column)),
        );
    }
    table
}

/// Single-column listing of facet values with a count header
pub fn facet_table<T: Display>(title: &str, values: &[T]) -> Table {
    let mut table = base_table();
    table.set_header(vec![Cell::new(format!("{} ({})", title, values.len()))
        .add_attribute(Attribute::Bold)
        .fg(Color::Green)]);
    for value in values {
        table.add_row(vec![Cell::new(value)]);
    }
    table
}

/// Two-column metric table with optional section rows
pub struct StatsTable {
    table: Table,
    has_sections: bool,
}

impl StatsTable {
    pub fn new(title: &str) -> Self {
        let mut table = base_table();
        table.set_header(vec![
            Cell::new(title)
                .add_attribute(Attribute::Bold)
                .fg(Color::Green),
            Cell::new("Value (USD)").add_attribute(Attribute::Bold),
        ]);
        Self {
            table,
            has_sections: false,
        }
    }

    pub fn add_section(&mut self, name: &str) {
        if self.has_sections {
            self.table.add_row(vec!["", ""]);
        }
        self.table.add_row(vec![
            Cell::new(name.to_uppercase())
                .add_attribute(Attribute::Bold)
                .fg(Color::Cyan),
            Cell::new(""),
        ]);
        self.has_sections = true;
    }

    pub fn add_metric(&mut self, name: &str, value: impl Display) {
        self.table.add_row(vec![
            Cell::new(format!("  {}", name)),
            Cell::new(value)
                .add_attribute(Attribute::Bold)
                .set_alignment(CellAlignment::Right),
        ]);
    }

    pub fn render(&self) -> String {
        self.table.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cnyre_test::{build_table, sample_properties};
    use std::sync::Arc;

    #[test]
    fn test_property_table_renders_rows() {
        let view = TableView::full(Arc::new(build_table(&sample_properties())));
        let rendered = property_table(&view, &[Column::Id, Column::FullMarketValue]).to_string();
        assert!(rendered.contains("full_market_value"));
        assert!(rendered.contains("OSW-002"));
        assert!(rendered.contains("175,000.00"));
    }

    #[test]
    fn test_stats_table_sections() {
        let mut stats = StatsTable::new("Full Market Value");
        stats.add_section("Quartiles");
        stats.add_metric("Mean", "1.00");
        let rendered = stats.render();
        assert!(rendered.contains("QUARTILES"));
        assert!(rendered.contains("Mean"));
    }
}
