//! Table rendering for query results.

use prettytable::{
    format::{LinePosition, LineSeparator, TableFormat},
    Cell, Row, Table,
};
use rental_core::Tabular;

fn markdown_format() -> TableFormat {
    prettytable::format::FormatBuilder::new()
        .column_separator('|')
        .borders('|')
        .separator(LinePosition::Title, LineSeparator::new('-', '|', '|', '|'))
        .padding(1, 1)
        .build()
}

fn to_row(cells: impl IntoIterator<Item = String>) -> Row {
    Row::new(cells.into_iter().map(|c| Cell::new(&c)).collect())
}

/// One row per record, headed by the column names.
pub fn format_rows<T: Tabular>(rows: &[T]) -> String {
    let mut table = Table::new();
    table.set_format(markdown_format());
    table.set_titles(to_row(T::headers().iter().map(|h| h.to_string())));
    for row in rows {
        table.add_row(to_row(row.cells()));
    }
    table.to_string()
}

/// A single record as `field | value` pairs.
pub fn format_record<T: Tabular>(record: &T) -> String {
    let mut table = Table::new();
    table.set_format(markdown_format());
    for (header, value) in T::headers().iter().zip(record.cells()) {
        table.add_row(to_row([header.to_string(), value]));
    }
    table.to_string()
}
