use medstore::money::{find_currency, format_amount};
use rust_decimal::Decimal;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

/// Render rows under a header with rounded borders, right-aligning `numeric`
/// columns.
pub(crate) fn render<const N: usize>(
    header: [&str; N],
    rows: impl IntoIterator<Item = [String; N]>,
    numeric: std::ops::Range<usize>,
) -> String {
    let mut builder = Builder::default();

    builder.push_record(header);

    for row in rows {
        builder.push_record(row);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(numeric), Alignment::right());

    table.to_string()
}

pub(crate) fn amount(value: Option<Decimal>, currency: &str) -> String {
    match (value, find_currency(currency)) {
        (Some(value), Ok(currency)) => format_amount(value, currency),
        (Some(value), Err(_)) => value.to_string(),
        (None, _) => "-".to_string(),
    }
}

pub(crate) fn or_dash(value: Option<&str>) -> String {
    value
        .filter(|value| !value.trim().is_empty())
        .unwrap_or("-")
        .to_string()
}
