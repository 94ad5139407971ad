//! The case detail table shown on marker hover.

use case_map_case_models::CaseEvent;
use chrono::NaiveDateTime;
use svg::Node;
use svg::node::Text;
use svg::node::element::Element;

/// Shown for fields the source did not provide.
pub const NOT_AVAILABLE: &str = "N/A";

/// US-English locale date-time, e.g. `3/15/2020, 10:00:00 AM`.
const LOCALE_DATETIME_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

#[must_use]
pub fn format_locale_datetime(datetime: &NaiveDateTime) -> String {
    datetime.format(LOCALE_DATETIME_FORMAT).to_string()
}

/// Labeled detail fields of `case`, in display order.
#[must_use]
pub fn detail_rows(case: &CaseEvent) -> Vec<(&'static str, String)> {
    let text = |value: Option<&str>| value.unwrap_or(NOT_AVAILABLE).to_string();
    let date = case.requested_at.as_ref().map_or_else(
        || text(case.requested_datetime.as_deref()),
        format_locale_datetime,
    );

    vec![
        ("Request Date", date),
        ("Request Status", text(case.status_description.as_deref())),
        ("Neighborhood", text(case.neighborhood.as_deref())),
        ("Request Type", text(case.service_subtype.as_deref())),
        ("Request Details", text(case.service_details.as_deref())),
        ("Request Source", case.source.clone()),
    ]
}

fn element(name: &str, child: impl Into<Box<dyn Node>>) -> Element {
    let mut element = Element::new(name);
    element.append(child);
    element
}

/// XHTML table of [`detail_rows`]. Values are escaped.
#[must_use]
pub fn detail_table(case: &CaseEvent) -> String {
    let mut body = Element::new("tbody");
    for (label, value) in detail_rows(case) {
        let mut value_cell = element("td", Text::new(value));
        value_cell.assign("class", "text");
        let label_cell = element("th", Text::new(format!("{label}:")));
        let mut row = element("tr", label_cell);
        row.append(value_cell);
        body.append(row);
    }

    let mut table = element("table", body);
    table.assign("border", 0);
    table.assign("cellspacing", 0);
    table.assign("cellpadding", 2);
    table.to_string()
}
