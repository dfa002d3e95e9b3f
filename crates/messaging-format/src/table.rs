//! Tables rendered as fixed-width text or structural markup.

use crate::escape::escape_text;
use crate::render::Render;
use crate::target::{Dialect, FormatTarget};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Column alignment, honored by the markdown separator row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableAlignment {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCell {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub is_header: bool,
    #[serde(default = "default_span")]
    pub colspan: u32,
    #[serde(default = "default_span")]
    pub rowspan: u32,
    #[serde(default)]
    pub alignment: TableAlignment,
}

fn default_span() -> u32 {
    1
}

impl TableCell {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_header: false,
            colspan: 1,
            rowspan: 1,
            alignment: TableAlignment::Left,
        }
    }

    pub fn header(content: impl Into<String>) -> Self {
        Self {
            is_header: true,
            ..Self::new(content)
        }
    }

    /// Set the spans; zero is raised to one.
    pub fn with_span(mut self, colspan: u32, rowspan: u32) -> Self {
        self.colspan = colspan.max(1);
        self.rowspan = rowspan.max(1);
        self
    }

    pub fn with_alignment(mut self, alignment: TableAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    fn width(&self) -> usize {
        self.content.chars().count()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    #[serde(default)]
    pub cells: Vec<TableCell>,
    #[serde(default)]
    pub is_header: bool,
}

impl TableRow {
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self {
            cells,
            is_header: false,
        }
    }

    pub fn from_values<I, S>(values: I, is_header: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cells = values
            .into_iter()
            .map(|value| TableCell {
                is_header,
                ..TableCell::new(value)
            })
            .collect();
        Self { cells, is_header }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    #[serde(default)]
    pub headers: Option<TableRow>,
    #[serde(default)]
    pub rows: Vec<TableRow>,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub alignments: Vec<TableAlignment>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from row values with an optional header row.
    pub fn from_data<R, C, S>(data: R, headers: Option<Vec<String>>) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers
                .filter(|values| !values.is_empty())
                .map(|values| TableRow::from_values(values, true)),
            rows: data
                .into_iter()
                .map(|row| TableRow::from_values(row, false))
                .collect(),
            ..Self::default()
        }
    }

    /// Build from column-keyed records.
    ///
    /// Columns default to the keys of the first record. Missing keys become empty
    /// cells, strings are used verbatim, `null` is empty and other values are
    /// JSON-encoded.
    pub fn from_records(records: &[Map<String, Value>], columns: Option<Vec<String>>) -> Self {
        let Some(first) = records.first() else {
            return Self::default();
        };
        let columns = columns.unwrap_or_else(|| first.keys().cloned().collect());
        let rows = records
            .iter()
            .map(|record| {
                TableRow::from_values(
                    columns
                        .iter()
                        .map(|column| cell_text(record.get(column))),
                    false,
                )
            })
            .collect();
        Self {
            headers: Some(TableRow::from_values(columns, true)),
            rows,
            ..Self::default()
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }

    pub fn with_alignments(mut self, alignments: Vec<TableAlignment>) -> Self {
        self.alignments = alignments;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_none() && self.rows.is_empty()
    }

    /// Maximum content width (in chars) per column index over the header and data rows.
    pub fn column_widths(&self) -> Vec<usize> {
        let all_rows = self.headers.iter().chain(self.rows.iter());
        let mut widths: Vec<usize> = Vec::new();
        for row in all_rows {
            for (idx, cell) in row.cells.iter().enumerate() {
                if idx >= widths.len() {
                    widths.resize(idx + 1, 0);
                }
                widths[idx] = widths[idx].max(cell.width());
            }
        }
        widths
    }

    fn alignment(&self, column: usize) -> TableAlignment {
        self.alignments.get(column).copied().unwrap_or_default()
    }

    fn render_markdown(&self) -> String {
        let widths = self.column_widths();
        let mut lines = Vec::new();
        if let Some(headers) = &self.headers {
            lines.push(format!("| {} |", pad_cells(&headers.cells, &widths).join(" | ")));
            let separators = widths
                .iter()
                .enumerate()
                .map(|(idx, width)| match self.alignment(idx) {
                    TableAlignment::Center => format!(":{}:", "-".repeat((*width).max(1))),
                    TableAlignment::Right => format!("{}:", "-".repeat((*width).max(1))),
                    TableAlignment::Left => "-".repeat((width + 2).max(3)),
                })
                .collect::<Vec<_>>();
            lines.push(format!("|{}|", separators.join("|")));
        }
        for row in &self.rows {
            lines.push(format!("| {} |", pad_cells(&row.cells, &widths).join(" | ")));
        }
        lines.join("\n")
    }

    fn render_plaintext(&self) -> String {
        let widths = self.column_widths();
        let mut lines = Vec::new();
        if let Some(headers) = &self.headers {
            lines.push(pad_cells(&headers.cells, &widths).join(" | "));
            lines.push(
                widths
                    .iter()
                    .map(|width| "-".repeat(*width))
                    .collect::<Vec<_>>()
                    .join("-+-"),
            );
        }
        for row in &self.rows {
            lines.push(pad_cells(&row.cells, &widths).join(" | "));
        }
        lines.join("\n")
    }

    fn render_structural(&self, dialect: Dialect) -> String {
        let mut out = String::from("<table>");
        if dialect == Dialect::Html && !self.caption.is_empty() {
            out.push_str(&format!(
                "<caption>{}</caption>",
                escape_text(&self.caption, dialect)
            ));
        }
        if let Some(headers) = &self.headers {
            out.push_str("<thead><tr>");
            for cell in &headers.cells {
                out.push_str(&format!("<th>{}</th>", escape_text(&cell.content, dialect)));
            }
            out.push_str("</tr></thead>");
        }
        if !self.rows.is_empty() {
            out.push_str("<tbody>");
            for row in &self.rows {
                out.push_str("<tr>");
                for cell in &row.cells {
                    let tag = if cell.is_header && dialect == Dialect::Html {
                        "th"
                    } else {
                        "td"
                    };
                    out.push_str(&format!(
                        "<{tag}>{}</{tag}>",
                        escape_text(&cell.content, dialect)
                    ));
                }
                out.push_str("</tr>");
            }
            out.push_str("</tbody>");
        }
        out.push_str("</table>");
        out
    }
}

impl Render for Table {
    fn render(&self, target: &FormatTarget) -> String {
        if self.is_empty() {
            return String::new();
        }
        match target.dialect().or_plain() {
            Dialect::Markdown | Dialect::Discord => self.render_markdown(),
            // mrkdwn has no tables; a code block keeps the columns aligned
            Dialect::Slack => format!("```\n{}\n```", self.render_plaintext()),
            dialect @ (Dialect::Html | Dialect::MessageMl) => self.render_structural(dialect),
            _ => self.render_plaintext(),
        }
    }
}

/// Pad each present cell on the right to its column width; short rows stay short.
fn pad_cells(cells: &[TableCell], widths: &[usize]) -> Vec<String> {
    cells
        .iter()
        .enumerate()
        .map(|(idx, cell)| {
            let width = widths.get(idx).copied().unwrap_or_else(|| cell.width());
            format!("{:<width$}", cell.content)
        })
        .collect()
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn people() -> Table {
        Table::from_data(
            vec![vec!["Alice", "30"], vec!["Bob", "5"]],
            Some(vec!["Name".into(), "Age".into()]),
        )
    }

    #[test]
    fn widths_cover_header_and_rows() {
        assert_eq!(people().column_widths(), vec![5, 3]);
    }

    #[test]
    fn widths_tolerate_ragged_rows() {
        let table = Table::from_data(vec![vec!["a"], vec!["bb", "cccc"]], None);
        assert_eq!(table.column_widths(), vec![2, 4]);
        assert_eq!(
            table.render(&FormatTarget::PLAINTEXT),
            "a \nbb | cccc"
        );
    }

    #[test]
    fn widths_count_chars_not_bytes() {
        let table = Table::from_data(vec![vec!["héllo"], vec!["x"]], None);
        assert_eq!(table.column_widths(), vec![5]);
    }

    #[test]
    fn markdown_layout() {
        let expected = "| Name  | Age |\n|-------|-----|\n| Alice | 30  |\n| Bob   | 5   |";
        assert_eq!(people().render(&FormatTarget::MARKDOWN), expected);
        assert_eq!(people().render(&FormatTarget::DISCORD_MARKDOWN), expected);
    }

    #[test]
    fn markdown_separator_alignment() {
        let table = people().with_alignments(vec![TableAlignment::Center, TableAlignment::Right]);
        let rendered = table.render(&FormatTarget::MARKDOWN);
        let separator = rendered.lines().nth(1).expect("separator");
        assert_eq!(separator, "|:-----:|---:|");
    }

    #[test]
    fn slack_wraps_plain_layout_in_code_block() {
        assert_eq!(
            people().render(&FormatTarget::SLACK_MARKDOWN),
            "```\nName  | Age\n------+----\nAlice | 30 \nBob   | 5  \n```"
        );
    }

    #[test]
    fn plaintext_layout() {
        assert_eq!(
            people().render(&FormatTarget::PLAINTEXT),
            "Name  | Age\n------+----\nAlice | 30 \nBob   | 5  "
        );
    }

    #[test]
    fn html_is_structural_and_escaped() {
        let table = Table::from_data(vec![vec!["a<b"]], Some(vec!["H&".into()]))
            .with_caption("Stats");
        assert_eq!(
            table.render(&FormatTarget::HTML),
            "<table><caption>Stats</caption><thead><tr><th>H&amp;</th></tr></thead><tbody><tr><td>a&lt;b</td></tr></tbody></table>"
        );
    }

    #[test]
    fn html_marks_header_cells_in_body() {
        let table = Table {
            rows: vec![TableRow::new(vec![TableCell::header("k"), TableCell::new("v")])],
            ..Table::default()
        };
        assert_eq!(
            table.render(&FormatTarget::HTML),
            "<table><tbody><tr><th>k</th><td>v</td></tr></tbody></table>"
        );
    }

    #[test]
    fn messageml_escapes_reserved_sequences() {
        let table = Table::from_data(vec![vec!["${x}"]], Some(vec!["#{y}".into()]))
            .with_caption("ignored");
        let rendered = table.render(&FormatTarget::SYMPHONY_MESSAGEML);
        assert_eq!(
            rendered,
            "<table><thead><tr><th>&#35;{y}</th></tr></thead><tbody><tr><td>&#36;{x}</td></tr></tbody></table>"
        );
    }

    #[test]
    fn empty_table_renders_nothing() {
        for target in [
            FormatTarget::MARKDOWN,
            FormatTarget::SLACK_MARKDOWN,
            FormatTarget::DISCORD_MARKDOWN,
            FormatTarget::HTML,
            FormatTarget::SYMPHONY_MESSAGEML,
            FormatTarget::PLAINTEXT,
            FormatTarget::new("unknown"),
        ] {
            assert_eq!(Table::new().render(&target), "");
        }
    }

    #[test]
    fn records_use_first_keys_and_fill_gaps() {
        let records = vec![
            json!({"age": 30, "name": "Alice"}),
            json!({"name": "Bob", "note": null}),
        ]
        .into_iter()
        .map(|value| value.as_object().cloned().unwrap_or_default())
        .collect::<Vec<_>>();
        let table = Table::from_records(&records, None);
        let headers = table.headers.as_ref().expect("headers");
        assert_eq!(headers.cells.len(), 2);
        assert!(headers.is_header);
        assert_eq!(table.rows[0].cells[0].content, "30");
        assert_eq!(table.rows[1].cells[0].content, "");

        let picked = Table::from_records(&records, Some(vec!["name".into()]));
        assert_eq!(picked.rows[1].cells[0].content, "Bob");
        assert!(Table::from_records(&[], None).is_empty());
    }

    #[test]
    fn spans_are_at_least_one() {
        let cell = TableCell::new("x").with_span(0, 3);
        assert_eq!((cell.colspan, cell.rowspan), (1, 3));
    }
}
