//! Two-row table header used by the printable report.
//!
//! Row one holds the category names. A category with sub-columns spans them on
//! row one and lists its sub-labels on row two; a scalar category spans both rows.

use crate::transform::header_config::HeaderConfig;
use crate::types::row::NormalizedRow;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderCell {
    pub label: String,
    pub col_span: usize,
    pub row_span: usize,
}

impl HeaderCell {
    fn new(label: impl Into<String>, col_span: usize, row_span: usize) -> Self {
        Self {
            label: label.into(),
            col_span,
            row_span,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportHeader {
    pub categories: Vec<HeaderCell>,
    pub sub_labels: Vec<HeaderCell>,
    /// `(category, sub_label)` of every body column, left to right. Scalar
    /// categories have an empty sub-label.
    #[serde(skip)]
    leaves: Vec<(String, String)>,
}

impl ReportHeader {
    /// Number of body columns.
    pub fn width(&self) -> usize {
        self.leaves.len()
    }

    pub fn leaves(&self) -> &[(String, String)] {
        &self.leaves
    }

    /// Body cells of `rows` in header order, missing cells rendered as `"—"`.
    pub fn body(&self, rows: &[NormalizedRow]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| {
                self.leaves
                    .iter()
                    .map(|(category, sub)| row.display_cell(category, sub))
                    .collect()
            })
            .collect()
    }
}

/// Lays out the header for `columns`, in that order.
///
/// Columns missing from `config` are skipped.
pub fn report_header(config: &HeaderConfig, columns: &[String]) -> ReportHeader {
    let mut header = ReportHeader::default();

    for column in columns {
        let Some(subs) = config.get(column) else {
            continue;
        };
        if config.is_grouped(column) {
            header.categories.push(HeaderCell::new(column, subs.len(), 1));
            for sub in subs {
                header.sub_labels.push(HeaderCell::new(sub, 1, 1));
                header.leaves.push((column.clone(), sub.clone()));
            }
        } else {
            header.categories.push(HeaderCell::new(column, 1, 2));
            header.leaves.push((column.clone(), String::new()));
        }
    }

    header
}
