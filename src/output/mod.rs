pub mod form;

use std::fmt;

use thiserror::Error;

use crate::dataset::{Dataset, LabelSet, PROPERTY_LABEL_COLUMN};

pub const DEFAULT_TITLE: &str = "Property Observations";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("column '{column}' is missing from every row")]
    MissingColumn { column: &'static str },

    #[error("failed to serialize {what}: {source}")]
    Serialize {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Wrap the fragment in a complete HTML page.
    pub standalone: bool,
    /// Page title, only used with `standalone`.
    pub title: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            standalone: false,
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

/// Rendered HTML.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document(String);

impl Document {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Document {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Document> for String {
    fn from(doc: Document) -> Self {
        doc.0
    }
}

/// Turns a dataset into the property filter form.
///
/// Rendering is pure: the same dataset always yields the same document, and a
/// renderer can be shared across threads.
#[derive(Clone, Debug, Default)]
pub struct FormRenderer {
    options: RenderOptions,
}

impl FormRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn render(&self, rows: &Dataset) -> Result<Document, RenderError> {
        if !rows.is_empty() && !rows.has_column(PROPERTY_LABEL_COLUMN) {
            return Err(RenderError::MissingColumn {
                column: PROPERTY_LABEL_COLUMN,
            });
        }

        let labels = LabelSet::from_dataset(rows, PROPERTY_LABEL_COLUMN);
        log::debug!(
            "rendering {} row(s), {} label(s), {} unselectable",
            rows.len(),
            labels.len(),
            rows.unlabeled_rows(PROPERTY_LABEL_COLUMN)
        );

        let data_json = serde_json::to_string(rows).map_err(|source| RenderError::Serialize {
            what: "rows",
            source,
        })?;
        let properties_json =
            serde_json::to_string(&labels).map_err(|source| RenderError::Serialize {
                what: "labels",
                source,
            })?;

        let fragment = form::render_fragment(&data_json, &properties_json);
        let html = if self.options.standalone {
            form::wrap_page(&self.options.title, &fragment)
        } else {
            fragment
        };
        Ok(Document(html))
    }
}

/// Renders with default options.
pub fn render(rows: &Dataset) -> Result<Document, RenderError> {
    FormRenderer::default().render(rows)
}

pub(crate) fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Row;

    #[test]
    fn escape_html_handles_ampersand_first() {
        assert_eq!(escape_html("a&<b>"), "a&amp;&lt;b&gt;");
        assert_eq!(escape_html(r#""x' "#), "&quot;x&#39; ");
    }

    #[test]
    fn empty_dataset_renders_empty_payloads() {
        let doc = render(&Dataset::default()).unwrap();
        assert!(doc.as_str().contains("const data = [];"));
        assert!(doc.as_str().contains("const uniqueProperties = [];"));
    }

    #[test]
    fn missing_column_is_an_error() {
        let ds = Dataset::from(vec![Row::new().with("value", 1)]);
        let err = render(&ds).unwrap_err();
        assert!(matches!(
            err,
            RenderError::MissingColumn {
                column: PROPERTY_LABEL_COLUMN
            }
        ));
        assert_eq!(
            err.to_string(),
            "column 'propertyaltlabel' is missing from every row"
        );
    }

    #[test]
    fn column_present_in_one_row_is_enough() {
        let ds = Dataset::from(vec![
            Row::new().with("value", 1),
            Row::new().with(PROPERTY_LABEL_COLUMN, "Temperature"),
        ]);
        assert!(render(&ds).is_ok());
    }

    #[test]
    fn fragment_is_default_and_standalone_wraps() {
        let ds = Dataset::from(vec![Row::new().with(PROPERTY_LABEL_COLUMN, "Salinity")]);
        let fragment = render(&ds).unwrap();
        assert!(!fragment.as_str().contains("<!DOCTYPE html>"));

        let page = FormRenderer::new(RenderOptions {
            standalone: true,
            title: "Station A".to_string(),
        })
        .render(&ds)
        .unwrap();
        assert!(page.as_str().starts_with("<!DOCTYPE html>"));
        assert!(page.as_str().contains("<title>Station A</title>"));
        assert!(page.as_str().contains(fragment.as_str()));
    }
}
