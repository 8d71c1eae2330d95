pub mod app;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod input;
pub mod output;

pub use dataset::{Cell, Dataset, LabelSet, Row, PROPERTY_LABEL_COLUMN};
pub use output::{render, Document, FormRenderer, RenderError, RenderOptions};

#[cfg(test)]
mod tests;
