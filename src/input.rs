//! JSON table descriptions, as read by the command-line tool.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::DecoratedOptions;
use crate::content::SectionInput;
use crate::error::Result;
use crate::model::{Margin, ShowFoot, ShowHead};
use crate::table::{StyleOverrides, TableOptions};

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(untagged)]
enum MarginRepr {
    Uniform(f32),
    Sides(Margin),
}

impl From<MarginRepr> for Margin {
    fn from(repr: MarginRepr) -> Self {
        match repr {
            MarginRepr::Uniform(value) => Margin::uniform(value),
            MarginRepr::Sides(margin) => margin,
        }
    }
}

/// A table as written in a JSON file. Sections are sniffed for rich runs
/// individually; everything else mirrors [`TableOptions`].
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableFile {
    pub head: Value,
    pub body: Value,
    pub foot: Value,
    pub show_head: Option<ShowHead>,
    pub show_foot: Option<ShowFoot>,
    pub start_y: Option<f32>,
    margin: Option<MarginRepr>,
    pub styles: StyleOverrides,
    pub head_styles: Option<StyleOverrides>,
    pub body_styles: Option<StyleOverrides>,
    pub foot_styles: Option<StyleOverrides>,
    pub column_widths: Vec<Option<f32>>,
}

impl TableFile {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn into_decorated(self) -> Result<DecoratedOptions> {
        let defaults = TableOptions::default();
        let options = TableOptions {
            start_y: self.start_y,
            margin: self.margin.map(Margin::from).unwrap_or_default(),
            styles: defaults.styles.with(&self.styles),
            head_styles: self.head_styles.unwrap_or(defaults.head_styles),
            body_styles: self.body_styles.unwrap_or(defaults.body_styles),
            foot_styles: self.foot_styles.unwrap_or(defaults.foot_styles),
            column_widths: self.column_widths,
            ..TableOptions::default()
        };
        Ok(DecoratedOptions {
            head: SectionInput::from_json(&self.head)?,
            body: SectionInput::from_json(&self.body)?,
            foot: SectionInput::from_json(&self.foot)?,
            show_head: self.show_head,
            show_foot: self.show_foot,
            options,
        })
    }
}
