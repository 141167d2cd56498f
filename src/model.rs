use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEffect {
    Bold,
    Italic,
    BoldItalic,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    Super,
    Sub,
}

/// A span of cell text sharing one style.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StyledRun {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<TextEffect>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<Script>,
}

impl StyledRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            effect: None,
            script: None,
        }
    }

    pub fn styled(text: impl Into<String>, effect: TextEffect) -> Self {
        Self {
            text: text.into(),
            effect: Some(effect),
            script: None,
        }
    }

    pub fn scripted(text: impl Into<String>, script: Script) -> Self {
        Self {
            text: text.into(),
            effect: None,
            script: Some(script),
        }
    }
}

/// Runs drawn left-to-right on one physical line.
pub type Line = Vec<StyledRun>;

/// All lines of one cell, blank lines included.
pub type CellRichText = Vec<Line>;

/// Row-major grid of rich cells for one section. `None` cells keep their
/// plain text.
pub type RichGrid = Vec<Vec<Option<CellRichText>>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Head,
    Body,
    Foot,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Section::Head => "head",
            Section::Body => "body",
            Section::Foot => "foot",
        })
    }
}

/// Canonical rich grids for the sections that were given in rich form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RichSections {
    pub head: Option<RichGrid>,
    pub body: Option<RichGrid>,
    pub foot: Option<RichGrid>,
}

impl RichSections {
    pub fn get(&self, section: Section) -> Option<&RichGrid> {
        match section {
            Section::Head => self.head.as_ref(),
            Section::Body => self.body.as_ref(),
            Section::Foot => self.foot.as_ref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none() && self.body.is_none() && self.foot.is_none()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "PolicyRepr")]
pub enum ShowHead {
    #[default]
    EveryPage,
    FirstPage,
    Never,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "PolicyRepr")]
pub enum ShowFoot {
    #[default]
    EveryPage,
    LastPage,
    Never,
}

/// Show-policies arrive either as a policy name or as a plain on/off flag.
#[derive(Deserialize)]
#[serde(untagged)]
enum PolicyRepr {
    Flag(bool),
    Name(String),
}

impl TryFrom<PolicyRepr> for ShowHead {
    type Error = String;

    fn try_from(repr: PolicyRepr) -> Result<Self, Self::Error> {
        match repr {
            PolicyRepr::Flag(flag) => Ok(Self::from(flag)),
            PolicyRepr::Name(name) => match name.as_str() {
                "everyPage" => Ok(Self::EveryPage),
                "firstPage" => Ok(Self::FirstPage),
                "never" => Ok(Self::Never),
                other => Err(format!("unknown showHead policy `{other}`")),
            },
        }
    }
}

impl TryFrom<PolicyRepr> for ShowFoot {
    type Error = String;

    fn try_from(repr: PolicyRepr) -> Result<Self, Self::Error> {
        match repr {
            PolicyRepr::Flag(flag) => Ok(Self::from(flag)),
            PolicyRepr::Name(name) => match name.as_str() {
                "everyPage" => Ok(Self::EveryPage),
                "lastPage" => Ok(Self::LastPage),
                "never" => Ok(Self::Never),
                other => Err(format!("unknown showFoot policy `{other}`")),
            },
        }
    }
}

impl From<bool> for ShowHead {
    fn from(visible: bool) -> Self {
        if visible { Self::EveryPage } else { Self::Never }
    }
}

impl From<bool> for ShowFoot {
    fn from(visible: bool) -> Self {
        if visible { Self::EveryPage } else { Self::Never }
    }
}

/// Where a rendered page sits in the sequence of pages of one table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PagePosition {
    First,
    Middle,
    Last,
    /// The only page: first and last at once.
    OnePage,
}

impl PagePosition {
    pub fn of(index: usize, total: usize) -> Self {
        if total <= 1 {
            PagePosition::OnePage
        } else if index == 0 {
            PagePosition::First
        } else if index + 1 == total {
            PagePosition::Last
        } else {
            PagePosition::Middle
        }
    }

    /// Resolve which of head and foot are drawn on a page at this position.
    pub fn visibility(self, show_head: ShowHead, show_foot: ShowFoot) -> (bool, bool) {
        let head = match show_head {
            ShowHead::EveryPage => true,
            ShowHead::FirstPage => matches!(self, PagePosition::First | PagePosition::OnePage),
            ShowHead::Never => false,
        };
        let foot = match show_foot {
            ShowFoot::EveryPage => true,
            ShowFoot::LastPage => matches!(self, PagePosition::Last | PagePosition::OnePage),
            ShowFoot::Never => false,
        };
        (head, foot)
    }
}

/// One of the four head/foot visibility combinations a table can be probed under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Appearance {
    BodyOnly,
    Head,
    Foot,
    HeadFoot,
}

impl Appearance {
    pub const ALL: [Appearance; 4] = [
        Appearance::BodyOnly,
        Appearance::Head,
        Appearance::Foot,
        Appearance::HeadFoot,
    ];

    pub fn from_visibility(head: bool, foot: bool) -> Self {
        match (head, foot) {
            (false, false) => Appearance::BodyOnly,
            (true, false) => Appearance::Head,
            (false, true) => Appearance::Foot,
            (true, true) => Appearance::HeadFoot,
        }
    }

    pub fn shows_head(self) -> bool {
        matches!(self, Appearance::Head | Appearance::HeadFoot)
    }

    pub fn shows_foot(self) -> bool {
        matches!(self, Appearance::Foot | Appearance::HeadFoot)
    }
}

impl fmt::Display for Appearance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Appearance::BodyOnly => "body only",
            Appearance::Head => "head",
            Appearance::Foot => "foot",
            Appearance::HeadFoot => "head and foot",
        })
    }
}

/// Body rows fitting on a first page, per head/foot visibility combination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppearanceCapacities {
    pub body_only: usize,
    pub head: usize,
    pub foot: usize,
    pub head_foot: usize,
}

impl AppearanceCapacities {
    pub fn get(&self, appearance: Appearance) -> usize {
        match appearance {
            Appearance::BodyOnly => self.body_only,
            Appearance::Head => self.head,
            Appearance::Foot => self.foot,
            Appearance::HeadFoot => self.head_foot,
        }
    }

    pub fn set(&mut self, appearance: Appearance, rows: usize) {
        match appearance {
            Appearance::BodyOnly => self.body_only = rows,
            Appearance::Head => self.head = rows,
            Appearance::Foot => self.foot = rows,
            Appearance::HeadFoot => self.head_foot = rows,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionCapacities {
    pub first: usize,
    pub middle: usize,
    pub last: usize,
}

/// Inclusive body-row bounds for one rendered page. An empty body is `{0, -1}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRowDelimit {
    pub min: isize,
    pub max: isize,
}

impl PageRowDelimit {
    pub fn new(min: isize, max: isize) -> Self {
        Self { min, max }
    }

    pub fn len(&self) -> usize {
        (self.max - self.min + 1).max(0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.max < self.min
    }

    /// Half-open index range, clamped to a body of `body_len` rows.
    pub fn rows(&self, body_len: usize) -> Range<usize> {
        let start = self.min.max(0) as usize;
        let end = (self.max + 1).max(0) as usize;
        let end = end.min(body_len);
        start.min(end)..end
    }
}

impl fmt::Display for PageRowDelimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{}]", self.min, self.max)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Bold,
    Italic,
    BoldItalic,
}

impl From<TextEffect> for FontStyle {
    fn from(effect: TextEffect) -> Self {
        match effect {
            TextEffect::Bold => FontStyle::Bold,
            TextEffect::Italic => FontStyle::Italic,
            TextEffect::BoldItalic => FontStyle::BoldItalic,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    #[default]
    Helvetica,
    Times,
    Courier,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margin {
    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

impl Default for Margin {
    fn default() -> Self {
        // 40pt ~ 14mm
        Self::uniform(40.0)
    }
}
