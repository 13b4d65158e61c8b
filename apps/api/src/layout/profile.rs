//! Render profiles: immutable style configuration passed into the formatter.
//!
//! All sizes are in PDF points. `compact` carries the single-page tuning the
//! résumé was designed around; `spacious` trades density for air.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A4 portrait.
pub const A4: PageSize = PageSize {
    width: 595.28,
    height: 841.89,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    #[default]
    Compact,
    Spacious,
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileKind::Compact => write!(f, "compact"),
            ProfileKind::Spacious => write!(f, "spacious"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown render profile '{0}' (expected 'compact' or 'spacious')")]
pub struct UnknownProfile(pub String);

impl FromStr for ProfileKind {
    type Err = UnknownProfile;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(ProfileKind::Compact),
            "spacious" => Ok(ProfileKind::Spacious),
            other => Err(UnknownProfile(other.to_string())),
        }
    }
}

/// sRGB color, 0-255 per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels scaled to 0.0..=1.0, the form PDF color operators take.
    pub fn unit(&self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Palette {
    pub text: Rgb,
    pub muted: Rgb,
    pub hair: Rgb,
    pub link: Rgb,
}

const PALETTE: Palette = Palette {
    text: Rgb::new(0x0b, 0x13, 0x20),
    muted: Rgb::new(0x3b, 0x47, 0x58),
    hair: Rgb::new(0xd9, 0xdd, 0xe3),
    link: Rgb::new(0x1d, 0x4e, 0xd8),
};

/// Font sizes for each text role.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TypeScale {
    pub base: f32,
    pub name: f32,
    pub headline: f32,
    pub contact: f32,
    pub link: f32,
    pub section_title: f32,
    /// Letter spacing applied to section titles.
    pub section_tracking: f32,
    pub title: f32,
    pub meta: f32,
    pub tag: f32,
    pub tiny: f32,
}

impl TypeScale {
    fn scaled(&self, factor: f32) -> Self {
        Self {
            base: self.base * factor,
            name: self.name * factor,
            headline: self.headline * factor,
            contact: self.contact * factor,
            link: self.link * factor,
            section_title: self.section_title * factor,
            section_tracking: self.section_tracking * factor,
            title: self.title * factor,
            meta: self.meta * factor,
            tag: self.tag * factor,
            tiny: self.tiny * factor,
        }
    }
}

/// Vertical and horizontal gaps between blocks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Spacing {
    pub after_name: f32,
    pub after_headline: f32,
    pub after_contact: f32,
    pub after_links: f32,
    pub hairline_margin: f32,
    pub section_top: f32,
    pub section_title_bottom: f32,
    pub entry_gap: f32,
    pub education_gap: f32,
    pub tag_top: f32,
    pub list_indent: f32,
    /// Minimum horizontal gap between an entry title and its date range.
    pub date_gap: f32,
}

impl Spacing {
    fn scaled(&self, factor: f32) -> Self {
        Self {
            after_name: self.after_name * factor,
            after_headline: self.after_headline * factor,
            after_contact: self.after_contact * factor,
            after_links: self.after_links * factor,
            hairline_margin: self.hairline_margin * factor,
            section_top: self.section_top * factor,
            section_title_bottom: self.section_title_bottom * factor,
            entry_gap: self.entry_gap * factor,
            education_gap: self.education_gap * factor,
            tag_top: self.tag_top * factor,
            list_indent: self.list_indent * factor,
            date_gap: self.date_gap * factor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderProfile {
    pub kind: ProfileKind,
    pub page: PageSize,
    pub padding_x: f32,
    pub padding_y: f32,
    /// Multiplier on font size.
    pub line_height: f32,
    pub type_scale: TypeScale,
    pub spacing: Spacing,
    pub palette: Palette,
    pub hairline: f32,
}

const COMPACT_TYPE: TypeScale = TypeScale {
    base: 9.0,
    name: 13.2,
    headline: 9.1,
    contact: 8.5,
    link: 8.4,
    section_title: 9.0,
    section_tracking: 0.5,
    title: 9.1,
    meta: 8.3,
    tag: 8.3,
    tiny: 8.0,
};

const COMPACT_SPACING: Spacing = Spacing {
    after_name: 0.5,
    after_headline: 0.5,
    after_contact: 1.0,
    after_links: 1.0,
    hairline_margin: 2.0,
    section_top: 3.0,
    section_title_bottom: 0.8,
    entry_gap: 3.0,
    education_gap: 2.0,
    tag_top: 0.2,
    list_indent: 4.0,
    date_gap: 8.0,
};

impl RenderProfile {
    pub fn compact() -> Self {
        Self {
            kind: ProfileKind::Compact,
            page: A4,
            padding_x: 18.0,
            padding_y: 12.0,
            line_height: 1.06,
            type_scale: COMPACT_TYPE,
            spacing: COMPACT_SPACING,
            palette: PALETTE,
            hairline: 0.6,
        }
    }

    pub fn spacious() -> Self {
        let factor = 10.5 / COMPACT_TYPE.base;
        Self {
            kind: ProfileKind::Spacious,
            page: A4,
            padding_x: 36.0,
            padding_y: 30.0,
            line_height: 1.2,
            type_scale: COMPACT_TYPE.scaled(factor),
            spacing: COMPACT_SPACING.scaled(2.0),
            palette: PALETTE,
            hairline: 0.6,
        }
    }

    pub fn for_kind(kind: ProfileKind) -> Self {
        match kind {
            ProfileKind::Compact => Self::compact(),
            ProfileKind::Spacious => Self::spacious(),
        }
    }

    pub fn content_width(&self) -> f32 {
        self.page.width - 2.0 * self.padding_x
    }

    /// Lowest y (from the top edge) a line may end at before the page overflows.
    pub fn bottom_limit(&self) -> f32 {
        self.page.height - self.padding_y
    }

    pub fn line_advance(&self, size: f32) -> f32 {
        size * self.line_height
    }
}

impl Default for RenderProfile {
    fn default() -> Self {
        Self::compact()
    }
}
