//! Text block configuration
//!
//! The JSON form uses the editor's camelCase names. Older presets used
//! `lineSpacingBetween` for the inter-line gap and
//! `lineSpacingVertical` / `lineSpacingHorizontal` for block padding; both
//! are accepted as aliases.

use serde::{Deserialize, Serialize};

use crate::font::{FontSpec, FontStyle, FontWeight};
use crate::geometry::{Color, Insets, Rect};
use crate::line::Alignment;

/// Font size: fixed pixels or searched by auto-fit
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "FontSizeRepr", into = "FontSizeRepr")]
pub enum FontSize {
    #[default]
    Auto,
    Px(f32),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum FontSizeRepr {
    Px(f32),
    Keyword(String),
}

impl TryFrom<FontSizeRepr> for FontSize {
    type Error = String;

    fn try_from(value: FontSizeRepr) -> Result<Self, Self::Error> {
        match value {
            FontSizeRepr::Px(px) => Ok(FontSize::Px(px)),
            FontSizeRepr::Keyword(word) if word.eq_ignore_ascii_case("auto") => Ok(FontSize::Auto),
            FontSizeRepr::Keyword(word) => word
                .trim()
                .trim_end_matches("px")
                .parse()
                .map(FontSize::Px)
                .map_err(|_| format!("invalid font size: {word}")),
        }
    }
}

impl From<FontSize> for FontSizeRepr {
    fn from(size: FontSize) -> Self {
        match size {
            FontSize::Auto => FontSizeRepr::Keyword("auto".into()),
            FontSize::Px(px) => FontSizeRepr::Px(px),
        }
    }
}

/// How the font size and wrapping are chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FitMode {
    /// Wrap and (for auto size) search the largest size that fills the canvas
    #[default]
    FillCanvas,
    /// Keep the designer's size and line breaks; only shrink to fit the width
    Manual,
}

/// Block anchor, horizontal axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalPosition {
    Left,
    #[default]
    Center,
    Right,
}

/// Block anchor, vertical axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalPosition {
    Top,
    #[default]
    Center,
    Bottom,
}

/// Character styling toggles
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextStyles {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub highlight: bool,
    pub highlight_color: Option<Color>,
}

/// Which line-height function a layout uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeightMode {
    /// Cap-height or x-height depending on the line's letters
    #[default]
    Tight,
    /// Ascent + descent, for independently placed lines that must not overlap
    FullLineBox,
}

/// Per-variant layout defaults (main text block vs. content-slot text)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutPolicy {
    pub height_mode: HeightMode,
    pub default_alignment: Alignment,
    pub default_padding: Insets,
}

impl LayoutPolicy {
    /// The single coherent text block of a design
    pub fn main_text() -> Self {
        Self {
            height_mode: HeightMode::Tight,
            default_alignment: Alignment::Center,
            default_padding: Insets::all(40.0),
        }
    }

    /// Text laid into a content slot
    pub fn slot_text() -> Self {
        Self {
            height_mode: HeightMode::FullLineBox,
            default_alignment: Alignment::Left,
            default_padding: Insets::all(0.0),
        }
    }

    /// A config carrying this policy's defaults
    pub fn default_config(&self) -> TextBlockConfig {
        let mut config = TextBlockConfig::default();
        config.set_insets(self.default_padding);
        config
    }
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        Self::main_text()
    }
}

/// Complete configuration of one text block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextBlockConfig {
    pub font_family: String,
    pub font_size: FontSize,
    pub font_weight: FontWeight,
    pub font_style: FontStyle,
    pub color: Color,
    /// Gap between consecutive lines
    #[serde(alias = "lineSpacingBetween")]
    pub line_spacing: f32,
    /// Padding above and below the block
    #[serde(alias = "lineSpacingVertical")]
    pub block_padding_vertical: f32,
    /// Padding left and right of the block
    #[serde(alias = "lineSpacingHorizontal")]
    pub block_padding_horizontal: f32,
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub padding_top: f32,
    pub padding_bottom: f32,
    pub padding_left: f32,
    pub padding_right: f32,
    pub min_font_size: f32,
    pub max_font_size: f32,
    pub mode: FitMode,
    pub text_position_vertical: VerticalPosition,
    pub text_position_horizontal: HorizontalPosition,
    /// Default line alignment; the layout policy decides when unset
    pub text_align: Option<Alignment>,
    pub text_styles: TextStyles,
}

impl Default for TextBlockConfig {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".into(),
            font_size: FontSize::Auto,
            font_weight: FontWeight::Normal,
            font_style: FontStyle::Normal,
            color: Color::BLACK,
            line_spacing: 10.0,
            block_padding_vertical: 0.0,
            block_padding_horizontal: 0.0,
            canvas_width: 1080.0,
            canvas_height: 1080.0,
            padding_top: 40.0,
            padding_bottom: 40.0,
            padding_left: 40.0,
            padding_right: 40.0,
            min_font_size: 12.0,
            max_font_size: 120.0,
            mode: FitMode::FillCanvas,
            text_position_vertical: VerticalPosition::Center,
            text_position_horizontal: HorizontalPosition::Center,
            text_align: None,
            text_styles: TextStyles::default(),
        }
    }
}

impl TextBlockConfig {
    /// Container padding
    pub fn insets(&self) -> Insets {
        Insets::new(self.padding_top, self.padding_right, self.padding_bottom, self.padding_left)
    }

    pub fn set_insets(&mut self, insets: Insets) {
        self.padding_top = insets.top;
        self.padding_right = insets.right;
        self.padding_bottom = insets.bottom;
        self.padding_left = insets.left;
    }

    /// The whole drawing surface
    pub fn canvas(&self) -> Rect {
        Rect::new(0.0, 0.0, self.canvas_width, self.canvas_height)
    }

    /// Font at `size`, with bold / italic toggles folded in
    pub fn font_spec(&self, size: f32) -> FontSpec {
        let bold = self.font_weight == FontWeight::Bold || self.text_styles.bold;
        let italic = self.font_style == FontStyle::Italic || self.text_styles.italic;
        FontSpec::new(self.font_family.clone(), size).bold(bold).italic(italic)
    }

    /// Shallow merge of every field set in `patch`
    pub fn apply(&mut self, patch: ConfigPatch) {
        macro_rules! merge {
            ($($field:ident),* $(,)?) => {
                $(if let Some(value) = patch.$field {
                    self.$field = value;
                })*
            };
        }
        merge!(
            font_family,
            font_size,
            font_weight,
            font_style,
            color,
            line_spacing,
            block_padding_vertical,
            block_padding_horizontal,
            canvas_width,
            canvas_height,
            padding_top,
            padding_bottom,
            padding_left,
            padding_right,
            min_font_size,
            max_font_size,
            mode,
            text_position_vertical,
            text_position_horizontal,
            text_styles,
        );
        if let Some(align) = patch.text_align {
            self.text_align = Some(align);
        }
    }
}

/// Partial configuration for [`TextBlockConfig::apply`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigPatch {
    pub font_family: Option<String>,
    pub font_size: Option<FontSize>,
    pub font_weight: Option<FontWeight>,
    pub font_style: Option<FontStyle>,
    pub color: Option<Color>,
    #[serde(alias = "lineSpacingBetween")]
    pub line_spacing: Option<f32>,
    #[serde(alias = "lineSpacingVertical")]
    pub block_padding_vertical: Option<f32>,
    #[serde(alias = "lineSpacingHorizontal")]
    pub block_padding_horizontal: Option<f32>,
    pub canvas_width: Option<f32>,
    pub canvas_height: Option<f32>,
    pub padding_top: Option<f32>,
    pub padding_bottom: Option<f32>,
    pub padding_left: Option<f32>,
    pub padding_right: Option<f32>,
    pub min_font_size: Option<f32>,
    pub max_font_size: Option<f32>,
    pub mode: Option<FitMode>,
    pub text_position_vertical: Option<VerticalPosition>,
    pub text_position_horizontal: Option<HorizontalPosition>,
    pub text_align: Option<Alignment>,
    pub text_styles: Option<TextStyles>,
}
