use serde::Serialize;

use crate::foundation::core::Rgb8;

pub const MIN_COLUMNS: u32 = 1;
pub const MAX_COLUMNS: u32 = 20;
pub const MIN_TIERS: u32 = 1;
pub const MAX_TIERS: u32 = 10;
pub const DEFAULT_CONTROL_PANEL_TIER_SPAN: u32 = 4;
pub const MIN_CUSTOM_RATIO: f64 = 0.5;
pub const MAX_CUSTOM_RATIO: f64 = 5.0;
pub const MAX_FRAME_TEXT_CHARS: usize = 32;

/// How tier heights are weighted.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "ratios")]
pub enum TierHeightMode {
    /// Every tier has the same height.
    Uniform,
    /// The top tier is twice as tall as the others.
    TopLarge,
    /// The bottom tier is twice as tall as the others.
    BottomLarge,
    /// Top and bottom tiers are twice as tall as the others.
    BothLarge,
    /// Caller-supplied relative weights, one per tier.
    Custom(Vec<f64>),
}

impl TierHeightMode {
    /// Relative weight of each tier for a grid of `tiers` rows.
    pub fn ratios(&self, tiers: u32) -> Vec<f64> {
        let n = tiers as usize;
        let mut ratios = vec![1.0; n];
        match self {
            Self::Uniform => {}
            Self::TopLarge => {
                if let Some(first) = ratios.first_mut() {
                    *first = 2.0;
                }
            }
            Self::BottomLarge => {
                if let Some(last) = ratios.last_mut() {
                    *last = 2.0;
                }
            }
            Self::BothLarge => {
                if let Some(first) = ratios.first_mut() {
                    *first = 2.0;
                }
                if let Some(last) = ratios.last_mut() {
                    *last = 2.0;
                }
            }
            Self::Custom(custom) => {
                for (dst, src) in ratios.iter_mut().zip(custom) {
                    *dst = *src;
                }
            }
        }
        ratios
    }
}

/// Which frame bands surround the locker body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameType {
    #[default]
    None,
    FullSet,
    TopOnly,
    SideOnly,
    TopAndSide,
}

impl FrameType {
    pub fn has_top(self) -> bool {
        matches!(self, Self::TopOnly | Self::FullSet | Self::TopAndSide)
    }

    pub fn has_sides(self) -> bool {
        matches!(self, Self::SideOnly | Self::FullSet | Self::TopAndSide)
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match canonical_token(s).as_str() {
            "none" => Some(Self::None),
            "fullset" => Some(Self::FullSet),
            "toponly" => Some(Self::TopOnly),
            "sideonly" => Some(Self::SideOnly),
            "topandside" => Some(Self::TopAndSide),
            _ => None,
        }
    }
}

/// Catalogue finishes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedColor {
    White,
    Ivory,
    #[default]
    Gray,
    Silver,
    Black,
    Navy,
    Blue,
    Red,
    Green,
    Yellow,
    Orange,
}

impl NamedColor {
    pub fn rgb(self) -> Rgb8 {
        match self {
            Self::White => Rgb8::new(245, 245, 245),
            Self::Ivory => Rgb8::new(236, 228, 205),
            Self::Gray => Rgb8::new(128, 128, 128),
            Self::Silver => Rgb8::new(192, 192, 192),
            Self::Black => Rgb8::new(43, 43, 43),
            Self::Navy => Rgb8::new(31, 45, 86),
            Self::Blue => Rgb8::new(40, 96, 170),
            Self::Red => Rgb8::new(178, 34, 34),
            Self::Green => Rgb8::new(46, 125, 50),
            Self::Yellow => Rgb8::new(240, 200, 40),
            Self::Orange => Rgb8::new(230, 120, 30),
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match canonical_token(s).as_str() {
            "white" => Some(Self::White),
            "ivory" => Some(Self::Ivory),
            "gray" | "grey" => Some(Self::Gray),
            "silver" => Some(Self::Silver),
            "black" => Some(Self::Black),
            "navy" => Some(Self::Navy),
            "blue" => Some(Self::Blue),
            "red" => Some(Self::Red),
            "green" => Some(Self::Green),
            "yellow" => Some(Self::Yellow),
            "orange" => Some(Self::Orange),
            _ => None,
        }
    }
}

/// Target finish of the locker body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LockerColor {
    Named(NamedColor),
    Custom(Rgb8),
}

impl Default for LockerColor {
    fn default() -> Self {
        Self::Named(NamedColor::default())
    }
}

impl LockerColor {
    pub fn rgb(self) -> Rgb8 {
        match self {
            Self::Named(n) => n.rgb(),
            Self::Custom(c) => c,
        }
    }
}

/// Fully validated locker configuration. Produced only by
/// [`normalize_request`](crate::normalize_request).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    pub columns: u32,
    pub tiers: u32,
    pub tier_height_mode: TierHeightMode,
    /// `0` means no control panel; otherwise a 1-based column index.
    pub control_panel_column: u32,
    pub control_panel_tier_span: u32,
    pub frame_type: FrameType,
    pub color: LockerColor,
    pub handle: bool,
    pub frame_text: String,
}

impl LayoutConfig {
    pub fn has_control_panel(&self) -> bool {
        self.control_panel_column > 0
    }

    /// Zero-based index of the control-panel column.
    pub fn control_panel_index(&self) -> Option<u32> {
        self.control_panel_column.checked_sub(1)
    }
}

/// Lowercase and drop `_`, `-` and whitespace so `Top-Only`, `top_only` and `TopOnly` agree.
pub(crate) fn canonical_token(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '_' | '-') && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}
