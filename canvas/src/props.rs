//! Component types and their typed property records.
//!
//! On the wire a component's `props` is an open JSON object. In memory every
//! component type has its own record, collected in the [`ComponentProps`]
//! union keyed by [`ComponentKind`]. Each record keeps an `extra` map so keys
//! the record does not model survive a load/save round trip untouched.
//!
//! Conversion between the two shapes goes through [`ComponentProps::to_bag`]
//! and [`ComponentProps::from_bag`]; a bag whose values contradict a typed
//! field is rejected rather than coerced.

#[cfg(test)]
#[path = "props_test.rs"]
mod props_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::consts::{DEFAULT_EXTRA_TURNS, DEFAULT_SPIN_DURATION_MS};
use crate::wheel::PrizeEntry;

/// Open property mapping as it appears on the wire and in patches.
pub type PropertyBag = Map<String, Value>;

// =============================================================================
// COMPONENT KIND
// =============================================================================

/// The type identifier of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComponentKind {
    Text,
    Image,
    Button,
    Divider,
    Carousel,
    Countdown,
    NoticeBar,
    LuckyWheel,
    Video,
    Qrcode,
}

impl ComponentKind {
    /// Every built-in kind, in catalog display order.
    pub const ALL: [Self; 10] = [
        Self::Text,
        Self::Image,
        Self::Button,
        Self::Divider,
        Self::Carousel,
        Self::Countdown,
        Self::NoticeBar,
        Self::LuckyWheel,
        Self::Video,
        Self::Qrcode,
    ];

    /// The wire identifier (`"text"`, `"luckyWheel"`, ...).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Button => "button",
            Self::Divider => "divider",
            Self::Carousel => "carousel",
            Self::Countdown => "countdown",
            Self::NoticeBar => "noticeBar",
            Self::LuckyWheel => "luckyWheel",
            Self::Video => "video",
            Self::Qrcode => "qrcode",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A type identifier that names no built-in component.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown component type: {0}")]
pub struct UnknownKind(pub String);

impl FromStr for ComponentKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_owned()))
    }
}

// =============================================================================
// PROPERTY RECORDS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// Plain text block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextProps {
    pub content: String,
    pub font_size: f64,
    pub color: String,
    pub align: TextAlign,
    pub line_height: f64,
    #[serde(flatten)]
    pub extra: PropertyBag,
}

impl Default for TextProps {
    fn default() -> Self {
        Self {
            content: "Double-click to edit text".into(),
            font_size: 16.0,
            color: "#333333".into(),
            align: TextAlign::Left,
            line_height: 1.5,
            extra: PropertyBag::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageProps {
    pub src: String,
    pub alt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(flatten)]
    pub extra: PropertyBag,
}

impl Default for ImageProps {
    fn default() -> Self {
        Self { src: "/assets/placeholder.png".into(), alt: String::new(), link: None, extra: PropertyBag::new() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ButtonProps {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub bg_color: String,
    pub color: String,
    pub radius: f64,
    #[serde(flatten)]
    pub extra: PropertyBag,
}

impl Default for ButtonProps {
    fn default() -> Self {
        Self {
            label: "Button".into(),
            link: None,
            bg_color: "#1890FF".into(),
            color: "#FFFFFF".into(),
            radius: 4.0,
            extra: PropertyBag::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DividerProps {
    pub color: String,
    pub thickness: f64,
    pub style: LineStyle,
    #[serde(flatten)]
    pub extra: PropertyBag,
}

impl Default for DividerProps {
    fn default() -> Self {
        Self { color: "#E8E8E8".into(), thickness: 1.0, style: LineStyle::Solid, extra: PropertyBag::new() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CarouselProps {
    pub images: Vec<String>,
    pub autoplay: bool,
    pub interval_ms: u64,
    #[serde(flatten)]
    pub extra: PropertyBag,
}

impl Default for CarouselProps {
    fn default() -> Self {
        Self {
            images: vec!["/assets/slide-1.png".into(), "/assets/slide-2.png".into()],
            autoplay: true,
            interval_ms: 3000,
            extra: PropertyBag::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CountdownProps {
    /// RFC 3339 timestamp the countdown runs to.
    pub end_time: String,
    pub format: String,
    pub color: String,
    #[serde(flatten)]
    pub extra: PropertyBag,
}

impl Default for CountdownProps {
    fn default() -> Self {
        Self {
            end_time: "2030-01-01T00:00:00Z".into(),
            format: "DD:HH:mm:ss".into(),
            color: "#F5222D".into(),
            extra: PropertyBag::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NoticeBarProps {
    pub content: String,
    /// Scroll speed in pixels per second.
    pub speed: f64,
    pub color: String,
    pub bg_color: String,
    #[serde(flatten)]
    pub extra: PropertyBag,
}

impl Default for NoticeBarProps {
    fn default() -> Self {
        Self {
            content: "Announcement".into(),
            speed: 50.0,
            color: "#ED6A0C".into(),
            bg_color: "#FFFBE8".into(),
            extra: PropertyBag::new(),
        }
    }
}

/// Lucky-wheel widget: the prize table plus spin presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LuckyWheelProps {
    pub prizes: Vec<PrizeEntry>,
    pub extra_turns: u32,
    pub duration_ms: u64,
    pub button_text: String,
    #[serde(flatten)]
    pub extra: PropertyBag,
}

impl Default for LuckyWheelProps {
    fn default() -> Self {
        let prize = |id: &str, name: &str, probability: f64, color: &str| PrizeEntry {
            id: id.into(),
            name: name.into(),
            probability,
            color: Some(color.into()),
            image: None,
        };
        Self {
            prizes: vec![
                prize("p1", "10% coupon", 0.1, "#FFD666"),
                prize("p2", "Thanks for playing", 0.4, "#FFF1B8"),
                prize("p3", "50% coupon", 0.05, "#FFD666"),
                prize("p4", "Try again", 0.4, "#FFF1B8"),
                prize("p5", "Free shipping", 0.03, "#FFD666"),
                prize("p6", "Grand prize", 0.02, "#FFF1B8"),
            ],
            extra_turns: DEFAULT_EXTRA_TURNS,
            duration_ms: DEFAULT_SPIN_DURATION_MS,
            button_text: "GO".into(),
            extra: PropertyBag::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoProps {
    pub src: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    pub autoplay: bool,
    #[serde(rename = "loop")]
    pub looped: bool,
    #[serde(flatten)]
    pub extra: PropertyBag,
}

impl Default for VideoProps {
    fn default() -> Self {
        Self { src: String::new(), poster: None, autoplay: false, looped: false, extra: PropertyBag::new() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QrcodeProps {
    pub text: String,
    pub color: String,
    pub size: f64,
    #[serde(flatten)]
    pub extra: PropertyBag,
}

impl Default for QrcodeProps {
    fn default() -> Self {
        Self { text: "https://example.com".into(), color: "#000000".into(), size: 120.0, extra: PropertyBag::new() }
    }
}

// =============================================================================
// UNION
// =============================================================================

/// Properties of one component instance, tagged by its type.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentProps {
    Text(TextProps),
    Image(ImageProps),
    Button(ButtonProps),
    Divider(DividerProps),
    Carousel(CarouselProps),
    Countdown(CountdownProps),
    NoticeBar(NoticeBarProps),
    LuckyWheel(LuckyWheelProps),
    Video(VideoProps),
    Qrcode(QrcodeProps),
}

impl ComponentProps {
    /// Type-default properties for `kind`.
    #[must_use]
    pub fn defaults(kind: ComponentKind) -> Self {
        match kind {
            ComponentKind::Text => Self::Text(TextProps::default()),
            ComponentKind::Image => Self::Image(ImageProps::default()),
            ComponentKind::Button => Self::Button(ButtonProps::default()),
            ComponentKind::Divider => Self::Divider(DividerProps::default()),
            ComponentKind::Carousel => Self::Carousel(CarouselProps::default()),
            ComponentKind::Countdown => Self::Countdown(CountdownProps::default()),
            ComponentKind::NoticeBar => Self::NoticeBar(NoticeBarProps::default()),
            ComponentKind::LuckyWheel => Self::LuckyWheel(LuckyWheelProps::default()),
            ComponentKind::Video => Self::Video(VideoProps::default()),
            ComponentKind::Qrcode => Self::Qrcode(QrcodeProps::default()),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ComponentKind {
        match self {
            Self::Text(_) => ComponentKind::Text,
            Self::Image(_) => ComponentKind::Image,
            Self::Button(_) => ComponentKind::Button,
            Self::Divider(_) => ComponentKind::Divider,
            Self::Carousel(_) => ComponentKind::Carousel,
            Self::Countdown(_) => ComponentKind::Countdown,
            Self::NoticeBar(_) => ComponentKind::NoticeBar,
            Self::LuckyWheel(_) => ComponentKind::LuckyWheel,
            Self::Video(_) => ComponentKind::Video,
            Self::Qrcode(_) => ComponentKind::Qrcode,
        }
    }

    /// Parse an open property bag into the record for `kind`.
    ///
    /// Missing keys take the record's defaults; unknown keys go to `extra`.
    ///
    /// # Errors
    ///
    /// Returns the serde error when a value's JSON type contradicts a typed field.
    pub fn from_bag(kind: ComponentKind, bag: PropertyBag) -> Result<Self, serde_json::Error> {
        let value = Value::Object(bag);
        Ok(match kind {
            ComponentKind::Text => Self::Text(serde_json::from_value(value)?),
            ComponentKind::Image => Self::Image(serde_json::from_value(value)?),
            ComponentKind::Button => Self::Button(serde_json::from_value(value)?),
            ComponentKind::Divider => Self::Divider(serde_json::from_value(value)?),
            ComponentKind::Carousel => Self::Carousel(serde_json::from_value(value)?),
            ComponentKind::Countdown => Self::Countdown(serde_json::from_value(value)?),
            ComponentKind::NoticeBar => Self::NoticeBar(serde_json::from_value(value)?),
            ComponentKind::LuckyWheel => Self::LuckyWheel(serde_json::from_value(value)?),
            ComponentKind::Video => Self::Video(serde_json::from_value(value)?),
            ComponentKind::Qrcode => Self::Qrcode(serde_json::from_value(value)?),
        })
    }

    /// Flatten the record back into an open property bag.
    ///
    /// # Errors
    ///
    /// Returns the serde error if the record cannot be represented as a JSON object.
    pub fn to_bag(&self) -> Result<PropertyBag, serde_json::Error> {
        let value = match self {
            Self::Text(p) => serde_json::to_value(p)?,
            Self::Image(p) => serde_json::to_value(p)?,
            Self::Button(p) => serde_json::to_value(p)?,
            Self::Divider(p) => serde_json::to_value(p)?,
            Self::Carousel(p) => serde_json::to_value(p)?,
            Self::Countdown(p) => serde_json::to_value(p)?,
            Self::NoticeBar(p) => serde_json::to_value(p)?,
            Self::LuckyWheel(p) => serde_json::to_value(p)?,
            Self::Video(p) => serde_json::to_value(p)?,
            Self::Qrcode(p) => serde_json::to_value(p)?,
        };
        serde_json::from_value(value)
    }

    /// The wheel record, if this is a lucky-wheel component.
    #[must_use]
    pub fn as_lucky_wheel(&self) -> Option<&LuckyWheelProps> {
        match self {
            Self::LuckyWheel(p) => Some(p),
            _ => None,
        }
    }
}
