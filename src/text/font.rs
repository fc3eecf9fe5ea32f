//! Resolution of the card's named fonts through fontconfig.

use crate::error::{Error, Result};

use fontconfig::{Fontconfig, Pattern};
use fontconfig_sys::fontconfig as sys;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::ffi::CString;
use std::fmt;
use std::path::{Path, PathBuf};

/// The five text roles a card layout distinguishes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FontSlot {
    Title,
    Serif,
    Body,
    SmallCaps,
    Numeric,
}

impl FontSlot {
    pub const ALL: [FontSlot; 5] = [
        FontSlot::Title,
        FontSlot::Serif,
        FontSlot::Body,
        FontSlot::SmallCaps,
        FontSlot::Numeric,
    ];

    /// Key under the configuration's `[font]` table.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Serif => "serif",
            Self::Body => "body",
            Self::SmallCaps => "small-caps",
            Self::Numeric => "numeric",
        }
    }

    fn default_family(&self) -> &'static str {
        match self {
            Self::Title => "Yu-Gi-Oh! Matrix Small Caps 2",
            Self::Serif => "Yu-Gi-Oh! ITC Stone Serifa Negrito Versalete",
            Self::Body => "Yu-Gi-Oh! Matrix Book",
            Self::SmallCaps => "Yu-Gi-Oh! Matrix Regular Small Caps",
            Self::Numeric => "Eurostile Candy W01 Semibold",
        }
    }
}

/// A font override: either a file to register or a system family to match.
#[derive(Debug, Clone, PartialEq)]
pub enum FontPath {
    Path(PathBuf),
    Desc { name: String, style: Option<String> },
}

/// Maps each slot to a fontconfig-resolved family name, registering any
/// configured font files with the process-wide fontconfig state first.
pub struct FontMap {
    families: HashMap<FontSlot, String>,
}

impl FontMap {
    pub fn new(overrides: &HashMap<String, FontPath>) -> Result<Self> {
        let fc = Fontconfig::new().ok_or_else(|| Error::font_load("fontconfig"))?;
        let mut families = HashMap::new();
        for slot in FontSlot::ALL {
            let family = match overrides.get(slot.key()) {
                Some(FontPath::Path(path)) => register_file(&fc, slot, path)?,
                Some(FontPath::Desc { name, style }) => {
                    match_family(&fc, name, style.as_deref())?
                }
                None => match_family(&fc, slot.default_family(), None)?,
            };
            families.insert(slot, family);
        }
        Ok(Self { families })
    }

    pub fn family(&self, slot: FontSlot) -> &str {
        &self.families[&slot]
    }

    pub fn get_desc(
        &self,
        slot: FontSlot,
        size: f64,
        bold: bool,
        italic: bool,
    ) -> pango::FontDescription {
        let mut desc = pango::FontDescription::new();
        desc.set_family(self.family(slot));
        desc.set_weight(if bold { pango::Weight::Bold } else { pango::Weight::Normal });
        desc.set_style(if italic { pango::Style::Italic } else { pango::Style::Normal });
        desc.set_absolute_size(size * pango::SCALE as f64);
        desc
    }
}

fn match_family(fc: &Fontconfig, family: &str, style: Option<&str>) -> Result<String> {
    let c_family = CString::new(family).map_err(|_| Error::invalid_c_string(family))?;
    let mut pat = Pattern::new(fc);
    pat.add_string(sys::constants::FC_FAMILY.as_cstr(), &c_family);
    if let Some(style) = style {
        let c_style = CString::new(style).map_err(|_| Error::invalid_c_string(style))?;
        pat.add_string(sys::constants::FC_STYLE.as_cstr(), &c_style);
    }
    Ok(pat.font_match().name().unwrap_or(family).to_string())
}

fn register_file(fc: &Fontconfig, slot: FontSlot, path: &Path) -> Result<String> {
    let c_fp = CString::new(path.to_string_lossy().to_string())
        .map_err(|_| Error::invalid_c_string(path.to_string_lossy()))?;
    let family = scan_family(fc, &c_fp).ok_or_else(|| Error::font_load(slot.key()))?;
    let status = unsafe {
        sys::FcConfigAppFontAddFile(
            std::ptr::null_mut(),
            c_fp.as_ptr() as *const sys::FcChar8,
        )
    };
    if status == 0 {
        Err(Error::font_load(slot.key()))
    } else {
        Ok(family)
    }
}

/// Reads the family name out of a font file without registering it.
fn scan_family(fc: &Fontconfig, c_fp: &CString) -> Option<String> {
    unsafe {
        let set = sys::FcFontSetCreate();
        let status = sys::FcFileScan(
            set,
            std::ptr::null_mut(),
            std::ptr::null_mut(),
            std::ptr::null_mut(),
            c_fp.as_ptr() as *const sys::FcChar8,
            1,
        );
        let result = if status == 0 || (*set).nfont < 1 {
            None
        } else {
            let pat = Pattern::from_pattern(fc, *(*set).fonts);
            pat.name().map(|name| name.to_string())
        };
        sys::FcFontSetDestroy(set);
        result
    }
}

struct FontPathVisitor;

impl<'de> Visitor<'de> for FontPathVisitor {
    type Value = FontPath;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map with either `path` or `name` set")
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: de::MapAccess<'de>,
    {
        let mut name: Option<String> = None;
        let mut style: Option<String> = None;
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "path" => {
                    let path = map.next_value::<PathBuf>()?;
                    return Ok(FontPath::Path(path));
                }
                "name" => {
                    name = Some(map.next_value::<String>()?);
                }
                "style" => {
                    style = Some(map.next_value::<String>()?);
                }
                _ => {
                    return Err(de::Error::unknown_field(
                        key.as_str(),
                        &["path", "name", "style"],
                    ))
                }
            }
        }
        if let Some(name) = name {
            Ok(FontPath::Desc { name, style })
        } else {
            Err(de::Error::missing_field("name"))
        }
    }
}

impl<'de> Deserialize<'de> for FontPath {
    fn deserialize<D>(deserializer: D) -> std::result::Result<FontPath, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(FontPathVisitor)
    }
}
