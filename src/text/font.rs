//! Font loading through fontconfig and measuring through pango.

use crate::error::{Error, Result};
use crate::text::FontMetrics;

use fontconfig::{Fontconfig, Pattern};
use fontconfig_sys::fontconfig as sys;
use pango::prelude::FontMapExt;
use std::ffi::CString;
use std::path::Path;

/// A font face resolved by fontconfig, with a pango context to lay text
/// out with it.
pub struct Font {
    name: String,
    context: pango::Context,
}

impl Font {
    /// Loads a font file and registers it with fontconfig so pango can
    /// find it by name.
    pub fn from_file(fp: impl AsRef<Path>) -> Result<Self> {
        let fc = Fontconfig::new().ok_or(Error::FontconfigInit)?;
        let fp = fp.as_ref();
        let fp_str = fp.to_string_lossy().to_string();
        let c_fp = CString::new(fp_str.clone()).map_err(|_| Error::InvalidCString(fp_str.clone()))?;
        let name = Self::scan_file(&fc, &c_fp).ok_or_else(|| Error::FontLoad(fp_str.clone()))?;

        let status = unsafe {
            sys::FcConfigAppFontAddFile(std::ptr::null_mut(), c_fp.as_ptr() as *const sys::FcChar8)
        };
        if status == 0 {
            return Err(Error::FontLoad(fp_str));
        }
        Ok(Self::new(name))
    }

    /// Resolves an installed font by family and optional style.
    pub fn from_name(family: &str, style: Option<&str>) -> Result<Self> {
        let fc = Fontconfig::new().ok_or(Error::FontconfigInit)?;
        let mut pat = Pattern::new(&fc);
        let c_family =
            CString::new(family).map_err(|_| Error::InvalidCString(family.to_string()))?;
        pat.add_string(sys::constants::FC_FAMILY.as_cstr(), &c_family);
        if let Some(style) = style {
            let c_style =
                CString::new(style).map_err(|_| Error::InvalidCString(style.to_string()))?;
            pat.add_string(sys::constants::FC_STYLE.as_cstr(), &c_style);
        }
        let matched = Pattern::from_pattern(&fc, pat.font_match().pat);
        let name = matched
            .name()
            .map(str::to_string)
            .ok_or_else(|| Error::FontLoad(family.to_string()))?;
        Ok(Self::new(name))
    }

    fn new(name: String) -> Self {
        let context = pangocairo::FontMap::new().create_context();
        if let Ok(mut opt) = cairo::FontOptions::new() {
            opt.set_antialias(cairo::Antialias::Good);
            pangocairo::functions::context_set_font_options(&context, Some(&opt));
        }
        Self { name, context }
    }

    fn scan_file(fc: &Fontconfig, c_fp: &CString) -> Option<String> {
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
                pat.name().map(str::to_string)
            };
            sys::FcFontSetDestroy(set);
            result
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Description of this font at `size` pixels.
    pub fn description(&self, size: u32) -> pango::FontDescription {
        let mut desc = pango::FontDescription::from_string(&self.name);
        desc.set_absolute_size(size as f64 * pango::SCALE as f64);
        desc
    }

    /// A single line layout of `text` at `size` pixels.
    pub fn layout(&self, text: &str, size: u32) -> pango::Layout {
        let layout = pango::Layout::new(&self.context);
        layout.set_font_description(Some(&self.description(size)));
        layout.set_text(text);
        layout
    }
}

impl FontMetrics for Font {
    fn text_width(&self, text: &str, size: u32) -> f64 {
        let (_, logical) = self.layout(text, size).pixel_extents();
        logical.width() as f64
    }
}
