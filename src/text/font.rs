use std::{collections::HashMap, path::PathBuf, sync::Arc};

use anyhow::Context as _;
use usvg::fontdb;

use crate::{
    foundation::error::{CalsheetError, CalsheetResult},
    text::bitmap::BitmapFace,
};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// One candidate in the font fallback chain.
pub enum FontSource {
    /// A font file on disk (TTF/OTF/TTC).
    File {
        /// Path to the font file.
        path: PathBuf,
    },
    /// A family looked up in the platform font database.
    ///
    /// `sans-serif`, `serif` and `monospace` select the generic families.
    System {
        /// Family or generic family name.
        family: String,
    },
}

impl FontSource {
    /// Candidate chain used when the config does not name one.
    pub fn default_chain() -> Vec<FontSource> {
        vec![
            FontSource::File {
                path: PathBuf::from("/System/Library/Fonts/Arial.ttf"),
            },
            FontSource::File {
                path: PathBuf::from(
                    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
                ),
            },
            FontSource::System {
                family: "sans-serif".to_string(),
            },
        ]
    }
}

impl std::fmt::Display for FontSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FontSource::File { path } => write!(f, "file '{}'", path.display()),
            FontSource::System { family } => write!(f, "system family '{family}'"),
        }
    }
}

#[derive(Clone)]
/// Outline font data accepted by the font database.
pub struct OutlineFace {
    /// Raw font file bytes.
    pub bytes: Arc<Vec<u8>>,
    /// Face index inside a collection file.
    pub index: u32,
    /// Primary family name reported by the font.
    pub family: String,
}

impl std::fmt::Debug for OutlineFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutlineFace")
            .field("bytes_len", &self.bytes.len())
            .field("index", &self.index)
            .field("family", &self.family)
            .finish()
    }
}

#[derive(Clone, Debug)]
/// Face selected for a label.
pub enum FontFace {
    /// Vector font loaded from a [`FontSource`].
    Outline(OutlineFace),
    /// Compiled-in bitmap face.
    Builtin(BitmapFace),
}

#[derive(Clone, Debug)]
/// A usable font at a requested pixel size.
pub struct ResolvedFont {
    /// Requested pixel size.
    pub size_px: f32,
    /// Face to measure and draw with.
    pub face: FontFace,
    /// Chain entry that produced the face; `None` for the built-in face.
    pub source: Option<FontSource>,
}

impl ResolvedFont {
    /// The terminal fallback.
    pub fn builtin(size_px: f32) -> Self {
        Self {
            size_px,
            face: FontFace::Builtin(BitmapFace::for_size(size_px)),
            source: None,
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self.face, FontFace::Builtin(_))
    }

    /// Family name for diagnostics.
    pub fn family(&self) -> &str {
        match &self.face {
            FontFace::Outline(o) => &o.family,
            FontFace::Builtin(_) => "builtin 5x7 bitmap",
        }
    }
}

/// Ordered font fallback chain.
///
/// Candidates are tried in order and the first one that loads wins. When none loads (or the
/// chain is empty) the built-in bitmap face is returned, so [`FontResolver::resolve`] never
/// fails. Load results are cached per candidate, so resolving several sizes touches each file
/// once.
pub struct FontResolver {
    chain: Vec<FontSource>,
    loaded: HashMap<usize, Option<OutlineFace>>,
    system_db: Option<fontdb::Database>,
}

impl FontResolver {
    pub fn new(chain: Vec<FontSource>) -> Self {
        Self {
            chain,
            loaded: HashMap::new(),
            system_db: None,
        }
    }

    pub fn chain(&self) -> &[FontSource] {
        &self.chain
    }

    /// Resolve a font for `size_px`.
    pub fn resolve(&mut self, size_px: f32) -> ResolvedFont {
        for idx in 0..self.chain.len() {
            if let Some(face) = self.face_for(idx) {
                return ResolvedFont {
                    size_px,
                    face: FontFace::Outline(face),
                    source: Some(self.chain[idx].clone()),
                };
            }
        }
        tracing::debug!(size_px, "no font candidate loaded; using builtin bitmap face");
        ResolvedFont::builtin(size_px)
    }

    fn face_for(&mut self, idx: usize) -> Option<OutlineFace> {
        if let Some(cached) = self.loaded.get(&idx) {
            return cached.clone();
        }

        let source = self.chain[idx].clone();
        let res = match &source {
            FontSource::File { path } => load_font_file(path),
            FontSource::System { family } => self.load_system(family),
        };
        let face = match res {
            Ok(face) => {
                tracing::debug!(%source, family = %face.family, "font candidate loaded");
                Some(face)
            }
            Err(err) => {
                tracing::debug!(%source, error = %err, "font candidate rejected");
                None
            }
        };
        self.loaded.insert(idx, face.clone());
        face
    }

    fn load_system(&mut self, family: &str) -> CalsheetResult<OutlineFace> {
        let db = self.system_db.get_or_insert_with(|| {
            let mut db = fontdb::Database::new();
            db.load_system_fonts();
            db
        });

        let family = match family {
            "sans-serif" => fontdb::Family::SansSerif,
            "serif" => fontdb::Family::Serif,
            "monospace" => fontdb::Family::Monospace,
            name => fontdb::Family::Name(name),
        };
        let families = [family];
        let query = fontdb::Query {
            families: &families,
            ..fontdb::Query::default()
        };
        let id = db
            .query(&query)
            .ok_or_else(|| CalsheetError::font("no system face matches the family"))?;

        let family_name = db
            .face(id)
            .and_then(|info| info.families.first())
            .map(|(name, _)| name.clone())
            .ok_or_else(|| CalsheetError::font("system face has no family name"))?;
        let (bytes, index) = db
            .with_face_data(id, |data, index| (data.to_vec(), index))
            .ok_or_else(|| CalsheetError::font("system face data is unavailable"))?;

        Ok(OutlineFace {
            bytes: Arc::new(bytes),
            index,
            family: family_name,
        })
    }
}

fn load_font_file(path: &std::path::Path) -> CalsheetResult<OutlineFace> {
    let bytes = std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
    face_from_bytes(bytes)
}

/// Accept `bytes` as a font if the font database finds at least one named face in them.
pub fn face_from_bytes(bytes: Vec<u8>) -> CalsheetResult<OutlineFace> {
    let mut db = fontdb::Database::new();
    db.load_font_data(bytes.clone());

    let (index, family) = db
        .faces()
        .find_map(|info| {
            info.families
                .first()
                .map(|(name, _)| (info.index, name.clone()))
        })
        .ok_or_else(|| CalsheetError::font("no font faces found in data"))?;

    Ok(OutlineFace {
        bytes: Arc::new(bytes),
        index,
        family,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/text/font.rs"]
mod tests;
