//! Generation pipeline
//!
//! atlas image → LookUp → glyph table → per-line layout → map assembly

use crate::atlas::{columns_from_path, LookUp};
use crate::config::{Config, MapNaming};
use crate::error::GenerateError;
use crate::glyph::GlyphTable;
use crate::layout::{layout_phrase, Line};
use crate::map::wad::level_names;
use crate::map::{assemble, MapData, MapLump, WallLayout};
use crate::words::Level;
use anyhow::{bail, Result};
use log::info;
use std::path::Path;

/// Compiled assets shared by every level
#[derive(Debug, Clone)]
pub struct Assets {
    pub lut: LookUp,
    pub glyphs: GlyphTable,
    /// Pixel height of the atlas
    pub atlas_height: usize,
}

impl Assets {
    /// Index the atlas and compile every glyph in `glyph_dir`
    pub fn load(atlas_path: &Path, glyph_dir: &Path) -> Result<Self> {
        let atlas = columns_from_path(atlas_path)?;
        let atlas_height = atlas.first().map_or(0, Vec::len);
        if atlas.is_empty() || atlas_height == 0 {
            bail!("Atlas image is empty: {}", atlas_path.display());
        }

        let lut = LookUp::build(&atlas);
        info!(
            "Atlas {}: {}x{}, {} distinct columns",
            atlas_path.display(),
            lut.atlas_width(),
            atlas_height,
            lut.distinct_columns()
        );

        let glyphs = GlyphTable::load_dir(glyph_dir, &lut)?;
        Ok(Self {
            lut,
            glyphs,
            atlas_height,
        })
    }
}

/// Lay out and assemble one level
pub fn build_level(
    lines: &[String],
    glyphs: &GlyphTable,
    layout: &WallLayout,
) -> Result<MapData, GenerateError> {
    let laid_out = lines
        .iter()
        .map(|text| layout_phrase(text, glyphs))
        .collect::<Result<Vec<Line>, _>>()?;

    let mut map = MapData::new();
    assemble(&mut map, &laid_out, layout);
    Ok(map)
}

/// Build every level, named by `naming`
///
/// Fails on the first unknown glyph; no partial set is returned.
pub fn build_maps(
    levels: &[Level],
    glyphs: &GlyphTable,
    layout: &WallLayout,
    naming: MapNaming,
) -> Result<Vec<MapLump>, GenerateError> {
    let names = level_names(naming, levels.len())?;
    names
        .into_iter()
        .zip(levels)
        .map(|(name, lines)| {
            let data = build_level(lines, glyphs, layout)?;
            info!(
                "{}: {} lines, {} linedefs, {} vertices",
                name,
                lines.len(),
                data.linedefs.len(),
                data.vertices.len()
            );
            Ok::<_, GenerateError>(MapLump { name, data })
        })
        .collect()
}

/// Resolve the wall layout for `config` and the loaded atlas
pub fn wall_layout(config: &Config, assets: &Assets) -> WallLayout {
    WallLayout::from_config(config, assets.atlas_height)
}
