//! PWAD serialization
//!
//! ## Layout
//! ```text
//! header     "PWAD" | lump count (i32) | directory offset (i32)
//! lump data  marker, THINGS, LINEDEFS, SIDEDEFS, VERTEXES, SECTORS per map
//! directory  offset (i32) | size (i32) | name (8 bytes) per lump
//! ```
//! All integers are little-endian. Node lumps are not written; source
//! ports build them on load.
//!
//! ## References
//! - Doom wiki, WAD: <https://doomwiki.org/wiki/WAD>
//! - Doom wiki, Linedef: <https://doomwiki.org/wiki/Linedef>

use super::{Linedef, MapData, Sector, Sidedef, Thing, Vertex};
use crate::config::MapNaming;
use crate::error::GenerateError;
use anyhow::{Context, Result};
use log::info;
use std::path::Path;

/// Directory entry size
const DIR_ENTRY_SIZE: usize = 16;
/// Header size
const HEADER_SIZE: usize = 12;

/// Record sizes of the map lumps
pub const THING_SIZE: usize = 10;
pub const LINEDEF_SIZE: usize = 14;
pub const SIDEDEF_SIZE: usize = 30;
pub const VERTEX_SIZE: usize = 4;
pub const SECTOR_SIZE: usize = 26;

/// Linedef "no sidedef" marker
const NO_SIDEDEF: u16 = 0xFFFF;

/// One level ready to serialize
#[derive(Debug, Clone)]
pub struct MapLump {
    /// Marker lump name (MAP01, E1M1, ...)
    pub name: String,
    pub data: MapData,
}

/// Marker names for `count` levels
pub fn level_names(naming: MapNaming, count: usize) -> Result<Vec<String>, GenerateError> {
    let max = match naming {
        MapNaming::Doom2 => 32,
        MapNaming::Doom1 => 36,
    };
    if count > max {
        return Err(GenerateError::TooManyLevels { count, max });
    }
    Ok((0..count)
        .map(|i| match naming {
            MapNaming::Doom2 => format!("MAP{:02}", i + 1),
            MapNaming::Doom1 => format!("E{}M{}", i / 9 + 1, i % 9 + 1),
        })
        .collect())
}

/// Serialize all levels into one PWAD image
pub fn encode_wad(maps: &[MapLump]) -> Result<Vec<u8>, GenerateError> {
    let mut lumps: Vec<(String, Vec<u8>)> = Vec::with_capacity(maps.len() * 6);
    for map in maps {
        lumps.push((map.name.clone(), Vec::new()));
        lumps.push(("THINGS".to_string(), encode_things(&map.data.things)?));
        lumps.push(("LINEDEFS".to_string(), encode_linedefs(&map.data.linedefs)?));
        lumps.push(("SIDEDEFS".to_string(), encode_sidedefs(&map.data.sidedefs)?));
        lumps.push(("VERTEXES".to_string(), encode_vertices(&map.data.vertices)?));
        lumps.push(("SECTORS".to_string(), encode_sectors(&map.data.sectors)?));
    }

    let data_len: usize = lumps.iter().map(|(_, d)| d.len()).sum();
    let dir_offset = HEADER_SIZE + data_len;
    let mut out = Vec::with_capacity(dir_offset + lumps.len() * DIR_ENTRY_SIZE);

    out.extend_from_slice(b"PWAD");
    out.extend_from_slice(&to_i32("lump count", lumps.len())?.to_le_bytes());
    out.extend_from_slice(&to_i32("directory offset", dir_offset)?.to_le_bytes());

    let mut directory = Vec::with_capacity(lumps.len() * DIR_ENTRY_SIZE);
    for (name, data) in &lumps {
        directory.extend_from_slice(&to_i32("lump offset", out.len())?.to_le_bytes());
        directory.extend_from_slice(&to_i32("lump size", data.len())?.to_le_bytes());
        directory.extend_from_slice(&name8(name));
        out.extend_from_slice(data);
    }
    out.extend_from_slice(&directory);

    Ok(out)
}

/// Encode and write the PWAD to `path`
///
/// Nothing is written if any level fails to encode.
pub fn write_wad(path: &Path, maps: &[MapLump]) -> Result<()> {
    let bytes = encode_wad(maps)?;
    std::fs::write(path, &bytes)
        .with_context(|| format!("Failed to write WAD: {}", path.display()))?;
    info!(
        "Wrote {} ({} maps, {} bytes)",
        path.display(),
        maps.len(),
        bytes.len()
    );
    Ok(())
}

fn encode_things(things: &[Thing]) -> Result<Vec<u8>, GenerateError> {
    let mut out = Vec::with_capacity(things.len() * THING_SIZE);
    for t in things {
        put_i16(&mut out, "thing x", t.x)?;
        put_i16(&mut out, "thing y", t.y)?;
        put_i16(&mut out, "thing angle", t.angle)?;
        put_i16(&mut out, "thing type", t.thing_type)?;
        out.extend_from_slice(&t.flags.to_le_bytes());
    }
    Ok(out)
}

fn encode_linedefs(lines: &[Linedef]) -> Result<Vec<u8>, GenerateError> {
    let mut out = Vec::with_capacity(lines.len() * LINEDEF_SIZE);
    for l in lines {
        put_index(&mut out, "vertex index", l.v1)?;
        put_index(&mut out, "vertex index", l.v2)?;
        out.extend_from_slice(&l.flags.bits().to_le_bytes());
        out.extend_from_slice(&l.special.to_le_bytes());
        out.extend_from_slice(&l.tag.to_le_bytes());
        put_index(&mut out, "sidedef index", l.front)?;
        match l.back {
            Some(b) => put_index(&mut out, "sidedef index", b)?,
            None => out.extend_from_slice(&NO_SIDEDEF.to_le_bytes()),
        }
    }
    Ok(out)
}

fn encode_sidedefs(sides: &[Sidedef]) -> Result<Vec<u8>, GenerateError> {
    let mut out = Vec::with_capacity(sides.len() * SIDEDEF_SIZE);
    for s in sides {
        put_i16(&mut out, "sidedef x offset", s.x_offset)?;
        put_i16(&mut out, "sidedef y offset", s.y_offset)?;
        out.extend_from_slice(&name8(&s.upper));
        out.extend_from_slice(&name8(&s.lower));
        out.extend_from_slice(&name8(&s.middle));
        put_index(&mut out, "sector index", s.sector)?;
    }
    Ok(out)
}

fn encode_vertices(vertices: &[Vertex]) -> Result<Vec<u8>, GenerateError> {
    let mut out = Vec::with_capacity(vertices.len() * VERTEX_SIZE);
    for v in vertices {
        put_i16(&mut out, "vertex x", v.x)?;
        put_i16(&mut out, "vertex y", v.y)?;
    }
    Ok(out)
}

fn encode_sectors(sectors: &[Sector]) -> Result<Vec<u8>, GenerateError> {
    let mut out = Vec::with_capacity(sectors.len() * SECTOR_SIZE);
    for s in sectors {
        put_i16(&mut out, "floor height", s.floor_height)?;
        put_i16(&mut out, "ceiling height", s.ceiling_height)?;
        out.extend_from_slice(&name8(&s.floor_flat));
        out.extend_from_slice(&name8(&s.ceiling_flat));
        put_i16(&mut out, "light level", s.light_level)?;
        out.extend_from_slice(&s.special.to_le_bytes());
        out.extend_from_slice(&s.tag.to_le_bytes());
    }
    Ok(out)
}

fn put_i16(out: &mut Vec<u8>, what: &'static str, v: i32) -> Result<(), GenerateError> {
    let v = i16::try_from(v).map_err(|_| GenerateError::FieldOverflow {
        what,
        value: i64::from(v),
    })?;
    out.extend_from_slice(&v.to_le_bytes());
    Ok(())
}

/// Record reference; 0xFFFF is reserved for "none"
fn put_index(out: &mut Vec<u8>, what: &'static str, v: usize) -> Result<(), GenerateError> {
    let v = u16::try_from(v)
        .ok()
        .filter(|&i| i != NO_SIDEDEF)
        .ok_or(GenerateError::FieldOverflow {
            what,
            value: v as i64,
        })?;
    out.extend_from_slice(&v.to_le_bytes());
    Ok(())
}

fn to_i32(what: &'static str, v: usize) -> Result<i32, GenerateError> {
    i32::try_from(v).map_err(|_| GenerateError::FieldOverflow {
        what,
        value: v as i64,
    })
}

/// Uppercased, NUL-padded 8-byte lump/texture name
fn name8(name: &str) -> [u8; 8] {
    let mut out = [0u8; 8];
    for (dst, src) in out.iter_mut().zip(name.bytes()) {
        *dst = src.to_ascii_uppercase();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{assemble, LinedefFlags, WallLayout};
    use crate::config::Config;
    use crate::layout::PhraseSegment;

    fn le_i32(b: &[u8], at: usize) -> i32 {
        i32::from_le_bytes([b[at], b[at + 1], b[at + 2], b[at + 3]])
    }

    fn le_u16(b: &[u8], at: usize) -> u16 {
        u16::from_le_bytes([b[at], b[at + 1]])
    }

    /// (name, offset, size) for each directory entry
    fn directory(b: &[u8]) -> Vec<(String, usize, usize)> {
        let count = le_i32(b, 4) as usize;
        let start = le_i32(b, 8) as usize;
        (0..count)
            .map(|i| {
                let e = start + i * DIR_ENTRY_SIZE;
                let name = String::from_utf8_lossy(&b[e + 8..e + 16])
                    .trim_end_matches('\0')
                    .to_string();
                (name, le_i32(b, e) as usize, le_i32(b, e + 4) as usize)
            })
            .collect()
    }

    fn level() -> MapData {
        let mut map = MapData::new();
        let line = vec![
            PhraseSegment { offset: 4, width: 3 },
            PhraseSegment { offset: 40, width: 2 },
        ];
        assemble(&mut map, &[line], &WallLayout::from_config(&Config::default(), 16));
        map
    }

    #[test]
    fn test_level_names() {
        assert_eq!(
            level_names(MapNaming::Doom2, 3).unwrap(),
            vec!["MAP01", "MAP02", "MAP03"]
        );
        let e = level_names(MapNaming::Doom1, 11).unwrap();
        assert_eq!(e[0], "E1M1");
        assert_eq!(e[8], "E1M9");
        assert_eq!(e[9], "E2M1");
        assert_eq!(
            level_names(MapNaming::Doom2, 33),
            Err(GenerateError::TooManyLevels { count: 33, max: 32 })
        );
    }

    #[test]
    fn test_name8() {
        assert_eq!(&name8("cyl1_1"), b"CYL1_1\0\0");
        assert_eq!(&name8("-"), b"-\0\0\0\0\0\0\0");
        assert_eq!(&name8("ABCDEFGHIJ"), b"ABCDEFGH");
    }

    #[test]
    fn test_directory_layout() {
        let data = level();
        let bytes = encode_wad(&[MapLump {
            name: "MAP01".to_string(),
            data: data.clone(),
        }])
        .unwrap();

        assert_eq!(&bytes[0..4], b"PWAD");
        let dir = directory(&bytes);
        let names: Vec<&str> = dir.iter().map(|(n, _, _)| n.as_str()).collect();
        assert_eq!(
            names,
            vec!["MAP01", "THINGS", "LINEDEFS", "SIDEDEFS", "VERTEXES", "SECTORS"]
        );

        assert_eq!(dir[0].2, 0);
        assert_eq!(dir[1].2, data.things.len() * THING_SIZE);
        assert_eq!(dir[2].2, data.linedefs.len() * LINEDEF_SIZE);
        assert_eq!(dir[3].2, data.sidedefs.len() * SIDEDEF_SIZE);
        assert_eq!(dir[4].2, data.vertices.len() * VERTEX_SIZE);
        assert_eq!(dir[5].2, data.sectors.len() * SECTOR_SIZE);

        // Lumps are contiguous after the header and end at the directory
        let mut offset = HEADER_SIZE;
        for (_, at, size) in &dir {
            assert_eq!(*at, offset);
            offset += size;
        }
        assert_eq!(offset, le_i32(&bytes, 8) as usize);
        assert_eq!(bytes.len(), offset + dir.len() * DIR_ENTRY_SIZE);
    }

    #[test]
    fn test_text_linedef_encoding() {
        let data = level();
        let bytes = encode_wad(&[MapLump {
            name: "MAP01".to_string(),
            data: data.clone(),
        }])
        .unwrap();
        let dir = directory(&bytes);
        let (_, at, _) = dir[2];

        let idx = data
            .linedefs
            .iter()
            .position(|l| l.back.is_some())
            .unwrap();
        let rec = at + idx * LINEDEF_SIZE;
        let flags = LinedefFlags::IMPASSIBLE | LinedefFlags::TWO_SIDED | LinedefFlags::LOWER_UNPEGGED;
        assert_eq!(le_u16(&bytes, rec + 4), flags.bits());
        assert_ne!(le_u16(&bytes, rec + 12), NO_SIDEDEF);

        // A one-sided boundary line has no back sidedef
        assert_eq!(le_u16(&bytes, at + 12), NO_SIDEDEF);

        // The first text sidedef carries the atlas offset
        let front = data.linedefs[idx].front;
        let (_, sides, _) = dir[3];
        assert_eq!(le_u16(&bytes, sides + front * SIDEDEF_SIZE), 4);
    }

    #[test]
    fn test_coordinate_overflow() {
        let mut map = MapData::new();
        map.add_vertex(40_000, 0);
        let err = encode_wad(&[MapLump {
            name: "MAP01".to_string(),
            data: map,
        }])
        .unwrap_err();
        assert_eq!(
            err,
            GenerateError::FieldOverflow {
                what: "vertex x",
                value: 40_000
            }
        );
    }

    #[test]
    fn test_multiple_maps() {
        let maps: Vec<MapLump> = level_names(MapNaming::Doom1, 2)
            .unwrap()
            .into_iter()
            .map(|name| MapLump { name, data: level() })
            .collect();
        let bytes = encode_wad(&maps).unwrap();
        let dir = directory(&bytes);
        assert_eq!(dir.len(), 12);
        assert_eq!(dir[0].0, "E1M1");
        assert_eq!(dir[6].0, "E1M2");
    }
}
