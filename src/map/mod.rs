//! Doom map primitives
//!
//! Records are appended once during assembly and never modified. Indices
//! into the collections (`usize`) are the references between records, as
//! in the binary lumps.

pub mod assembler;
pub mod wad;

pub use assembler::{assemble, WallLayout};
pub use wad::{write_wad, MapLump};

use bitflags::bitflags;

bitflags! {
    /// Linedef flag bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct LinedefFlags: u16 {
        const IMPASSIBLE     = 0x0001;
        const BLOCK_MONSTERS = 0x0002;
        const TWO_SIDED      = 0x0004;
        const UPPER_UNPEGGED = 0x0008;
        const LOWER_UNPEGGED = 0x0010;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vertex {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sector {
    pub floor_height: i32,
    pub ceiling_height: i32,
    pub floor_flat: String,
    pub ceiling_flat: String,
    pub light_level: i32,
    pub special: u16,
    pub tag: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sidedef {
    /// Texture column shown at the start of the linedef
    pub x_offset: i32,
    pub y_offset: i32,
    pub upper: String,
    pub lower: String,
    pub middle: String,
    pub sector: usize,
}

impl Sidedef {
    /// Texture name for an unused slot
    pub const NO_TEXTURE: &'static str = "-";

    /// Sidedef with only the middle texture set
    pub fn plain(sector: usize, middle: &str) -> Self {
        Self {
            x_offset: 0,
            y_offset: 0,
            upper: Self::NO_TEXTURE.to_string(),
            lower: Self::NO_TEXTURE.to_string(),
            middle: middle.to_string(),
            sector,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Linedef {
    pub v1: usize,
    pub v2: usize,
    pub flags: LinedefFlags,
    pub special: u16,
    pub tag: u16,
    /// Sidedef on the right of v1 -> v2
    pub front: usize,
    pub back: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thing {
    pub x: i32,
    pub y: i32,
    pub angle: i32,
    pub thing_type: i32,
    /// Skill and mode bits (7 = all skills)
    pub flags: u16,
}

/// Append-only collections for one level
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapData {
    pub vertices: Vec<Vertex>,
    pub sectors: Vec<Sector>,
    pub sidedefs: Vec<Sidedef>,
    pub linedefs: Vec<Linedef>,
    pub things: Vec<Thing>,
}

impl MapData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, x: i32, y: i32) -> usize {
        self.vertices.push(Vertex { x, y });
        self.vertices.len() - 1
    }

    pub fn add_sector(&mut self, sector: Sector) -> usize {
        self.sectors.push(sector);
        self.sectors.len() - 1
    }

    pub fn add_sidedef(&mut self, side: Sidedef) -> usize {
        self.sidedefs.push(side);
        self.sidedefs.len() - 1
    }

    pub fn add_linedef(&mut self, line: Linedef) -> usize {
        self.linedefs.push(line);
        self.linedefs.len() - 1
    }

    pub fn add_thing(&mut self, thing: Thing) -> usize {
        self.things.push(thing);
        self.things.len() - 1
    }

    /// Linedefs with a sidedef facing `sector` on either side
    pub fn sector_linedefs(&self, sector: usize) -> impl Iterator<Item = &Linedef> + '_ {
        self.linedefs.iter().filter(move |l| {
            self.sidedefs[l.front].sector == sector
                || l.back.is_some_and(|b| self.sidedefs[b].sector == sector)
        })
    }

    /// Whether every vertex of `sector`'s boundary is shared by exactly two
    /// of its linedefs
    pub fn sector_is_closed(&self, sector: usize) -> bool {
        let mut uses = vec![0u32; self.vertices.len()];
        for l in self.sector_linedefs(sector) {
            uses[l.v1] += 1;
            uses[l.v2] += 1;
        }
        uses.iter().all(|&n| n == 0 || n == 2)
    }
}
