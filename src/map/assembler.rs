//! Wall-of-text level assembly
//!
//! ```text
//!  (0,H) ┌────────────────────┐ (W,H)
//!        │ line N             │
//!     ◁──┤ ...                │
//!        │ line 1   room      │
//!        │          (outer)   │
//!  (0,0) └────────────────────┘ (W,0)
//! ```
//!
//! The west wall (x = 0) is built bottom to top by a cursor. Each line of
//! text starts after a `line_pitch` gap and is split into one two-sided
//! linedef per phrase segment. Behind every line a raised inner sector
//! closes the loop through a backing vertex (◁) at x = -`backing_depth`,
//! so the segments' lower textures show the text at floor level.

use super::{LinedefFlags, Linedef, MapData, Sector, Sidedef, Thing};
use crate::config::Config;
use crate::layout::{line_width, Line, PhraseSegment};
use log::debug;

/// Skill bits for a thing present on every difficulty
const ALL_SKILLS: u16 = 0x0007;

/// Resolved dimensions and textures for one level
#[derive(Debug, Clone, PartialEq)]
pub struct WallLayout {
    pub room_width: i32,
    pub line_pitch: i32,
    pub margin: i32,
    pub backing_depth: i32,
    pub floor_height: i32,
    pub ceiling_height: i32,
    /// Height of the text band (inner sector floor above the room floor)
    pub text_height: i32,
    pub light_level: i32,
    pub text_texture: String,
    pub wall_texture: String,
    pub floor_flat: String,
    pub ceiling_flat: String,
    pub spawn: Thing,
}

impl WallLayout {
    /// Combine settings with the atlas height (used when no text height is
    /// configured)
    pub fn from_config(config: &Config, atlas_height: usize) -> Self {
        let g = &config.geometry;
        let t = &config.textures;
        let s = &config.spawn;
        Self {
            room_width: g.room_width,
            line_pitch: g.line_pitch,
            margin: g.margin,
            backing_depth: g.backing_depth,
            floor_height: g.floor_height,
            ceiling_height: g.ceiling_height,
            text_height: g
                .text_height
                .unwrap_or_else(|| i32::try_from(atlas_height).unwrap_or(i32::MAX)),
            light_level: g.light_level,
            text_texture: t.text.clone(),
            wall_texture: t.wall.clone(),
            floor_flat: t.floor.clone(),
            ceiling_flat: t.ceiling.clone(),
            spawn: Thing {
                x: s.x,
                y: s.y,
                angle: s.angle,
                thing_type: s.thing_type,
                flags: ALL_SKILLS,
            },
        }
    }

    /// Wall length needed for `lines`: every line's gap and text plus the
    /// closing margin
    pub fn wall_length(&self, lines: &[Line]) -> i32 {
        let content: i64 = lines
            .iter()
            .map(|l| i64::from(self.line_pitch) + line_width(l) as i64)
            .sum();
        clamp_i32(content + i64::from(self.margin))
    }
}

fn clamp_i32(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Lay out `lines` as one room into `map`
///
/// Appends two sectors (room, text backing), the boundary, one wall segment
/// per phrase segment and the player start. Every sector boundary is a set
/// of closed loops.
pub fn assemble(map: &mut MapData, lines: &[Line], layout: &WallLayout) {
    let height = layout.wall_length(lines);
    let text_floor = layout.floor_height.saturating_add(layout.text_height);
    let ceiling = layout.ceiling_height.max(text_floor);

    let outer = map.add_sector(Sector {
        floor_height: layout.floor_height,
        ceiling_height: ceiling,
        floor_flat: layout.floor_flat.clone(),
        ceiling_flat: layout.ceiling_flat.clone(),
        light_level: layout.light_level,
        special: 0,
        tag: 0,
    });
    let inner = map.add_sector(Sector {
        floor_height: text_floor,
        ceiling_height: ceiling,
        floor_flat: layout.floor_flat.clone(),
        ceiling_flat: layout.ceiling_flat.clone(),
        light_level: layout.light_level,
        special: 0,
        tag: 0,
    });
    let inner_side = map.add_sidedef(Sidedef::plain(inner, Sidedef::NO_TEXTURE));

    let bottom_left = map.add_vertex(0, 0);
    let top_left = map.add_vertex(0, height);
    let top_right = map.add_vertex(layout.room_width, height);
    let bottom_right = map.add_vertex(layout.room_width, 0);

    let mut wall = WallBuilder { map, layout, outer };
    wall.solid(top_left, top_right, outer);
    wall.solid(top_right, bottom_right, outer);
    wall.solid(bottom_right, bottom_left, outer);

    let mut cursor = 0i32;
    let mut prev = bottom_left;
    for line in lines {
        cursor = cursor.saturating_add(layout.line_pitch);
        let start = wall.map.add_vertex(0, cursor);
        wall.solid(prev, start, outer);
        let line_start = cursor;

        prev = start;
        for seg in line {
            cursor = cursor.saturating_add(clamp_i32(seg.width as i64));
            let next = wall.map.add_vertex(0, cursor);
            wall.text_segment(prev, next, seg, inner_side);
            prev = next;
        }

        if prev != start {
            let backing = wall
                .map
                .add_vertex(-layout.backing_depth, line_start + (cursor - line_start) / 2);
            wall.solid(start, backing, inner);
            wall.solid(backing, prev, inner);
        }
    }
    wall.solid(prev, top_left, outer);

    map.add_thing(layout.spawn);

    debug!(
        "Assembled {} lines: {} vertices, {} linedefs, {} sidedefs, wall length {}",
        lines.len(),
        map.vertices.len(),
        map.linedefs.len(),
        map.sidedefs.len(),
        height
    );
}

/// Linedef emitters bound to one map and layout
struct WallBuilder<'a> {
    map: &'a mut MapData,
    layout: &'a WallLayout,
    outer: usize,
}

impl WallBuilder<'_> {
    /// One-sided wall facing `sector` on its right
    fn solid(&mut self, v1: usize, v2: usize, sector: usize) {
        let front = self
            .map
            .add_sidedef(Sidedef::plain(sector, &self.layout.wall_texture));
        self.map.add_linedef(Linedef {
            v1,
            v2,
            flags: LinedefFlags::IMPASSIBLE,
            special: 0,
            tag: 0,
            front,
            back: None,
        });
    }

    /// Two-sided segment showing one atlas strip towards the room
    fn text_segment(&mut self, v1: usize, v2: usize, seg: &PhraseSegment, back: usize) {
        let front = self.map.add_sidedef(Sidedef {
            x_offset: clamp_i32(seg.offset as i64),
            y_offset: 0,
            upper: Sidedef::NO_TEXTURE.to_string(),
            lower: self.layout.text_texture.clone(),
            middle: Sidedef::NO_TEXTURE.to_string(),
            sector: self.outer,
        });
        self.map.add_linedef(Linedef {
            v1,
            v2,
            flags: LinedefFlags::IMPASSIBLE
                | LinedefFlags::TWO_SIDED
                | LinedefFlags::LOWER_UNPEGGED,
            special: 0,
            tag: 0,
            front,
            back: Some(back),
        });
    }
}
