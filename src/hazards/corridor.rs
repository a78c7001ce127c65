//! Hazards domain: the procedural rocket corridor.
//!
//! Everything here is a pure function of world x and the frame counter, so the renderer and
//! the collision pass always agree on where the walls, spikes and coins are.

use bevy::prelude::*;
use std::collections::HashSet;

use crate::content::CorridorDef;
use crate::physics::Aabb;

/// Width of one hash segment in world px.
pub const SEGMENT_WIDTH: f32 = 40.0;
/// Gap sway per frame, in radians.
const GAP_DRIFT: f32 = 0.01;
/// Segments this close to the entrance carry no extra hazards.
const SAFE_ENTRY: f32 = 160.0;
const MOVING_SPIKE_SIZE: f32 = 18.0;
const ROTATING_BLOCK_SIZE: f32 = 22.0;
pub const CORRIDOR_COIN_RADIUS: f32 = 8.0;

/// Multiplicative hash of a segment index, wrapped to 32 bits.
pub fn segment_hash(segment: i64) -> u32 {
    (segment as u32).wrapping_mul(2_654_435_761)
}

pub fn segment_index(world_x: f32) -> i64 {
    (world_x / SEGMENT_WIDTH).floor() as i64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpikeSide {
    Ceiling,
    Floor,
}

/// Which wall a segment's spikes are on. Stable for a given segment.
pub fn spike_side(segment: i64) -> SpikeSide {
    if (segment_hash(segment) >> 16) & 1 == 0 {
        SpikeSide::Ceiling
    } else {
        SpikeSide::Floor
    }
}

/// Result of testing the player against the corridor walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallContact {
    Clear,
    Ceiling { spiked: bool },
    Floor { spiked: bool },
}

#[derive(Debug, Clone)]
pub struct Corridor {
    pub start_x: f32,
    pub end_x: f32,
    pub gap: f32,
    pub min_gap: f32,
    pub amplitude: f32,
    pub wavelength: f32,
    pub moving_spikes: bool,
    pub rotating_blocks: bool,
    pub coins: bool,
    pub collected_coins: HashSet<i64>,
}

impl Corridor {
    pub fn from_def(def: &CorridorDef) -> Self {
        Self {
            start_x: def.start_x,
            end_x: def.end_x,
            gap: def.gap,
            min_gap: def.min_gap,
            amplitude: def.amplitude,
            wavelength: def.wavelength,
            moving_spikes: def.moving_spikes,
            rotating_blocks: def.rotating_blocks,
            coins: def.coins,
            collected_coins: HashSet::new(),
        }
    }

    pub fn contains(&self, world_x: f32) -> bool {
        world_x >= self.start_x && world_x < self.end_x
    }

    fn progress(&self, world_x: f32) -> f32 {
        ((world_x - self.start_x) / (self.end_x - self.start_x)).clamp(0.0, 1.0)
    }

    /// Gap height narrows linearly from `gap` to `min_gap`.
    pub fn gap_size(&self, world_x: f32) -> f32 {
        self.gap + (self.min_gap - self.gap) * self.progress(world_x)
    }

    /// Gap center sways with world x and drifts with time, kept inside the playfield.
    pub fn gap_center(&self, world_x: f32, frame: u64, ground_y: f32) -> f32 {
        let half = self.gap_size(world_x) / 2.0;
        let sway = (world_x / self.wavelength + frame as f32 * GAP_DRIFT).sin();
        let center = ground_y / 2.0 + self.amplitude * sway;
        center.clamp(half, (ground_y - half).max(half))
    }

    pub fn gap_bounds(&self, world_x: f32, frame: u64, ground_y: f32) -> (f32, f32) {
        let center = self.gap_center(world_x, frame, ground_y);
        let half = self.gap_size(world_x) / 2.0;
        (center - half, center + half)
    }

    pub fn wall_contact(&self, player: &Aabb, frame: u64, ground_y: f32) -> WallContact {
        let x = player.center().x;
        let (top, bottom) = self.gap_bounds(x, frame, ground_y);
        let side = spike_side(segment_index(x));
        if player.y < top {
            WallContact::Ceiling {
                spiked: side == SpikeSide::Ceiling,
            }
        } else if player.bottom() > bottom {
            WallContact::Floor {
                spiked: side == SpikeSide::Floor,
            }
        } else {
            WallContact::Clear
        }
    }

    fn segment_center_x(segment: i64) -> f32 {
        segment as f32 * SEGMENT_WIDTH + SEGMENT_WIDTH / 2.0
    }

    fn hazard_segment(&self, segment: i64) -> bool {
        let left = segment as f32 * SEGMENT_WIDTH;
        left >= self.start_x + SAFE_ENTRY && left + SEGMENT_WIDTH <= self.end_x
    }

    /// Spike bobbing up and down inside the gap, on roughly one segment in four.
    pub fn moving_spike(&self, segment: i64, frame: u64, ground_y: f32) -> Option<Aabb> {
        if !self.moving_spikes
            || !self.hazard_segment(segment)
            || (segment_hash(segment) >> 8) % 4 != 0
        {
            return None;
        }
        let x = Self::segment_center_x(segment);
        let center = self.gap_center(x, frame, ground_y);
        let travel = (self.gap_size(x) / 2.0 - MOVING_SPIKE_SIZE).max(0.0);
        let y = center + travel * (frame as f32 * 0.05 + segment as f32).sin();
        Some(Aabb::centered(
            Vec2::new(x, y),
            Vec2::splat(MOVING_SPIKE_SIZE),
        ))
    }

    /// Block circling the gap center, on roughly one segment in five without a moving spike.
    pub fn rotating_block(&self, segment: i64, frame: u64, ground_y: f32) -> Option<Aabb> {
        if !self.rotating_blocks
            || !self.hazard_segment(segment)
            || (segment_hash(segment) >> 4) % 5 != 0
            || self.moving_spike(segment, frame, ground_y).is_some()
        {
            return None;
        }
        let x = Self::segment_center_x(segment);
        let pivot = Vec2::new(x, self.gap_center(x, frame, ground_y));
        let arm = self.gap_size(x) / 3.0;
        let angle = frame as f32 * 0.04 + segment as f32;
        Some(Aabb::centered(
            pivot + Vec2::new(angle.cos(), angle.sin()) * arm,
            Vec2::splat(ROTATING_BLOCK_SIZE),
        ))
    }

    /// Uncollected coin at the gap center, on roughly one segment in three.
    pub fn coin(&self, segment: i64, frame: u64, ground_y: f32) -> Option<Vec2> {
        if !self.coins
            || !self.hazard_segment(segment)
            || (segment_hash(segment) >> 12) % 3 != 0
            || self.collected_coins.contains(&segment)
        {
            return None;
        }
        let x = Self::segment_center_x(segment);
        Some(Vec2::new(x, self.gap_center(x, frame, ground_y)))
    }

    /// Segments overlapped by `bounds`.
    pub fn segments_under(bounds: &Aabb) -> std::ops::RangeInclusive<i64> {
        segment_index(bounds.x)..=segment_index(bounds.right())
    }
}
