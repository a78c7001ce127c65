//! LevelRegistry resource providing lookups for all loaded levels.

use bevy::prelude::*;
use std::collections::HashMap;

use super::data::*;

/// Central registry for all loaded levels.
/// Keeps file order so "next level" is well defined.
#[derive(Resource, Debug, Default, Clone)]
pub struct LevelRegistry {
    pub order: Vec<String>,
    pub levels: HashMap<String, LevelDef>,
}

impl LevelRegistry {
    /// Later duplicates replace earlier ones but keep the first position.
    pub fn from_levels(levels: Vec<LevelDef>) -> Self {
        let mut registry = Self::default();
        for level in levels {
            if !registry.levels.contains_key(&level.id) {
                registry.order.push(level.id.clone());
            }
            registry.levels.insert(level.id.clone(), level);
        }
        registry
    }

    pub fn get(&self, id: &str) -> Option<&LevelDef> {
        self.levels.get(id)
    }

    pub fn first_id(&self) -> Option<&str> {
        self.order.first().map(String::as_str)
    }

    /// The level after `id`, wrapping to the first.
    pub fn next_id(&self, id: &str) -> Option<&str> {
        let index = self.order.iter().position(|l| l == id)?;
        self.order
            .get((index + 1) % self.order.len())
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns a summary of loaded content counts for logging.
    pub fn summary(&self) -> String {
        let bosses: Vec<&str> = self
            .order
            .iter()
            .filter_map(|id| self.levels.get(id))
            .map(|l| l.boss.name.as_str())
            .collect();
        format!(
            "LevelRegistry loaded {} levels (bosses: {})",
            self.order.len(),
            bosses.join(", ")
        )
    }
}

/// Single short level used when the content files cannot be read.
pub fn builtin_level() -> LevelDef {
    LevelDef {
        id: "builtin".to_string(),
        name: "Fallback Run".to_string(),
        length: 3000.0,
        obstacles: vec![
            ObstacleDef {
                kind: ObstacleKind::Spike,
                x: 700.0,
                y: 370.0,
                w: 30.0,
                h: 30.0,
                motion: None,
            },
            ObstacleDef {
                kind: ObstacleKind::Platform,
                x: 1200.0,
                y: 320.0,
                w: 160.0,
                h: 16.0,
                motion: None,
            },
            ObstacleDef {
                kind: ObstacleKind::Spike,
                x: 1900.0,
                y: 370.0,
                w: 30.0,
                h: 30.0,
                motion: None,
            },
        ],
        enemies: vec![EnemyDef {
            kind: EnemyKind::Stationary,
            x: 1500.0,
            y: 370.0,
            patrol_range: 40.0,
        }],
        powerups: vec![PowerupDef {
            kind: PowerupKind::Shield,
            x: 1000.0,
            y: 340.0,
        }],
        coins: Vec::new(),
        cages: Vec::new(),
        falling_blocks: Vec::new(),
        pendulums: Vec::new(),
        corridors: Vec::new(),
        boss: BossDef {
            kind: BossType::Guardian,
            name: "Guardian".to_string(),
            hp: 20,
            phases: 2,
        },
    }
}
