//! Validation for authored level data.

use std::collections::HashSet;

use super::data::*;

/// A validation error with context about what failed.
#[derive(Debug)]
pub struct ValidationError {
    pub level_id: String,
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Level '{}' field '{}': {}",
            self.level_id, self.field, self.message
        )
    }
}

/// Helper macro for recording a failed check
macro_rules! check {
    ($errors:expr, $cond:expr, $level:expr, $field:expr, $($msg:tt)+) => {
        if !$cond {
            $errors.push(ValidationError {
                level_id: $level.id.clone(),
                field: $field,
                message: format!($($msg)+),
            });
        }
    };
}

/// Validate every level. Returns a list of validation errors, empty if all levels are sane.
pub fn validate_levels(levels: &[LevelDef]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for level in levels {
        check!(
            errors,
            seen.insert(level.id.clone()),
            level,
            "id",
            "duplicate level id"
        );
        check!(
            errors,
            level.length > 0.0,
            level,
            "length",
            "must be positive, got {}",
            level.length
        );
        check!(
            errors,
            level.boss.hp > 0,
            level,
            "boss.hp",
            "must be positive, got {}",
            level.boss.hp
        );
        check!(
            errors,
            (1..=3).contains(&level.boss.phases),
            level,
            "boss.phases",
            "must be within 1..=3, got {}",
            level.boss.phases
        );

        for corridor in &level.corridors {
            check!(
                errors,
                corridor.end_x > corridor.start_x,
                level,
                "corridors",
                "end_x {} must be greater than start_x {}",
                corridor.end_x,
                corridor.start_x
            );
            check!(
                errors,
                corridor.end_x <= level.length,
                level,
                "corridors",
                "corridor ending at {} runs into the arena at {}",
                corridor.end_x,
                level.length
            );
            check!(
                errors,
                corridor.min_gap <= corridor.gap,
                level,
                "corridors",
                "min_gap {} exceeds gap {}",
                corridor.min_gap,
                corridor.gap
            );
            check!(
                errors,
                corridor.wavelength > 0.0,
                level,
                "corridors",
                "wavelength must be positive"
            );
        }

        for obstacle in &level.obstacles {
            if let Some(motion) = &obstacle.motion {
                check!(
                    errors,
                    motion.speed > 0.0 && motion.range > 0.0,
                    level,
                    "obstacles.motion",
                    "moving obstacle at x={} needs positive speed and range",
                    obstacle.x
                );
            }
        }
    }

    errors
}
