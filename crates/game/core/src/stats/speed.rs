//! Speed penalty for carrying laundry by hand.
//!
//! Formulas:
//! - extra = max(0, hand_count - slowdown_threshold)
//! - multiplier = max(min_movement_speed / base_speed, (1 - penalty_per_extra)^extra)
//! - multiplier = 1 while a basket is equipped (the basket bears the load)

use crate::config::GameConfig;

/// Parameters of the hand-load penalty, lifted out of [`GameConfig`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeedPenalty {
    pub slowdown_threshold: u32,
    pub penalty_per_extra: f32,
    pub min_movement_speed: f32,
    pub base_speed: f32,
}

impl SpeedPenalty {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            slowdown_threshold: config.slowdown_threshold,
            penalty_per_extra: config.penalty_per_extra,
            min_movement_speed: config.min_movement_speed,
            base_speed: config.base_speed,
        }
    }

    /// Lowest multiplier the penalty may reach, clamped to `[0, 1]`.
    pub fn min_ratio(&self) -> f32 {
        if self.base_speed <= 0.0 {
            return 0.0;
        }
        (self.min_movement_speed / self.base_speed).clamp(0.0, 1.0)
    }

    pub fn multiplier(&self, hand_count: usize, has_equipped_container: bool) -> f32 {
        if has_equipped_container {
            return 1.0;
        }
        let extra = hand_count.saturating_sub(self.slowdown_threshold as usize);
        if extra == 0 {
            return 1.0;
        }
        let exponent = i32::try_from(extra).unwrap_or(i32::MAX);
        let decayed = (1.0 - self.penalty_per_extra).powi(exponent);
        decayed.max(self.min_ratio())
    }

    pub fn effective_speed(&self, hand_count: usize, has_equipped_container: bool) -> f32 {
        self.base_speed * self.multiplier(hand_count, has_equipped_container)
    }
}

/// Movement multiplier for a carrier holding `hand_count` items.
pub fn movement_multiplier(
    hand_count: usize,
    slowdown_threshold: u32,
    penalty_per_extra: f32,
    min_movement_speed: f32,
    base_speed: f32,
    has_equipped_container: bool,
) -> f32 {
    SpeedPenalty {
        slowdown_threshold,
        penalty_per_extra,
        min_movement_speed,
        base_speed,
    }
    .multiplier(hand_count, has_equipped_container)
}

/// Speed in world units per second for a carrier under the configured rules.
pub fn effective_speed(config: &GameConfig, hand_count: usize, has_equipped_container: bool) -> f32 {
    SpeedPenalty::from_config(config).effective_speed(hand_count, has_equipped_container)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn penalty() -> SpeedPenalty {
        SpeedPenalty {
            slowdown_threshold: 5,
            penalty_per_extra: 0.2,
            min_movement_speed: 1.0,
            base_speed: 5.0,
        }
    }

    #[test]
    fn seven_items_over_threshold_five() {
        let rules = penalty();
        assert!((rules.multiplier(7, false) - 0.64).abs() < EPSILON);
        assert!((rules.effective_speed(7, false) - 3.2).abs() < EPSILON);
    }

    #[test]
    fn no_penalty_at_or_below_threshold() {
        let rules = penalty();
        for count in 0..=5 {
            assert_eq!(rules.multiplier(count, false), 1.0);
        }
    }

    #[test]
    fn strictly_decreasing_until_the_floor() {
        let rules = SpeedPenalty {
            min_movement_speed: 0.0,
            ..penalty()
        };
        let mut previous = rules.multiplier(5, false);
        for count in 6..30 {
            let current = rules.multiplier(count, false);
            assert!(current < previous, "{count} items: {current} >= {previous}");
            previous = current;
        }
    }

    #[test]
    fn never_below_the_floor() {
        let rules = penalty();
        let floor = rules.min_ratio();
        assert!((floor - 0.2).abs() < EPSILON);
        for count in 0..200 {
            assert!(rules.multiplier(count, false) >= floor);
        }
        assert!((rules.multiplier(10_000, false) - floor).abs() < EPSILON);
    }

    #[test]
    fn equipped_basket_removes_penalty() {
        assert_eq!(penalty().multiplier(50, true), 1.0);
        assert_eq!(movement_multiplier(50, 5, 0.2, 1.0, 5.0, true), 1.0);
    }

    #[test]
    fn free_function_matches_config_defaults() {
        let config = GameConfig::default();
        assert!((effective_speed(&config, 7, false) - 3.2).abs() < EPSILON);
        assert_eq!(effective_speed(&config, 0, false), config.base_speed);
    }
}
