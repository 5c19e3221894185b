//! Enemy-related components and the spawner state.

use bevy::prelude::*;

/// Marker component for all enemies.
#[derive(Component)]
pub struct Enemy;

/// Keeps the arena populated.
///
/// Every missing enemy gets a respawn timer; an enemy appears when its
/// timer runs out.
#[derive(Resource, Debug, Default)]
pub struct EnemySpawner {
    pending: Vec<Timer>,
}

impl EnemySpawner {
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Schedule respawns so that living plus pending enemies reach `min_count`.
    ///
    /// Returns how many respawns were added.
    pub fn schedule_shortfall(&mut self, alive: usize, min_count: usize, delay: f32) -> usize {
        let missing = min_count.saturating_sub(alive + self.pending.len());
        for _ in 0..missing {
            self.pending
                .push(Timer::from_seconds(delay.max(0.0), TimerMode::Once));
        }
        missing
    }

    /// Advance respawn timers. Returns how many enemies are due now.
    pub fn tick(&mut self, delta: std::time::Duration) -> usize {
        for timer in &mut self.pending {
            timer.tick(delta);
        }
        let before = self.pending.len();
        self.pending.retain(|timer| !timer.finished());
        before - self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_schedules_only_the_shortfall() {
        let mut spawner = EnemySpawner::default();
        assert_eq!(spawner.schedule_shortfall(3, 5, 1.0), 2);
        // Pending respawns count toward the minimum
        assert_eq!(spawner.schedule_shortfall(3, 5, 1.0), 0);
        assert_eq!(spawner.schedule_shortfall(7, 5, 1.0), 0);
        assert_eq!(spawner.pending(), 2);
    }

    #[test]
    fn test_respawns_after_delay() {
        let mut spawner = EnemySpawner::default();
        spawner.schedule_shortfall(4, 5, 1.0);

        assert_eq!(spawner.tick(Duration::from_secs_f32(0.5)), 0);
        assert_eq!(spawner.tick(Duration::from_secs_f32(0.5)), 1);
        assert_eq!(spawner.pending(), 0);
    }
}
