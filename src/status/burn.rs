//! Burn - stacking damage over time.
//!
//! Each stack ticks on its own one-second timer. A target holds at most
//! `max_stacks` stacks; a new stack on a full target replaces the stack
//! closest to running out.

use bevy::prelude::*;

/// Seconds between burn damage ticks.
pub const BURN_TICK_INTERVAL: f32 = 1.0;

/// Burn parameters carried by a projectile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurnConfig {
    pub damage_per_second: f32,
    pub duration: f32,
    pub max_stacks: u32,
}

impl BurnConfig {
    pub fn new(damage_per_second: f32, duration: f32, max_stacks: i32) -> Self {
        Self {
            damage_per_second: damage_per_second.max(0.0),
            duration: duration.max(0.0),
            max_stacks: max_stacks.max(1) as u32,
        }
    }
}

/// One application of burn on a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurnStack {
    pub damage_per_second: f32,
    pub remaining: f32,
    pub since_tick: f32,
}

/// Active burn stacks on an entity.
#[derive(Component, Debug, Clone)]
pub struct BurnEffect {
    stacks: Vec<BurnStack>,
    max_stacks: u32,
    /// Marker entity shown while the target burns
    pub visual: Option<Entity>,
}

impl BurnEffect {
    pub fn new(max_stacks: u32) -> Self {
        Self {
            stacks: Vec::new(),
            max_stacks: max_stacks.max(1),
            visual: None,
        }
    }

    pub fn stacks(&self) -> &[BurnStack] {
        &self.stacks
    }

    pub fn max_stacks(&self) -> u32 {
        self.max_stacks
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    /// Change capacity, evicting the shortest stacks if it shrinks.
    pub fn set_max_stacks(&mut self, max_stacks: u32) {
        self.max_stacks = max_stacks.max(1);
        while self.stacks.len() > self.max_stacks as usize {
            self.evict_shortest();
        }
    }

    pub fn add_stack(&mut self, duration: f32, damage_per_second: f32) {
        if self.stacks.len() >= self.max_stacks as usize {
            self.evict_shortest();
        }
        self.stacks.push(BurnStack {
            damage_per_second: damage_per_second.max(0.0),
            remaining: duration.max(0.0),
            since_tick: 0.0,
        });
    }

    /// Advance every stack and return the damage dealt this frame.
    pub fn tick(&mut self, dt: f32) -> f32 {
        let mut damage = 0.0;

        for stack in &mut self.stacks {
            stack.remaining -= dt;
            stack.since_tick += dt;
            if stack.since_tick >= BURN_TICK_INTERVAL {
                damage += stack.damage_per_second;
                stack.since_tick = 0.0;
            }
        }

        self.stacks.retain(|stack| stack.remaining > 0.0);
        damage
    }

    fn evict_shortest(&mut self) {
        let shortest = self
            .stacks
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.remaining.total_cmp(&b.remaining))
            .map(|(index, _)| index);

        if let Some(index) = shortest {
            self.stacks.remove(index);
        }
    }
}

/// Marker for the visual attached to a burning entity.
#[derive(Component)]
pub struct BurnVisual;

/// Request to set an entity on fire.
#[derive(Event, Debug, Clone)]
pub struct BurnEvent {
    pub target: Entity,
    pub config: BurnConfig,
}
