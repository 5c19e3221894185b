//! Combat configuration structures and RON loading.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::error::ConfigError;
use crate::projectiles::Layer;

/// Where the combat tuning file lives, relative to the working directory.
pub const COMBAT_CONFIG_PATH: &str = "assets/data/combat.ron";

/// All static combat tuning, loaded once at startup.
///
/// Every section falls back to the game's built-in values when omitted,
/// so a data file only needs to list what it changes.
#[derive(Resource, Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    pub physics: PhysicsConfig,
    pub weapon: WeaponConfig,
    pub skills: SkillsConfig,
    pub enemies: EnemyConfig,
    pub player: PlayerTuning,
}

/// World-wide physics constants used by projectile integration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: (f32, f32, f32),
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: (0.0, -9.81, 0.0),
        }
    }
}

impl PhysicsConfig {
    pub fn gravity(&self) -> Vec3 {
        Vec3::new(self.gravity.0, self.gravity.1, self.gravity.2)
    }
}

/// Player weapon base stats.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    pub name: String,
    pub base_damage: f32,
    pub damage_multiplier: f32,
    /// Attacks per second before skill multipliers
    pub base_attack_rate: f32,
    pub projectile_speed: f32,
    /// Height of the fire point above the player origin
    pub fire_height: f32,
    /// Projectile template; `None` leaves the weapon unable to fire
    #[serde(default = "default_projectile")]
    pub projectile: Option<ProjectileConfig>,
}

fn default_projectile() -> Option<ProjectileConfig> {
    Some(ProjectileConfig::default())
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            name: "Short Bow".to_string(),
            base_damage: 10.0,
            damage_multiplier: 1.0,
            base_attack_rate: 1.0,
            projectile_speed: 20.0,
            fire_height: 0.5,
            projectile: default_projectile(),
        }
    }
}

/// Projectile physics and bounce behaviour.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    /// Seconds before the projectile expires without hitting anything
    pub max_lifetime: f32,
    pub use_gravity: bool,
    pub gravity_scale: f32,
    /// Air resistance factor (drag grows with speed squared)
    pub drag_coefficient: f32,
    /// Upward pitch in degrees applied at launch when gravity is on
    pub launch_angle: f32,
    /// Layers the projectile collides with
    pub collision_layers: Vec<Layer>,
    /// Radius searched for the next bounce target
    pub bounce_range: f32,
    /// Layers that count as valid bounce targets
    pub bounce_layers: Vec<Layer>,
    /// Delay between a bounce hit and the retarget query
    pub retarget_delay: f32,
    /// Window after a retarget during which only the new target can be hit
    pub ignore_window: f32,
    /// How long hit effect markers stay alive
    pub hit_effect_lifetime: f32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            max_lifetime: 5.0,
            use_gravity: false,
            gravity_scale: 1.0,
            drag_coefficient: 0.01,
            launch_angle: 15.0,
            collision_layers: vec![Layer::Enemy, Layer::World],
            bounce_range: 10.0,
            bounce_layers: vec![Layer::Enemy],
            retarget_delay: 0.05,
            ignore_window: 0.2,
            hit_effect_lifetime: 2.0,
        }
    }
}

/// Base and rage values for every skill.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SkillsConfig {
    pub arrow_multiplication: ArrowMultiplicationConfig,
    pub bounce_damage: BounceDamageConfig,
    pub burn_damage: BurnDamageConfig,
    pub attack_speed: AttackSpeedConfig,
    pub rage_mode: RageModeConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArrowMultiplicationConfig {
    pub name: String,
    pub arrow_count: i32,
    pub rage_arrow_count: i32,
    /// Degrees between neighbouring arrows
    pub spread_angle: f32,
}

impl Default for ArrowMultiplicationConfig {
    fn default() -> Self {
        Self {
            name: "Arrow Multiplication".to_string(),
            arrow_count: 2,
            rage_arrow_count: 4,
            spread_angle: 15.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BounceDamageConfig {
    pub name: String,
    pub bounce_count: i32,
    pub rage_bounce_count: i32,
    /// Fraction of the original damage lost per target hit
    pub falloff: f32,
}

impl Default for BounceDamageConfig {
    fn default() -> Self {
        Self {
            name: "Bounce Damage".to_string(),
            bounce_count: 1,
            rage_bounce_count: 3,
            falloff: 0.25,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BurnDamageConfig {
    pub name: String,
    pub damage_per_second: f32,
    pub duration: f32,
    pub rage_duration: f32,
    pub max_stacks: i32,
}

impl Default for BurnDamageConfig {
    fn default() -> Self {
        Self {
            name: "Burn Damage".to_string(),
            damage_per_second: 5.0,
            duration: 3.0,
            rage_duration: 6.0,
            max_stacks: 3,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AttackSpeedConfig {
    pub name: String,
    pub multiplier: f32,
    pub rage_multiplier: f32,
}

impl Default for AttackSpeedConfig {
    fn default() -> Self {
        Self {
            name: "Attack Speed".to_string(),
            multiplier: 2.0,
            rage_multiplier: 4.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RageModeConfig {
    pub name: String,
}

impl Default for RageModeConfig {
    fn default() -> Self {
        Self {
            name: "Rage Mode".to_string(),
        }
    }
}

/// Enemy stats and spawn rules.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub max_health: f32,
    /// Number of enemies kept alive in the arena
    pub min_count: usize,
    /// Seconds between a death and the replacement spawn
    pub respawn_delay: f32,
    pub spawn_area_width: f32,
    pub spawn_area_height: f32,
    pub collider_radius: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            min_count: 5,
            respawn_delay: 1.0,
            spawn_area_width: 8.0,
            spawn_area_height: 12.0,
            collider_radius: 0.5,
        }
    }
}

/// Player movement and targeting.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub move_speed: f32,
    pub rotation_speed: f32,
    /// Enemies further than this are not auto-targeted
    pub attack_range: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            rotation_speed: 10.0,
            attack_range: 20.0,
        }
    }
}

impl CombatConfig {
    /// Parse and validate a configuration from RON text.
    pub fn from_ron_str(contents: &str, path: &str) -> Result<Self, ConfigError> {
        let config = ron::from_str::<CombatConfig>(contents).map_err(|e| ConfigError::ParseError {
            path: path.to_string(),
            details: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(display));
        }

        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: display.clone(),
            details: e.to_string(),
        })?;

        Self::from_ron_str(&contents, &display)
    }

    /// Reject values the simulation cannot work with at all.
    ///
    /// Values that merely fall outside a gameplay range (negative bounce
    /// counts, falloff above 1) are accepted here and clamped where they
    /// are used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("weapon.base_attack_rate", self.weapon.base_attack_rate)?;
        require_positive("weapon.projectile_speed", self.weapon.projectile_speed)?;
        if let Some(projectile) = &self.weapon.projectile {
            require_positive("weapon.projectile.max_lifetime", projectile.max_lifetime)?;
            if projectile.collision_layers.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "weapon.projectile.collision_layers",
                    details: "at least one layer is required".to_string(),
                });
            }
        }
        require_positive("enemies.max_health", self.enemies.max_health)?;
        Ok(())
    }
}

fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            details: format!("expected a positive number, got {value}"),
        })
    }
}

/// Load the combat configuration from `assets/data/combat.ron`.
///
/// Falls back to built-in defaults when the file is missing or invalid,
/// so the game always starts.
pub fn load_combat_config(mut commands: Commands) {
    match CombatConfig::load(Path::new(COMBAT_CONFIG_PATH)) {
        Ok(config) => {
            info!("Loaded combat config from {}", COMBAT_CONFIG_PATH);
            commands.insert_resource(config);
        }
        Err(ConfigError::FileNotFound(path)) => {
            warn!("Combat config not found at {}, using defaults", path);
            commands.insert_resource(CombatConfig::default());
        }
        Err(e) => {
            error!("Failed to load combat config: {}. Using defaults", e);
            commands.insert_resource(CombatConfig::default());
        }
    }
}
