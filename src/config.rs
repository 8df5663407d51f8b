use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::solver::BoundaryMode;

/// Default config file, looked up in the working directory.
pub const CONFIG_FILE: &str = "tracerium.yaml";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fluid: FluidConfig,
    pub particles: ParticleConfig,
    pub run: RunConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FluidConfig {
    pub resolution: usize,
    pub diffusion: f64,
    pub viscosity: f64,
    pub time_step: f64,
    pub boundary: BoundaryMode,
    pub obstacle: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub time_step: f64,
    pub seed: u64,
    pub count: usize,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub frames: usize,
    pub report_interval: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fluid: FluidConfig::default(),
            particles: ParticleConfig::default(),
            run: RunConfig::default(),
        }
    }
}

impl Default for FluidConfig {
    fn default() -> Self {
        Self {
            resolution: 64,
            diffusion: 0.0,
            viscosity: 0.0,
            time_step: 0.1,
            boundary: BoundaryMode::Periodic,
            obstacle: false,
        }
    }
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            time_step: 0.01,
            seed: 42,
            count: 64,
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            frames: 600,
            report_interval: 60,
        }
    }
}

/// Read and parse a YAML config file.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&contents)?)
}

/// Load `tracerium.yaml` if present, falling back to defaults on any failure.
pub fn load() -> Config {
    let path = Path::new(CONFIG_FILE);
    if !path.exists() {
        return Config::default();
    }
    match load_from(path) {
        Ok(cfg) => cfg,
        Err(e) => {
            log::warn!("failed to load {}: {}; using defaults", CONFIG_FILE, e);
            Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let cfg = Config::default();
        assert_eq!(cfg.fluid.resolution, 64);
        assert_eq!(cfg.fluid.diffusion, 0.0);
        assert_eq!(cfg.fluid.viscosity, 0.0);
        assert_eq!(cfg.fluid.time_step, 0.1);
        assert_eq!(cfg.fluid.boundary, BoundaryMode::Periodic);
        assert!(!cfg.fluid.obstacle);
        assert_eq!(cfg.particles.time_step, 0.01);
        assert_eq!(cfg.particles.seed, 42);
        assert_eq!(cfg.particles.count, 64);
        assert_eq!(cfg.run.frames, 600);
        assert_eq!(cfg.run.report_interval, 60);
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = "fluid:\n  resolution: 128\nparticles:\n  count: 10\n";
        let cfg: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.fluid.resolution, 128);
        assert_eq!(cfg.fluid.time_step, 0.1); // default
        assert_eq!(cfg.particles.count, 10);
        assert_eq!(cfg.particles.seed, 42); // default
        assert_eq!(cfg.run.frames, 600); // default
    }

    #[test]
    fn test_full_yaml() {
        let yaml = r#"
fluid:
  resolution: 32
  diffusion: 0.002
  viscosity: 0.003
  time_step: 0.2
  boundary: fixed_wall
  obstacle: true
particles:
  time_step: 0.05
  seed: 7
  count: 300
run:
  frames: 120
  report_interval: 10
"#;
        let cfg: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.fluid.resolution, 32);
        assert_eq!(cfg.fluid.diffusion, 0.002);
        assert_eq!(cfg.fluid.viscosity, 0.003);
        assert_eq!(cfg.fluid.time_step, 0.2);
        assert_eq!(cfg.fluid.boundary, BoundaryMode::FixedWall);
        assert!(cfg.fluid.obstacle);
        assert_eq!(cfg.particles.time_step, 0.05);
        assert_eq!(cfg.particles.seed, 7);
        assert_eq!(cfg.particles.count, 300);
        assert_eq!(cfg.run.frames, 120);
        assert_eq!(cfg.run.report_interval, 10);
    }

    #[test]
    fn test_bad_boundary_rejected() {
        let yaml = "fluid:\n  boundary: sideways\n";
        assert!(serde_yaml::from_str::<Config>(yaml).is_err());
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = load_from(Path::new("definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_missing_file() {
        // When no tracerium.yaml exists, load() should return defaults
        let cfg = load();
        assert_eq!(cfg.fluid.resolution, 64);
        assert_eq!(cfg.particles.count, 64);
    }
}
