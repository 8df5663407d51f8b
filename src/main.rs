use std::path::Path;
use std::time::Instant;

use tracerium::config::{self, Config};
use tracerium::physics::Simulation;
use tracerium::solver::diagnostics::{divergence_norm, kinetic_energy};

/// Parse `<flag> <value>` from CLI args.
fn parse_flag(flag: &str) -> Option<String> {
    let args: Vec<String> = std::env::args().collect();
    args.windows(2).find(|w| w[0] == flag).map(|w| w[1].clone())
}

fn load_config() -> Config {
    match parse_flag("--config") {
        Some(path) => match config::load_from(Path::new(&path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("failed to load {}: {}; using defaults", path, e);
                Config::default()
            }
        },
        None => config::load(),
    }
}

fn report(sim: &Simulation, frame: usize) {
    let fluid = sim.fluid();
    let (u, v, _) = fluid.fields();
    let n = fluid.resolution();
    let ext = fluid.extrema();
    log::info!(
        "frame {:>5} t={:.3} | density [{:.4}, {:.4}] speed [{:.4}, {:.4}] | ke={:.5} div={:.3e} | particles={}",
        frame,
        fluid.elapsed(),
        ext.min_density,
        ext.max_density,
        ext.min_speed,
        ext.max_speed,
        kinetic_energy(u, v, n),
        divergence_norm(u, v, n),
        sim.particles().len(),
    );
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut cfg = load_config();
    if let Some(frames) = parse_flag("--frames") {
        match frames.parse() {
            Ok(n) => cfg.run.frames = n,
            Err(_) => log::warn!("ignoring invalid --frames value {:?}", frames),
        }
    }

    let mut sim = match Simulation::from_config(&cfg) {
        Ok(sim) => sim,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    sim.seed_particles(cfg.particles.count);
    sim.set_animated(true, true);

    let interval = cfg.run.report_interval.max(1);
    let start = Instant::now();
    for frame in 1..=cfg.run.frames {
        sim.frame();
        if frame % interval == 0 || frame == cfg.run.frames {
            report(&sim, frame);
        }
    }
    log::info!("{} frames in {:.2?}", cfg.run.frames, start.elapsed());
}
