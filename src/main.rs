use tbsim::{bench_integrators, build_scenario, Preset, ScenarioConfig, Simulation};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::info;

use std::path::PathBuf;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PresetArg {
    FigureEight,
    SolarSystem,
    BinaryCapture,
}

impl From<PresetArg> for Preset {
    fn from(p: PresetArg) -> Self {
        match p {
            PresetArg::FigureEight => Preset::FigureEight,
            PresetArg::SolarSystem => Preset::SolarSystem,
            PresetArg::BinaryCapture => Preset::BinaryCapture,
        }
    }
}

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file under `scenarios/`, overrides the preset
    #[arg(short)]
    file_name: Option<String>,

    #[arg(short, value_enum, default_value = "figure-eight")]
    preset: PresetArg,

    /// Frames to run
    #[arg(short = 'n', default_value_t = 5000)]
    frames: usize,

    /// Physics steps per frame
    #[arg(short, default_value_t = 1.0)]
    speed: f64,

    /// Time both integrators instead of running a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_simulation(args: &Args) -> Result<Simulation> {
    match &args.file_name {
        Some(file_name) => {
            let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
            let cfg = ScenarioConfig::from_path(&config_path)?;
            info!("loaded scenario {:?} from {}", cfg.name, config_path.display());
            build_scenario(&cfg)
        }
        None => Preset::from(args.preset).build(),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.bench {
        bench_integrators();
        return Ok(());
    }

    let mut sim = load_simulation(&args)?;
    info!("running {} bodies with {} for {} frames", sim.bodies().len(), sim.method_name(), args.frames);

    for _ in 0..args.frames {
        sim.advance(args.speed);
    }

    let q = sim.conserved_quantities();
    println!("time        {:.5}", sim.time());
    println!("steps       {}", sim.step_count());
    println!("dt          {:.6}", sim.dt());
    println!("energy      {:.8}", q.total_energy());
    println!("drift       {:.4}% ({:?})", sim.energy_drift_percent(), sim.conservation_status());
    println!("momentum    {:.3e}", q.momentum.norm());
    println!("ang. mom.   {:.8}", q.angular_momentum.abs());
    println!("collisions  {}", sim.collision_events().len());
    let com = sim.center_of_mass();
    println!("com         ({:.6}, {:.6})", com.x, com.y);
    for b in sim.bodies() {
        println!(
            "  {:<8} x = ({:9.5}, {:9.5})  v = ({:9.5}, {:9.5}){}",
            b.name,
            b.x.x,
            b.x.y,
            b.v.x,
            b.v.y,
            if b.collision_detected { "  *" } else { "" }
        );
    }

    Ok(())
}
