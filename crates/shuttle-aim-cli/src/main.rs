//! Command line front end for the shuttle launcher tracker.
//!
//! Exercises the aiming pipeline without cameras attached: `calibrate`
//! derives a field of view from measurement pairs, `locate` runs one stereo
//! fix from raw pixel columns, and `cycle` runs a full evaluation cycle from
//! a JSON scenario, printing the wire line the serial layer would send.

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::LevelFilter;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use shuttle_aim::{
    azimuth_degrees, field_of_view, init_with_level, AimPipeline, CalibrationError, CameraModel,
    CourtGeometry, CourtMapper, CycleError, DifficultyLevel, DifficultyParams, LauncherCommand,
    PixelObservation, StereoRig, WorldPosition,
};

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Calibration(#[from] CalibrationError),
    #[error(transparent)]
    Triangulation(#[from] shuttle_aim::TriangulationError),
    #[error(transparent)]
    Cycle(#[from] CycleError),
    #[error(transparent)]
    Court(#[from] shuttle_aim::CourtError),
}

/// Everything one installation needs to run cycles offline.
#[derive(Debug, Serialize, Deserialize)]
struct Scenario {
    #[serde(default)]
    geometry: CourtGeometry,
    frame_width: u32,
    /// Calibrated FOVs, radians.
    fov_left: f64,
    fov_right: f64,
    #[serde(default)]
    difficulty: Option<DifficultyParams>,
    /// Locked aim position as [depth_mm, width_mm], if any.
    #[serde(default)]
    fixed_aim: Option<[f64; 2]>,
}

impl Scenario {
    fn pipeline(&self) -> AimPipeline {
        let rig = StereoRig::new(
            CameraModel::new(self.frame_width, self.fov_left),
            CameraModel::new(self.frame_width, self.fov_right),
            self.geometry.baseline_mm,
        );
        AimPipeline::new(rig, CourtMapper::new(self.geometry.clone()))
    }
}

#[derive(Parser)]
#[command(name = "shuttle-aim", about = "Stereo player tracking and launcher aiming")]
struct Cli {
    /// Verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Derive a camera field of view from calibration measurements.
    Calibrate {
        /// Camera-to-screen distances, one per sample.
        #[arg(long, required = true, num_args = 1..)]
        distance: Vec<f64>,
        /// Visible screen lengths, matched to the distances.
        #[arg(long, required = true, num_args = 1..)]
        length: Vec<f64>,
    },
    /// Run one stereo fix from two pixel columns.
    Locate {
        /// Scenario JSON file.
        scenario: PathBuf,
        #[arg(long)]
        pixel_left: i32,
        #[arg(long)]
        pixel_right: i32,
    },
    /// Run one full evaluation cycle and print the launcher wire line.
    Cycle {
        /// Scenario JSON file.
        scenario: PathBuf,
        #[arg(long)]
        pixel_left: i32,
        #[arg(long)]
        pixel_right: i32,
        /// Difficulty level 1..=3, overriding the scenario.
        #[arg(long)]
        level: Option<u8>,
        /// RNG seed for reproducible target draws.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn load_scenario(path: &PathBuf) -> Result<Scenario, CliError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn observation(pixel_x: i32, frame_width: u32) -> PixelObservation {
    PixelObservation {
        pixel_x,
        pixel_y: 0,
        frame_width,
        frame_height: 0,
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Calibrate { distance, length } => {
            let fov = field_of_view(&distance, &length)?;
            println!("field of view: {fov:.6} rad ({:.2} deg)", fov.to_degrees());
        }
        Command::Locate {
            scenario,
            pixel_left,
            pixel_right,
        } => {
            let scenario = load_scenario(&scenario)?;
            let pipeline = scenario.pipeline();
            let fix = pipeline.rig().locate(pixel_left, pixel_right)?;

            println!(
                "depth {:.0} mm, width {:.0} mm (distance {:.0} mm)",
                fix.position.depth_mm,
                fix.position.width_mm,
                fix.position.distance_mm()
            );
            println!(
                "bearings {:.4} / {:.4} rad, sight angles {:.4} / {:.4} rad, azimuth {:.4} rad",
                fix.bearing_left, fix.bearing_right, fix.sight_left, fix.sight_right, fix.azimuth
            );
        }
        Command::Cycle {
            scenario,
            pixel_left,
            pixel_right,
            level,
            seed,
        } => {
            let scenario = load_scenario(&scenario)?;
            let pipeline = scenario.pipeline();

            let mut params = scenario.difficulty.unwrap_or(DifficultyParams {
                level: DifficultyLevel::Direct,
                radius_mm: 1_000.0,
                real_launcher_limit: false,
            });
            if let Some(level) = level {
                params.level = DifficultyLevel::from_token(&level.to_string())
                    .unwrap_or(DifficultyLevel::Direct);
            }

            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };

            let frame_width = scenario.frame_width;
            let out = pipeline.evaluate(
                &observation(pixel_left, frame_width),
                &observation(pixel_right, frame_width),
                &params,
                &mut rng,
            )?;

            println!(
                "player: court ({}, {}), depth {:.0} mm, width {:.0} mm",
                out.player_court.x,
                out.player_court.y,
                out.fix.position.depth_mm,
                out.fix.position.width_mm
            );
            println!(
                "target: court ({}, {}), azimuth {:.4} rad",
                out.target_court.x, out.target_court.y, out.target_azimuth
            );

            if let Some([depth_mm, width_mm]) = scenario.fixed_aim {
                let aim = pipeline.fixed_aim(WorldPosition::new(depth_mm, width_mm))?;
                println!(
                    "fixed aim: court ({}, {}), azimuth {:.4} rad",
                    aim.court.x, aim.court.y, aim.azimuth
                );
            }

            let command = LauncherCommand {
                azimuth_deg: azimuth_degrees(out.target_azimuth),
                altitude: 0,
                power: 0,
                throw_period_ms: 0,
                update_period_ms: 1_000,
                level: params.level,
            };
            print!("wire: {}", command.encode());
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let _ = init_with_level(level);

    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
