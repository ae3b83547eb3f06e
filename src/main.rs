use std::path::PathBuf;

use bevy_ecs::prelude::*;
use clap::Parser;
use glam::Vec2;
use log::{debug, info, warn};

use waypoint::components::locomotion::{InputMapping, LocomotionController};
use waypoint::components::menu::{MenuAction, MenuButton};
use waypoint::components::pose::Pose;
use waypoint::events::audio::AudioCmd;
use waypoint::events::menu::MenuButtonPressed;
use waypoint::game::{self, COURTYARD_SCENE, HALLWAY_SCENE, MENU_SCENE};
use waypoint::resources::audio::shutdown_audio;
use waypoint::resources::gameconfig::GameConfig;
use waypoint::resources::input::{Key, RawInput};
use waypoint::resources::prefs::Prefs;
use waypoint::resources::prompt::PromptText;
use waypoint::resources::scene::{CurrentScene, NextScene};
use waypoint::resources::worldsignals::{QUIT_GAME_FLAG, WorldSignals};
use waypoint::systems::input::apply_raw_input;
use waypoint::systems::time::update_world_time;

#[derive(Parser)]
#[command(
    version,
    about = "Headless walk through the Waypoint scenes: menu, hallway and courtyard."
)]
struct Cli {
    /// INI file with [locomotion], [camera] and [prefs] sections.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Preference store; overrides [prefs] path from the config.
    #[arg(long, value_name = "PATH")]
    prefs: Option<PathBuf>,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 1800)]
    frames: u64,

    /// Fixed frame time in seconds.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Seed for the mouse jitter and random jumps.
    #[arg(long)]
    seed: Option<u64>,

    /// Use local-relative movement with mouse look.
    #[arg(long)]
    first_person: bool,
}

/// Scripted player: clicks Play, walks to the hallway door and opens it,
/// then backs into the courtyard door.
struct Pilot {
    rng: fastrand::Rng,
    interact_held: bool,
}

impl Pilot {
    fn new(seed: Option<u64>) -> Self {
        Self {
            rng: seed.map(fastrand::Rng::with_seed).unwrap_or_else(fastrand::Rng::new),
            interact_held: false,
        }
    }

    fn next_input(&mut self, scene: Option<&str>, prompt_visible: bool) -> RawInput {
        let mut keys: Vec<Key> = Vec::new();
        match scene {
            Some(HALLWAY_SCENE) => {
                keys.push(Key::W);
                // Tap E: down one frame, up the next.
                if prompt_visible && !self.interact_held {
                    keys.push(Key::E);
                    self.interact_held = true;
                } else {
                    self.interact_held = false;
                }
            }
            Some(COURTYARD_SCENE) => keys.push(Key::S),
            _ => {}
        }
        if self.rng.u32(0..100) == 0 {
            keys.push(Key::Space);
        }
        let mut raw = RawInput::with_keys(&keys);
        raw.mouse_delta = Vec2::new(self.rng.f32() - 0.5, self.rng.f32() - 0.5) * 0.2;
        raw
    }
}

fn press_menu_play(world: &mut World) {
    let play = world
        .query::<(Entity, &MenuButton)>()
        .iter(world)
        .find(|(_, button)| matches!(button.action, MenuAction::PlayGame(_)))
        .map(|(entity, _)| entity);
    if let Some(button) = play {
        world.trigger(MenuButtonPressed { button });
        world.flush();
    }
}

fn log_player(world: &mut World, frame: u64) {
    let scene = world
        .resource::<CurrentScene>()
        .get()
        .unwrap_or("<none>")
        .to_string();
    let mut players = world.query::<(&Pose, &LocomotionController)>();
    for (pose, controller) in players.iter(world) {
        info!(
            "frame {} [{}] player at ({:.2}, {:.2}, {:.2}) yaw {:.1} grounded {}",
            frame,
            scene,
            pose.position.x,
            pose.position.y,
            pose.position.z,
            pose.yaw_degrees(),
            controller.grounded
        );
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    info!("Waypoint starting");
    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        debug!("Using default config: {}", e);
    }
    if cli.first_person {
        config.mapping = InputMapping::LocalRelative;
    }
    if let Some(path) = &cli.prefs {
        config.prefs_path = path.clone();
    }

    let prefs = match Prefs::load(&config.prefs_path) {
        Ok(prefs) => prefs,
        Err(e) => {
            warn!("Starting with empty preferences: {}", e);
            Prefs::with_path(&config.prefs_path)
        }
    };

    let mut world = World::new();
    let audio_rx = game::setup_world(&mut world, config, prefs);
    world.resource_mut::<NextScene>().set(MENU_SCENE);

    let mut update = game::build_update_schedule();
    update
        .initialize(&mut world)
        .expect("Failed to initialize schedule");

    let mut pilot = Pilot::new(cli.seed);
    let mut last_prompt = PromptText::default();

    for frame in 0..cli.frames {
        if world.resource::<WorldSignals>().has_flag(QUIT_GAME_FLAG) {
            info!("Quit requested");
            break;
        }

        let scene = world.resource::<CurrentScene>().get().map(str::to_string);
        if scene.as_deref() == Some(MENU_SCENE) {
            press_menu_play(&mut world);
        }
        let prompt_visible = world.resource::<PromptText>().is_visible();
        let raw = pilot.next_input(scene.as_deref(), prompt_visible);
        apply_raw_input(&mut world, &raw);
        update_world_time(&mut world, cli.dt);

        update.run(&mut world);
        world.clear_trackers();

        for cmd in audio_rx.try_iter() {
            match cmd {
                AudioCmd::PlayFx { id, volume } => info!("audio: play '{}' at {:.2}", id, volume),
            }
        }

        let prompt = world.resource::<PromptText>().clone();
        if prompt != last_prompt {
            match prompt.text() {
                Some(text) => info!("prompt: {}", text),
                None => info!("prompt hidden"),
            }
            last_prompt = prompt;
        }

        if frame % 60 == 0 {
            log_player(&mut world, frame);
        }
    }

    shutdown_audio(&mut world);
    info!("Waypoint finished");
}
