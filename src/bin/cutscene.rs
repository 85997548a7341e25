use std::{
    cell::RefCell,
    collections::BTreeMap,
    path::{Path, PathBuf},
    rc::Rc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use cutscene::{
    AudioFactory, CutsceneManager, Headless, ManagerOpts, ManualClock, MemorySurface, Millis,
    Ports, Rarity, RarityTable, RecordingAudio, RecordingEngine, SYNTH_SAMPLE_RATE, SceneCtx,
    SceneRegistry, SynthAudio, TimerHost, write_f32le,
};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

#[derive(Parser, Debug)]
#[command(name = "cutscene", version)]
struct Cli {
    /// Default log level when `RUST_LOG` is unset.
    #[arg(long, global = true, default_value_t = LevelFilter::WARN)]
    log_level: LevelFilter,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List registered scene keys and aliases.
    List,
    /// Print a scene's phase summary as JSON.
    Timeline(TimelineArgs),
    /// Play scenes headlessly on a manual clock and print a JSON report.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct RarityArgs {
    /// Rarity table JSON.
    #[arg(long)]
    rarities: Option<PathBuf>,

    /// Tier to use from the rarity table.
    #[arg(long, requires = "rarities")]
    tier: Option<String>,
}

#[derive(Parser, Debug)]
struct TimelineArgs {
    /// Scene key (unknown keys resolve to the fallback).
    #[arg(long)]
    scene: String,

    #[command(flatten)]
    rarity: RarityArgs,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Scene key (unknown keys resolve to the fallback).
    #[arg(long)]
    scene: String,

    #[command(flatten)]
    rarity: RarityArgs,

    /// Manager seed.
    #[arg(long, default_value_t = ManagerOpts::default().seed)]
    seed: u64,

    /// Call `stop()` at this time (ms).
    #[arg(long)]
    stop_at: Option<u64>,

    /// Second scene to play, superseding the first if it still runs.
    #[arg(long)]
    then: Option<String>,

    /// Time (ms) at which `--then` is played.
    #[arg(long, default_value_t = 1000, requires = "then")]
    then_at: u64,

    /// Write synthesized tones as raw f32le mono PCM.
    #[arg(long)]
    audio_out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::builder()
        .with_default_directive(cli.log_level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.cmd {
        Command::List => cmd_list(),
        Command::Timeline(args) => cmd_timeline(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn load_rarity(args: &RarityArgs) -> anyhow::Result<Rarity> {
    let Some(path) = args.rarities.as_deref() else {
        return Ok(Rarity::default());
    };
    let table = read_table(path)?;
    let tier = match args.tier.as_deref() {
        Some(t) => t.to_owned(),
        None => table
            .names()
            .next()
            .map(str::to_owned)
            .with_context(|| format!("rarity table '{}' is empty", path.display()))?,
    };
    Ok(table.get(&tier)?)
}

fn read_table(path: &Path) -> anyhow::Result<RarityTable> {
    RarityTable::from_path(path).with_context(|| format!("load rarities '{}'", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value).context("serialize report")?;
    println!("{s}");
    Ok(())
}

fn cmd_list() -> anyhow::Result<()> {
    let registry = SceneRegistry::builtin();
    for key in registry.keys() {
        if key == registry.fallback().name() {
            println!("{key} (fallback)");
        } else {
            println!("{key}");
        }
    }
    for (alias, name) in registry.aliases() {
        println!("{alias} -> {name}");
    }
    Ok(())
}

#[derive(Serialize)]
struct TimelineReport {
    requested: String,
    scene: &'static str,
    resolve_ms: u64,
    phases: Vec<cutscene::PhaseSummary>,
}

fn cmd_timeline(args: TimelineArgs) -> anyhow::Result<()> {
    let rarity = load_rarity(&args.rarity)?;
    let registry = SceneRegistry::builtin();
    let h = Headless::new();
    let scene = cutscene::Cutscene::new(
        registry.lookup(&args.scene),
        SceneCtx {
            ports: h.ports_without_audio(),
            rarity,
            seed: 0,
        },
    );
    let timeline = scene.timeline();
    timeline.validate()?;
    print_json(&TimelineReport {
        requested: args.scene,
        scene: scene.name(),
        resolve_ms: timeline.resolve_at().0,
        phases: timeline.summary(),
    })
}

#[derive(Serialize)]
struct SimReport {
    seed: u64,
    played: Vec<&'static str>,
    completed: Vec<String>,
    end_ms: u64,
    timers_fired: u64,
    nodes_attached_total: u64,
    peak_nodes: usize,
    residual_nodes: usize,
    residual_classes: Vec<String>,
    engine_calls: usize,
    shakes: usize,
    effects: BTreeMap<&'static str, usize>,
    clear_all: usize,
    tones: usize,
    audio: Option<AudioReport>,
}

#[derive(Serialize)]
struct AudioReport {
    path: PathBuf,
    sample_rate: u32,
    samples: usize,
}

enum Step {
    Stop,
    Play(String),
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let rarity = load_rarity(&args.rarity)?;

    let clock = Rc::new(ManualClock::new());
    let surface = Rc::new(MemorySurface::new());
    let engine = Rc::new(RecordingEngine::new());
    let recording = Rc::new(RecordingAudio::new());
    let synth = Rc::new(SynthAudio::new(clock.clone(), SYNTH_SAMPLE_RATE));
    let audio: Rc<dyn AudioFactory> = if args.audio_out.is_some() {
        synth.clone()
    } else {
        recording.clone()
    };
    let ports = Ports::new(clock.clone(), surface.clone(), engine.clone(), audio);

    let manager = CutsceneManager::new(
        ports,
        SceneRegistry::builtin(),
        ManagerOpts {
            seed: args.seed,
            ..ManagerOpts::default()
        },
    )?;

    let completed = Rc::new(RefCell::new(Vec::<String>::new()));
    let mut played = Vec::new();

    let play = |key: &str| {
        let done = completed.clone();
        let tag = key.to_owned();
        manager.play(key, rarity.clone(), move || done.borrow_mut().push(tag));
        manager.current_scene()
    };

    played.extend(play(&args.scene));

    let mut steps = Vec::new();
    if let Some(at) = args.stop_at {
        steps.push((Millis(at), Step::Stop));
    }
    if let Some(key) = args.then.clone() {
        steps.push((Millis(args.then_at), Step::Play(key)));
    }
    steps.sort_by_key(|(at, _)| *at);

    for (at, step) in steps {
        clock.advance_to(at);
        match step {
            Step::Stop => manager.stop(),
            Step::Play(key) => played.extend(play(&key)),
        }
    }
    clock.run_until_idle();

    let audio = match &args.audio_out {
        Some(path) => {
            let samples = synth.render();
            write_f32le(&samples, path)?;
            Some(AudioReport {
                path: path.clone(),
                sample_rate: synth.sample_rate(),
                samples: samples.len(),
            })
        }
        None => None,
    };

    let mut effects = BTreeMap::new();
    for effect in engine.effects() {
        *effects.entry(effect.kind()).or_insert(0) += 1;
    }
    let tones = if args.audio_out.is_some() {
        synth.scheduled().len()
    } else {
        recording.tones().len()
    };

    let completed = completed.borrow().clone();
    print_json(&SimReport {
        seed: args.seed,
        played,
        completed,
        end_ms: clock.now().0,
        timers_fired: clock.fired_total(),
        nodes_attached_total: surface.attached_total(),
        peak_nodes: surface.peak_attached(),
        residual_nodes: surface.attached_count(),
        residual_classes: surface.global_classes(),
        engine_calls: engine.call_count(),
        shakes: engine.shakes().len(),
        effects,
        clear_all: engine.clear_count(),
        tones,
        audio,
    })
}
