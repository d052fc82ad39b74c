use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, anyhow};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use winit::event::VirtualKeyCode;

use blockfall::controller::{GameController, Rules};
use blockfall::input::{InputAction, map_key_to_action};
use blockfall::leaderboard::{LeaderboardStore, RankingRecord};
use blockfall::session::{GameSession, SessionPhase};
use blockfall::settings::{GameSettings, SettingsStore};
use blockfall::view::{FRAME_SIZE, draw_session};
use engine::app::{AppConfig, AppContext, DEFAULT_FRAME_INTERVAL, GameApp, InputFrame, run_game};
use engine::graphics::Renderer2d;
use engine::timer::{Clock, QueuedInput, SystemClock};

#[derive(Debug, Parser)]
#[command(name = "blockfall", about = "Falling-block puzzle with a local leaderboard")]
struct Cli {
    /// Seed for piece selection (random when omitted).
    #[arg(long)]
    seed: Option<u64>,

    /// Leaderboard file to read and write.
    #[arg(long, value_name = "PATH")]
    leaderboard: Option<PathBuf>,

    /// Settings file (defaults to the user config dir).
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Print the leaderboard and exit.
    #[arg(long)]
    rankings: bool,
}

struct BlockfallApp {
    rules: Rules,
    seed: u64,
    store: LeaderboardStore,
    clock: SystemClock,
    actions: QueuedInput<InputAction>,
}

impl GameApp for BlockfallApp {
    type State = GameSession;

    fn init_state(&mut self, _ctx: &mut AppContext) -> Self::State {
        let controller = GameController::new(self.rules, self.seed);
        GameSession::new(controller, self.store.clone(), self.clock.now())
    }

    fn update_state(
        &mut self,
        session: &mut Self::State,
        input: &InputFrame,
        _dt: Duration,
        ctx: &mut AppContext,
    ) {
        if *session.phase() == SessionPhase::Playing {
            for &key in &input.keys_pressed {
                if let Some(action) = map_key_to_action(key) {
                    self.actions.push(action);
                }
            }
            session.update(&self.clock, &mut self.actions);
            if *session.phase() != SessionPhase::Playing {
                self.actions.clear();
                ctx.window.set_title(&format!(
                    "Blockfall - game over ({})",
                    session.controller().score()
                ));
            }
        } else if let Some(prompt) = session.prompt_mut() {
            if let Some(result) = prompt.apply_frame(input) {
                session.resolve_prompt(result);
            }
        } else if input.pressed(VirtualKeyCode::Return) {
            session.restart(rand::random(), self.clock.now());
            ctx.window.set_title("Blockfall");
        } else if input.pressed(VirtualKeyCode::Escape) {
            ctx.request_exit();
        }
    }

    fn render(&self, session: &Self::State, gfx: &mut dyn Renderer2d) {
        draw_session(gfx, session);
    }
}

fn print_rankings(store: &LeaderboardStore) -> anyhow::Result<()> {
    let rankings = store
        .load()
        .with_context(|| format!("reading {}", store.path().display()))?;
    if rankings.is_empty() {
        println!("no scores yet ({})", store.path().display());
    }
    for (rank, RankingRecord { name, score }) in rankings.records().iter().enumerate() {
        println!("{:>3}. {name}: {score}", rank + 1);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings_store = match cli.settings {
        Some(path) => SettingsStore::new(path),
        None => SettingsStore::from_env(),
    };
    let settings: GameSettings = settings_store.load();
    tracing::debug!(path = %settings_store.path().display(), ?settings, "settings loaded");

    let store = match cli.leaderboard.or_else(|| settings.leaderboard.path.clone()) {
        Some(path) => LeaderboardStore::new(path),
        None => LeaderboardStore::from_env(),
    }
    .with_max_records(settings.leaderboard.max_records);

    if cli.rankings {
        return print_rankings(&store);
    }

    let seed = cli.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, leaderboard = %store.path().display(), "starting blockfall");

    let app = BlockfallApp {
        rules: settings.rules(),
        seed,
        store,
        clock: SystemClock::new(),
        actions: QueuedInput::new(),
    };
    let config = AppConfig {
        title: "Blockfall".to_string(),
        frame_size: FRAME_SIZE,
        vsync: Some(settings.video.vsync),
        frame_interval: DEFAULT_FRAME_INTERVAL,
    };
    run_game(config, app).map_err(|err| anyhow!("window loop failed: {err}"))
}
