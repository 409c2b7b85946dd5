use arboard::Clipboard;
use glam::Vec2;
use macroquad::prelude::{
    clear_background, draw_line, draw_text, get_fps, is_key_pressed, mouse_position, next_frame, Color, Conf,
    KeyCode, WHITE,
};
use sightlines::config::{Config, ConfigSource, DEFAULT_CONFIG_PATH};
use sightlines::{
    draw_frame, logging, FrameSnapshot, InputSource, RaySegment, RenderStyle, RenderSurface, Rgba, Scene, Sweep,
};
use std::sync::OnceLock;
use tracing::{error, info, warn};

static CONFIG: OnceLock<(Config, ConfigSource)> = OnceLock::new();

/// `--config <path>` selects the config file, defaulting to ./config.toml
fn config_path() -> String {
    let args: Vec<String> = std::env::args().collect();
    args.iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1).cloned())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
}

fn loaded_config() -> &'static (Config, ConfigSource) {
    CONFIG.get_or_init(|| Config::load_or_default(config_path()))
}

fn window_conf() -> Conf {
    let (config, _) = loaded_config();
    Conf {
        window_title: config.window.title.clone(),
        window_width: config.window.width,
        window_height: config.window.height,
        window_resizable: true,
        ..Default::default()
    }
}

fn to_color(c: Rgba) -> Color {
    Color::from_rgba(c.0, c.1, c.2, c.3)
}

/// Draws straight onto the macroquad window
struct WindowSurface;

impl RenderSurface for WindowSurface {
    fn draw_line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Rgba) {
        draw_line(from.x, from.y, to.x, to.y, thickness, to_color(color));
    }
}

/// The mouse cursor is the viewpoint
struct MouseInput;

impl InputSource for MouseInput {
    fn viewpoint(&self) -> Vec2 {
        let (x, y) = mouse_position();
        Vec2::new(x, y)
    }
}

/// Per-run state: the static scene plus the latest frame's rays
struct VisState {
    scene: Scene,
    sweep: Sweep,
    style: RenderStyle,
    background: Color,
    show_hud: bool,
    snapshot_path: String,
    origin: Vec2,
    rays: Vec<RaySegment>,
}

impl VisState {
    fn update(&mut self, input: &impl InputSource) {
        self.origin = input.viewpoint();
        self.rays = match self.sweep.cast(self.origin, &self.scene) {
            Ok(rays) => rays,
            Err(e) => {
                warn!("Skipping sweep: {}", e);
                Vec::new()
            }
        };
    }

    fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(self.origin, self.sweep.settings(), &self.scene, &self.rays)
    }

    fn toggle_strategy(&mut self) {
        let strategy = self.sweep.settings().strategy.toggled();
        self.sweep.set_strategy(strategy);
        info!("Hit strategy: {:?}", strategy);
    }

    fn toggle_parallel(&mut self) {
        let parallel = !self.sweep.settings().parallel;
        self.sweep.set_parallel(parallel);
        info!("Parallel sweep: {}", parallel);
    }

    fn copy_to_clipboard(&self) {
        let json = match self.snapshot().to_json() {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize snapshot: {}", e);
                return;
            }
        };
        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(json) {
                    warn!("Failed to copy to clipboard: {}", e);
                } else {
                    info!("Frame snapshot copied to clipboard");
                    // Keep clipboard alive for a moment so clipboard managers can capture it
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
            Err(e) => {
                warn!("Failed to access clipboard: {}", e);
            }
        }
    }

    fn save_snapshot(&self) {
        match self.snapshot().save_to_file(&self.snapshot_path) {
            Ok(()) => info!("Frame snapshot written to {}", self.snapshot_path),
            Err(e) => error!("Failed to write {}: {}", self.snapshot_path, e),
        }
    }

    fn draw(&self) {
        clear_background(self.background);
        draw_frame(&mut WindowSurface, &self.scene, &self.rays, &self.style);

        if self.show_hud {
            let settings = self.sweep.settings();
            let blocked = self.rays.iter().filter(|r| r.is_blocked()).count();
            let lines = [
                format!("Viewpoint: ({:.0}, {:.0})  FPS: {}", self.origin.x, self.origin.y, get_fps()),
                format!(
                    "Walls: {}  Rays: {} ({} blocked)",
                    self.scene.len(),
                    self.rays.len(),
                    blocked
                ),
                format!("Strategy: {:?}  Parallel: {}", settings.strategy, settings.parallel),
                "M: strategy  P: parallel  C: copy  S: save  H: hud  Esc: close".to_string(),
            ];
            for (i, line) in lines.iter().enumerate() {
                draw_text(line, 10.0, 20.0 + i as f32 * 20.0, 20.0, WHITE);
            }
        }
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let (config, source) = loaded_config();
    logging::init(&config.logging);

    match source {
        ConfigSource::File(path) => info!("Loaded configuration from {}", path.display()),
        ConfigSource::Missing(path) => info!("No {} found, using default configuration", path.display()),
        ConfigSource::Invalid(path, e) => {
            warn!("Failed to parse {}: {}", path.display(), e);
            warn!("Using default configuration");
        }
    }

    let scene = match config.build_scene() {
        Ok(scene) => scene,
        Err(e) => {
            error!("Invalid wall list: {}", e);
            return;
        }
    };
    let sweep = match config.build_sweep() {
        Ok(sweep) => sweep,
        Err(e) => {
            error!("{}", e);
            return;
        }
    };
    info!("{} walls, {} rays per frame", scene.len(), sweep.ray_count());

    let bg = config.visual.background;
    let mut state = VisState {
        scene,
        sweep,
        style: config.visual.style(),
        background: to_color(bg),
        show_hud: config.visual.show_hud,
        snapshot_path: config.snapshot.path.clone(),
        origin: Vec2::ZERO,
        rays: Vec::new(),
    };

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }
        if is_key_pressed(KeyCode::M) {
            state.toggle_strategy();
        }
        if is_key_pressed(KeyCode::P) {
            state.toggle_parallel();
        }
        if is_key_pressed(KeyCode::H) {
            state.show_hud = !state.show_hud;
        }

        state.update(&MouseInput);

        if is_key_pressed(KeyCode::C) {
            state.copy_to_clipboard();
        }
        if is_key_pressed(KeyCode::S) {
            state.save_snapshot();
        }

        state.draw();

        next_frame().await
    }
}
