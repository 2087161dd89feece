use arboard::Clipboard;
use gemscout::snapshot::MapSnapshot;
use gemscout::{BitGrid, Config, VisibilityEngine};
use log::{info, warn};
use macroquad::prelude::*;

/// Visualization state
struct ViewerState {
    walls: BitGrid,
    /// Floors uncovered so far in exploration mode
    seen: BitGrid,
    viewer: (i32, i32),
    radius: i32,
    exploring: bool,
    engine: VisibilityEngine,
    visible: BitGrid,
    cell_size: f32,
    background: Color,
    snapshot_path: String,
}

impl ViewerState {
    fn new(config: &Config) -> Self {
        let width = config.visual.grid_width;
        let height = config.visual.grid_height;

        let mut state = ViewerState {
            walls: BitGrid::new(width, height),
            seen: BitGrid::new(width, height),
            viewer: (width / 2, height / 2),
            radius: config.vision.default_radius,
            exploring: false,
            engine: VisibilityEngine::with_epsilon(width, height, config.vision.epsilon),
            visible: BitGrid::new(width, height),
            cell_size: config.visual.cell_size,
            background: Color::from_rgba(
                config.visual.background_r,
                config.visual.background_g,
                config.visual.background_b,
                255,
            ),
            snapshot_path: config.visual.snapshot_path.clone(),
        };
        state.update_visible();
        state
    }

    fn width(&self) -> i32 {
        self.walls.width()
    }

    fn height(&self) -> i32 {
        self.walls.height()
    }

    /// Floors the engine may treat as known
    fn discovered(&self) -> BitGrid {
        let mut discovered = BitGrid::new(self.width(), self.height());
        for y in 0..self.height() {
            for x in 0..self.width() {
                if !self.walls.get(x, y) && (!self.exploring || self.seen.get(x, y)) {
                    discovered.set(x, y);
                }
            }
        }
        discovered
    }

    fn update_visible(&mut self) {
        let discovered = self.discovered();
        let (x, y) = self.viewer;
        match self
            .engine
            .visible_from(x, y, self.radius, &self.walls, &discovered)
        {
            Ok(visible) => self.visible = visible,
            Err(e) => warn!("visibility query failed: {}", e),
        }

        if self.exploring {
            for (vx, vy) in &self.visible {
                if !self.walls.get(vx, vy) {
                    self.seen.set(vx, vy);
                }
            }
        }
    }

    /// Walls can be removed here, which the engine's cache does not expect
    fn reset_knowledge(&mut self) {
        self.engine.clear_cache();
        self.seen = BitGrid::new(self.width(), self.height());
    }

    fn handle_click(&mut self, mouse_x: f32, mouse_y: f32) {
        let grid_x = (mouse_x / self.cell_size) as i32;
        let grid_y = (mouse_y / self.cell_size) as i32;

        if !self.walls.in_bounds(grid_x, grid_y) {
            return;
        }

        // Left click: toggle wall
        if is_mouse_button_pressed(MouseButton::Left) {
            if (grid_x, grid_y) == self.viewer {
                return;
            }
            let mut walls = BitGrid::new(self.width(), self.height());
            let removing = self.walls.get(grid_x, grid_y);
            for (x, y) in &self.walls {
                if !(removing && (x, y) == (grid_x, grid_y)) {
                    walls.set(x, y);
                }
            }
            if !removing {
                walls.set(grid_x, grid_y);
            }
            self.walls = walls;
            self.reset_knowledge();
            self.update_visible();
        }
        // Right click: move viewer
        else if is_mouse_button_pressed(MouseButton::Right) && !self.walls.get(grid_x, grid_y) {
            self.viewer = (grid_x, grid_y);
            self.update_visible();
        }
    }

    fn grid_to_string(&self) -> String {
        let mut result = String::new();

        for y in 0..self.height() {
            for x in 0..self.width() {
                let symbol = if (x, y) == self.viewer {
                    's' // Viewer position
                } else if self.walls.get(x, y) {
                    '■' // Wall
                } else if self.visible.get(x, y) {
                    'o' // Visible floor
                } else if self.exploring && !self.seen.get(x, y) {
                    '?' // Never seen
                } else {
                    '□' // Hidden floor
                };
                result.push(symbol);
            }
            result.push('\n');
        }

        result
    }

    fn copy_to_clipboard(&self) {
        let grid_string = self.grid_to_string();
        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(grid_string) {
                    warn!("Failed to copy to clipboard: {}", e);
                } else {
                    info!("Grid layout copied to clipboard");
                    // Keep clipboard alive for a moment so clipboard managers can capture it
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
            Err(e) => warn!("Failed to access clipboard: {}", e),
        }
    }

    fn save_snapshot(&self) {
        let snapshot = MapSnapshot::capture(&self.walls, &self.discovered(), self.viewer, self.radius);
        match snapshot.save_to_file(&self.snapshot_path) {
            Ok(()) => info!("Saved map to {}", self.snapshot_path),
            Err(e) => warn!("Failed to save map: {}", e),
        }
    }

    fn load_snapshot(&mut self) {
        let snapshot = match MapSnapshot::load_from_file(&self.snapshot_path) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Failed to load map: {}", e);
                return;
            }
        };
        if snapshot.width != self.width() || snapshot.height != self.height() {
            warn!(
                "Snapshot is {}x{}, viewer grid is {}x{}",
                snapshot.width,
                snapshot.height,
                self.width(),
                self.height()
            );
            return;
        }

        let (walls, discovered) = snapshot.restore();
        self.walls = walls;
        self.reset_knowledge();
        self.seen = discovered;
        if self.walls.in_bounds(snapshot.viewer.0, snapshot.viewer.1) {
            self.viewer = snapshot.viewer;
        }
        self.radius = snapshot.radius.max(1);
        self.update_visible();
        info!("Loaded map from {}", self.snapshot_path);
    }

    fn handle_keys(&mut self) {
        if is_key_pressed(KeyCode::C) {
            self.copy_to_clipboard();
        }
        if is_key_pressed(KeyCode::S) {
            self.save_snapshot();
        }
        if is_key_pressed(KeyCode::L) {
            self.load_snapshot();
        }
        if is_key_pressed(KeyCode::U) {
            self.exploring = !self.exploring;
            self.reset_knowledge();
            self.update_visible();
        }
        if is_key_pressed(KeyCode::Equal) || is_key_pressed(KeyCode::KpAdd) {
            self.radius += 1;
            self.update_visible();
        }
        if (is_key_pressed(KeyCode::Minus) || is_key_pressed(KeyCode::KpSubtract)) && self.radius > 1 {
            self.radius -= 1;
            self.update_visible();
        }
    }

    fn draw(&self) {
        clear_background(self.background);

        for y in 0..self.height() {
            for x in 0..self.width() {
                let px = x as f32 * self.cell_size;
                let py = y as f32 * self.cell_size;

                let color = if (x, y) == self.viewer {
                    BLUE
                } else if self.walls.get(x, y) {
                    if self.visible.get(x, y) || !self.exploring || self.seen.get(x, y) {
                        RED
                    } else {
                        Color::from_rgba(90, 40, 40, 255)
                    }
                } else if self.visible.get(x, y) {
                    Color::from_rgba(100, 200, 100, 255)
                } else if self.exploring && !self.seen.get(x, y) {
                    Color::from_rgba(35, 35, 45, 255)
                } else {
                    Color::from_rgba(60, 60, 60, 255)
                };

                draw_rectangle(px, py, self.cell_size - 1.0, self.cell_size - 1.0, color);
            }
        }

        let info = format!(
            "Viewer: ({}, {})  radius {}  visible {}  cached origins {}{}",
            self.viewer.0,
            self.viewer.1,
            self.radius,
            self.visible.count(),
            self.engine.cached_origins(),
            if self.exploring { "  [exploring]" } else { "" }
        );
        let help = "Left: toggle wall  Right: move viewer  +/-: radius  U: exploration  C: copy  S/L: save/load  Esc: quit";
        let text_y = self.height() as f32 * self.cell_size + 20.0;
        draw_text(&info, 10.0, text_y, 20.0, WHITE);
        draw_text(help, 10.0, text_y + 22.0, 18.0, GRAY);
    }
}

fn window_conf() -> Conf {
    let config = Config::load();
    let visual = &config.visual;
    Conf {
        window_title: visual.window_title.clone(),
        window_width: (visual.grid_width as f32 * visual.cell_size) as i32 + 1,
        window_height: (visual.grid_height as f32 * visual.cell_size) as i32 + 60,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    let config = Config::load();
    let mut state = ViewerState::new(&config);

    loop {
        if is_mouse_button_pressed(MouseButton::Left) || is_mouse_button_pressed(MouseButton::Right) {
            let (mouse_x, mouse_y) = mouse_position();
            state.handle_click(mouse_x, mouse_y);
        }

        state.handle_keys();

        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        state.draw();

        next_frame().await
    }
}
