// Common test utilities for visibility scenario tests
#![allow(dead_code)]

use gemscout::BitGrid;

/// A parsed visibility scenario
///
/// Grid symbols:
/// - `s` viewer (discovered floor, expected visible)
/// - `■` wall
/// - `□` discovered floor, expected hidden
/// - `o` discovered floor, expected visible
/// - `?` undiscovered floor, expected hidden
/// - `!` undiscovered floor, expected visible
#[derive(Clone, Debug)]
pub struct Scenario {
    pub walls: BitGrid,
    pub discovered: BitGrid,
    pub viewer: (i32, i32),
    pub expected: BitGrid,
}

impl Scenario {
    pub fn width(&self) -> i32 {
        self.walls.width()
    }

    pub fn height(&self) -> i32 {
        self.walls.height()
    }
}

/// Parse a scenario from a text grid
pub fn parse_scenario(text: &str) -> Scenario {
    let lines: Vec<&str> = text
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();
    assert!(!lines.is_empty(), "empty scenario");

    let width = lines[0].chars().count() as i32;
    let height = lines.len() as i32;

    let mut walls = BitGrid::new(width, height);
    let mut discovered = BitGrid::new(width, height);
    let mut expected = BitGrid::new(width, height);
    let mut viewer = None;

    for (y, line) in lines.iter().enumerate() {
        assert_eq!(line.chars().count() as i32, width, "ragged row {}", y);
        for (x, ch) in line.chars().enumerate() {
            let (x, y) = (x as i32, y as i32);
            match ch {
                's' => {
                    viewer = Some((x, y));
                    discovered.set(x, y);
                    expected.set(x, y);
                }
                '■' => walls.set(x, y),
                '□' => discovered.set(x, y),
                'o' => {
                    discovered.set(x, y);
                    expected.set(x, y);
                }
                '?' => {}
                '!' => expected.set(x, y),
                other => panic!("unknown symbol {:?} at ({}, {})", other, x, y),
            }
        }
    }

    Scenario {
        walls,
        discovered,
        viewer: viewer.expect("no viewer 's' in scenario"),
        expected,
    }
}

fn remap(grid: &BitGrid, map: impl Fn(i32, i32) -> (i32, i32)) -> BitGrid {
    let mut out = BitGrid::new(grid.width(), grid.height());
    for (x, y) in grid {
        let (nx, ny) = map(x, y);
        out.set(nx, ny);
    }
    out
}

fn transform(scenario: &Scenario, map: impl Fn(i32, i32) -> (i32, i32)) -> Scenario {
    Scenario {
        walls: remap(&scenario.walls, &map),
        discovered: remap(&scenario.discovered, &map),
        viewer: map(scenario.viewer.0, scenario.viewer.1),
        expected: remap(&scenario.expected, &map),
    }
}

/// Flip scenario horizontally
pub fn flip_horizontal(scenario: &Scenario) -> Scenario {
    let w = scenario.width();
    transform(scenario, |x, y| (w - 1 - x, y))
}

/// Flip scenario vertically
pub fn flip_vertical(scenario: &Scenario) -> Scenario {
    let h = scenario.height();
    transform(scenario, |x, y| (x, h - 1 - y))
}

/// Flip scenario both horizontally and vertically
pub fn flip_both(scenario: &Scenario) -> Scenario {
    let (w, h) = (scenario.width(), scenario.height());
    transform(scenario, |x, y| (w - 1 - x, h - 1 - y))
}

/// The scenario and its three mirror images, labelled
pub fn with_flips(scenario: &Scenario) -> Vec<(&'static str, Scenario)> {
    vec![
        ("original", scenario.clone()),
        ("horizontal", flip_horizontal(scenario)),
        ("vertical", flip_vertical(scenario)),
        ("both", flip_both(scenario)),
    ]
}

/// Print the expected and actual grids side by side when they differ
pub fn diff(expected: &BitGrid, actual: &BitGrid) -> String {
    let mut out = String::new();
    for y in 0..expected.height() {
        for x in 0..expected.width() {
            out.push(if expected.get(x, y) { 'o' } else { '.' });
        }
        out.push_str("   ");
        for x in 0..actual.width() {
            out.push(match (expected.get(x, y), actual.get(x, y)) {
                (true, true) => 'o',
                (false, false) => '.',
                (true, false) => '-',
                (false, true) => '+',
            });
        }
        out.push('\n');
    }
    out
}
