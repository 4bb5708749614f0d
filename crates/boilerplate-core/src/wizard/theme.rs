//! Immutable rendering configuration: colours, gradient ramp, progress bar

use colored::{Color, Colorize};

const PROGRESS_FULL_CHAR: &str = "█";
const PROGRESS_EMPTY_CHAR: &str = "░";

/// Built once at startup and passed by reference to the renderer
#[derive(Debug, Clone)]
pub struct Theme {
    pub keyword: Color,
    pub subtle: Color,
    pub ticks: Color,
    pub checkbox: Color,
    pub dot: Color,
    pub error: Color,
    /// One colour per progress bar cell
    pub ramp: Vec<Color>,
    pub left_margin: usize,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(71)
    }
}

impl Theme {
    /// Default palette with a `bar_width`-cell purple-to-green ramp
    pub fn new(bar_width: usize) -> Self {
        Self {
            keyword: rgb(0xff87af),
            subtle: rgb(0x626262),
            ticks: rgb(0x5fd7af),
            checkbox: rgb(0xff87d7),
            dot: rgb(0x303030),
            error: Color::Red,
            ramp: make_ramp(0xb14fff, 0x00ffa3, bar_width),
            left_margin: 2,
        }
    }

    pub fn bar_width(&self) -> usize {
        self.ramp.len()
    }

    /// Gradient bar followed by the rounded percentage, e.g. `███░░  40`
    pub fn progress_bar(&self, percent: f64) -> String {
        let percent = percent.clamp(0.0, 1.0);
        let width = self.bar_width();
        let full = ((width as f64) * percent).round() as usize;

        let mut bar = String::new();
        for color in self.ramp.iter().take(full) {
            bar.push_str(&PROGRESS_FULL_CHAR.color(*color).to_string());
        }
        let empty = PROGRESS_EMPTY_CHAR.color(self.subtle).to_string();
        bar.push_str(&empty.repeat(width - full.min(width)));

        format!("{} {:>3.0}", bar, (percent * 100.0).round())
    }

    /// ` • ` separator used in help lines
    pub fn dot(&self) -> String {
        " • ".color(self.dot).to_string()
    }
}

fn rgb(hex: u32) -> Color {
    Color::TrueColor {
        r: ((hex >> 16) & 0xff) as u8,
        g: ((hex >> 8) & 0xff) as u8,
        b: (hex & 0xff) as u8,
    }
}

/// Linear blend from `from` to `to` in `steps` colours
fn make_ramp(from: u32, to: u32, steps: usize) -> Vec<Color> {
    let channels = |hex: u32| {
        [
            ((hex >> 16) & 0xff) as f64,
            ((hex >> 8) & 0xff) as f64,
            (hex & 0xff) as f64,
        ]
    };
    let (a, b) = (channels(from), channels(to));

    (0..steps)
        .map(|i| {
            let t = i as f64 / steps as f64;
            let mix = |x: f64, y: f64| (x + (y - x) * t).round() as u8;
            Color::TrueColor {
                r: mix(a[0], b[0]),
                g: mix(a[1], b[1]),
                b: mix(a[2], b[2]),
            }
        })
        .collect()
}
