/// Status bar text and the colours derived from level and elapsed time.

use std::time::Duration;

use super::maze::Fruit;

pub const STATUS_TEMPLATE: &str = "    LEVEL -   - FRUITS   TIME: --:--    ";

const LEVEL_AT: usize = 10;
const FRUIT_AT: usize = 14;
const MIN_TENS_AT: usize = 31;
const MIN_ONES_AT: usize = 32;
const SEC_TENS_AT: usize = 34;
const SEC_ONES_AT: usize = 35;
const LABEL_LEN: usize = 12;

/// HUD overlay state: which fruit label is showing and until when.
#[derive(Clone, Debug)]
pub struct Hud {
    label_duration: Duration,
    label: Option<(Fruit, Duration)>,
}

impl Hud {
    pub fn new(label_duration: Duration) -> Self {
        Hud { label_duration, label: None }
    }

    /// Show `fruit`'s name from `now` (elapsed game time) for the label duration.
    pub fn show_fruit(&mut self, fruit: Fruit, now: Duration) {
        self.label = Some((fruit, now + self.label_duration));
    }

    pub fn clear(&mut self) {
        self.label = None;
    }

    pub fn text(&mut self, level: u32, fruit: u32, now: Duration) -> String {
        let mut text = status_text(level, fruit, now);
        match self.label {
            Some((f, until)) if now < until => {
                text.replace_range(..LABEL_LEN, f.label());
            }
            Some(_) => self.label = None,
            None => {}
        }
        text
    }
}

/// Fill the status template with level, live fruit count and `mm:ss`.
pub fn status_text(level: u32, fruit: u32, elapsed: Duration) -> String {
    let mut bytes = STATUS_TEMPLATE.as_bytes().to_vec();
    let secs = elapsed.as_secs();
    let mins = secs / 60;

    if level >= 10 {
        bytes[LEVEL_AT] = digit((level / 10) as u64);
        bytes[LEVEL_AT + 1] = digit(level as u64);
    } else {
        bytes[LEVEL_AT] = digit(level as u64);
    }
    bytes[FRUIT_AT] = digit(fruit as u64);
    bytes[MIN_TENS_AT] = digit(mins / 10);
    bytes[MIN_ONES_AT] = digit(mins);
    bytes[SEC_TENS_AT] = digit((secs / 10) % 6);
    bytes[SEC_ONES_AT] = digit(secs);

    // only ASCII digits were substituted into an ASCII template
    String::from_utf8(bytes).unwrap_or_else(|_| STATUS_TEMPLATE.to_string())
}

fn digit(n: u64) -> u8 {
    b'0' + (n % 10) as u8
}

/// (fg, bg) palette indices for the status bar on `level`.
pub fn status_colors(level: u32) -> (u8, u8) {
    (((level * 2) % 15) as u8, ((level * 3) % 15) as u8)
}

/// 6-bit RGB for the wall colour on `level`.
pub fn wall_color(level: u32) -> (u8, u8, u8) {
    let v = level * 20;
    ((v % 64) as u8, ((v / 2) % 64) as u8, ((v / 3) % 64) as u8)
}

/// Player pulse colour; changes only on even seconds.
pub fn player_color(elapsed: Duration) -> Option<(u8, u8, u8)> {
    let secs = elapsed.as_secs();
    if secs % 2 != 0 {
        return None;
    }
    let v = ((secs % 6) * 10) as u8;
    Some((v / 3, v / 2, v))
}
