use serde::{Deserialize, Serialize};

// ── Primitives ──────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Vec2) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

pub type Frame = u64;

/// The two corners of the ring. Also used as the non-owning handle one
/// combatant keeps to the other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Red,
    Blue,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Red, Side::Blue];

    pub fn index(self) -> usize {
        match self {
            Side::Red => 0,
            Side::Blue => 1,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::Red => Side::Blue,
            Side::Blue => Side::Red,
        }
    }
}

// ── Input ───────────────────────────────────────────────────

/// Button bitmask constants.
pub mod button {
    pub const LEFT: u8 = 1;
    pub const RIGHT: u8 = 2;
    pub const JUMP: u8 = 4;
    pub const DASH: u8 = 8;
}

/// Held-button state for one combatant, sampled once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Intent {
    pub buttons: u8,
}

pub const NULL_INTENT: Intent = Intent { buttons: 0 };

impl Intent {
    pub const fn new(buttons: u8) -> Self {
        Self { buttons }
    }

    pub fn left(self) -> bool {
        self.buttons & button::LEFT != 0
    }

    pub fn right(self) -> bool {
        self.buttons & button::RIGHT != 0
    }

    pub fn jump(self) -> bool {
        self.buttons & button::JUMP != 0
    }

    pub fn dash(self) -> bool {
        self.buttons & button::DASH != 0
    }
}

// ── Stage ───────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Platform {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Strict horizontal containment, edges excluded.
    pub fn spans(&self, x: f64) -> bool {
        self.x < x && x < self.right()
    }
}

// ── Combatant state ─────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DashState {
    pub can_dash: bool,
    pub cooldown_frames_remaining: i32,
    pub is_dashing: bool,
    pub dash_frames_remaining: i32,
    /// Right = 1, Left = -1.
    pub dash_direction: i32,
    pub air_dashes_remaining: u8,
}

impl DashState {
    pub fn ready(air_dashes: u8) -> Self {
        Self {
            can_dash: true,
            cooldown_frames_remaining: 0,
            is_dashing: false,
            dash_frames_remaining: 0,
            dash_direction: 1,
            air_dashes_remaining: air_dashes,
        }
    }
}

// ── Match ───────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Menu,
    Battle,
    Pause,
    /// Reported while a finished round waits for the respawn delay.
    RoundEnd,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundWinner {
    Red,
    Blue,
    Tie,
}

impl From<Side> for RoundWinner {
    fn from(side: Side) -> Self {
        match side {
            Side::Red => RoundWinner::Red,
            Side::Blue => RoundWinner::Blue,
        }
    }
}

/// User-level commands coming from menus and hotkeys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchAction {
    StartGame,
    Pause,
    Resume,
    Cancel,
    NewMatch,
    ReturnToMenu,
}

/// Side-signals for the presentation layer (particles, sounds, banners).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SimEvent {
    Jumped { side: Side },
    DashStarted { side: Side, airborne: bool },
    Contact,
    Hit {
        attacker: Side,
        victim: Side,
        damage: f64,
        force: f64,
        combo: u32,
    },
    Fell { side: Side },
    RoundEnded { winner: RoundWinner },
    RoundStarted { round: u32 },
    MatchEnded { winner: RoundWinner },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intent_reads_bits() {
        let intent = Intent::new(button::LEFT | button::DASH);
        assert!(intent.left());
        assert!(!intent.right());
        assert!(!intent.jump());
        assert!(intent.dash());
        assert_eq!(NULL_INTENT.buttons, 0);
    }

    #[test]
    fn platform_span_excludes_edges() {
        let p = Platform {
            x: 100.0,
            y: 400.0,
            width: 50.0,
            height: 10.0,
        };
        assert!(p.spans(120.0));
        assert!(!p.spans(100.0));
        assert!(!p.spans(150.0));
    }

    #[test]
    fn side_opponent_round_trips() {
        for side in Side::BOTH {
            assert_eq!(side.opponent().opponent(), side);
        }
        assert_eq!(Side::Red.index(), 0);
        assert_eq!(Side::Blue.index(), 1);
    }

    #[test]
    fn events_serialize_tagged() {
        let json = serde_json::to_string(&SimEvent::Fell { side: Side::Blue }).unwrap();
        assert_eq!(json, r#"{"kind":"fell","side":"blue"}"#);
    }
}
