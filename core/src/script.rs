use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::types::{Intent, MatchAction, NULL_INTENT};

/// One tick of scripted play: an optional menu action taken before the tick,
/// then the held buttons for Red and Blue.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptFrame {
    pub action: Option<MatchAction>,
    pub inputs: [Intent; 2],
}

impl ScriptFrame {
    pub const IDLE: ScriptFrame = ScriptFrame {
        action: None,
        inputs: [NULL_INTENT; 2],
    };

    pub fn inputs(red: u8, blue: u8) -> Self {
        Self {
            action: None,
            inputs: [Intent::new(red), Intent::new(blue)],
        }
    }

    pub fn action(action: MatchAction) -> Self {
        Self {
            action: Some(action),
            ..Self::IDLE
        }
    }
}

/// Input to the headless host: tunables plus a per-tick script.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    pub config: SimConfig,
    pub script: Vec<ScriptFrame>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_session_json_parses() {
        let json = r#"{
            "config": { "max_points": 1 },
            "script": [
                { "action": "start_game" },
                { "inputs": [2, 1] },
                {}
            ]
        }"#;
        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.config.max_points, 1);
        assert_eq!(session.config.tick_rate, 60);
        assert_eq!(session.script[0], ScriptFrame::action(MatchAction::StartGame));
        assert_eq!(session.script[1], ScriptFrame::inputs(2, 1));
        assert_eq!(session.script[2], ScriptFrame::IDLE);
    }
}
