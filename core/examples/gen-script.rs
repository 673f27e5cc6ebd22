//! Generates session JSON files for the headless host.
//!
//! Usage:
//!   cargo run -p sumo-core --example gen-script -- [idle|brawl|ringout] > session.json

use sumo_core::*;

/// Hard stop for scripts whose match never ends.
const MAX_FRAMES: usize = 60 * 60 * 10;

/// Hold toward the opponent, jab a dash whenever it is ready.
fn brawler(me: &Combatant, them: &Combatant) -> u8 {
    let toward = if them.position.x > me.position.x {
        button::RIGHT
    } else {
        button::LEFT
    };
    let dash = if me.dash.can_dash && me.position.distance(them.position) < 150.0 {
        button::DASH
    } else {
        0
    };
    toward | dash
}

fn policy(mode: &str, m: &Match) -> Option<ScriptFrame> {
    let [red, blue] = &m.combatants;
    let frame = match mode {
        "idle" => ScriptFrame::IDLE,
        "brawl" => ScriptFrame::inputs(brawler(red, blue), brawler(blue, red)),
        // Red keeps walking off the left edge
        "ringout" => ScriptFrame::inputs(button::LEFT, 0),
        _ => return None,
    };
    Some(frame)
}

fn main() {
    let mode = std::env::args().nth(1).unwrap_or_else(|| "idle".to_string());

    let config = SimConfig::default();
    let mut m = Match::new(config.clone()).unwrap();

    // Build the script by playing it, so the policies can react to positions
    let mut script = vec![ScriptFrame::action(MatchAction::StartGame)];
    m.handle_action(MatchAction::StartGame).unwrap();
    m.step(ScriptFrame::IDLE.inputs);

    while m.game_state() != GameState::GameOver && script.len() < MAX_FRAMES {
        let Some(frame) = policy(&mode, &m) else {
            eprintln!("Unknown mode: {}. Use 'idle', 'brawl', or 'ringout'", mode);
            std::process::exit(1);
        };
        m.step(frame.inputs);
        script.push(frame);
    }

    let view = MatchView::of(&m);
    eprintln!("=== Sim result ({} mode) ===", mode);
    eprintln!("Frames: {}", view.frame);
    eprintln!("State: {:?}", view.state);
    eprintln!("Winner: {:?}", view.match_winner);
    eprintln!(
        "Points: red={}, blue={}",
        view.combatants[0].points, view.combatants[1].points
    );

    let session = Session { config, script };
    println!("{}", serde_json::to_string(&session).unwrap());
}
