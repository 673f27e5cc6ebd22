use tracing::debug;

use crate::combatant::Combatant;
use crate::config::SimConfig;
use crate::types::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub attacker: Side,
    pub victim: Side,
    pub damage: f64,
    pub force: f64,
    pub combo: u32,
    /// False when the victim's invincibility swallowed the launch.
    pub knocked_back: bool,
}

#[derive(Debug, Default)]
pub struct ContactReport {
    pub contact: bool,
    pub hits: Vec<Hit>,
}

impl ContactReport {
    pub fn events(&self) -> Vec<SimEvent> {
        let mut events = Vec::with_capacity(self.hits.len() + 1);
        if self.contact {
            events.push(SimEvent::Contact);
        }
        events.extend(self.hits.iter().map(|hit| SimEvent::Hit {
            attacker: hit.attacker,
            victim: hit.victim,
            damage: hit.damage,
            force: hit.force,
            combo: hit.combo,
        }));
        events
    }
}

/// Horizontal speed used to judge whether a body is charging in.
fn aggression(c: &Combatant, config: &SimConfig) -> f64 {
    let speed = c.velocity.x.abs();
    if c.dash.is_dashing {
        speed * config.dash_aggression_multiplier
    } else {
        speed
    }
}

/// Decide whether `attacker` lands a hit on `victim`, judged on the state both
/// had when they touched.
fn plan_hit(attacker: &Combatant, victim: &Combatant, config: &SimConfig) -> Option<(f64, f64)> {
    let charging = attacker.dash.is_dashing || aggression(attacker, config) > config.aggression_threshold;
    if !charging || victim.recovery_frames_remaining != 0 {
        return None;
    }

    let dash_scale = if attacker.dash.is_dashing {
        config.dash_knockback_multiplier
    } else {
        1.0
    };
    let force = config.base_knockback * dash_scale * (1.0 + victim.damage / config.hit_damage_scale);

    let damage_scale = if attacker.dash.is_dashing {
        config.dash_damage_bonus
    } else {
        1.0
    };
    Some((config.damage_amount * damage_scale, force))
}

fn land_hit(
    attacker: Side,
    victim: &mut Combatant,
    direction: f64,
    damage: f64,
    force: f64,
    config: &SimConfig,
) -> Hit {
    if victim.last_attacker == Some(attacker) {
        victim.combo_count += 1;
    } else {
        victim.combo_count = 1;
    }
    victim.last_attacker = Some(attacker);
    victim.combo_frames_remaining = config.combo_window_frames;

    victim.take_damage(damage, config);
    let knocked_back = victim.apply_knockback(
        Vec2::new(direction, config.knockback_vertical_bias),
        force,
        config,
    );

    debug!(
        ?attacker,
        victim = ?victim.side,
        damage,
        force,
        combo = victim.combo_count,
        total_damage = victim.damage,
        "hit"
    );

    Hit {
        attacker,
        victim: victim.side,
        damage,
        force,
        combo: victim.combo_count,
        knocked_back,
    }
}

/// Resolve body contact between the two combatants for this tick.
///
/// Contact uses the distance between centers against `2 * player_size`, a
/// circle test on square bodies. Both sides are judged independently, so two
/// charging combatants trade hits in the same tick. Overlapping bodies are
/// then pushed apart by half the overlap each.
pub fn resolve_contact(pair: &mut [Combatant; 2], config: &SimConfig) -> ContactReport {
    let [a, b] = pair;
    if a.is_dead || b.is_dead {
        return ContactReport::default();
    }

    let center_a = a.center();
    let center_b = b.center();
    let distance = center_a.distance(center_b);
    let reach = config.player_size * 2.0;
    if distance >= reach {
        return ContactReport::default();
    }

    let direction = if center_a.x < center_b.x { 1.0 } else { -1.0 };

    let a_on_b = plan_hit(a, b, config);
    let b_on_a = plan_hit(b, a, config);

    let mut hits = Vec::new();
    if let Some((damage, force)) = a_on_b {
        hits.push(land_hit(a.side, b, direction, damage, force, config));
    }
    if let Some((damage, force)) = b_on_a {
        hits.push(land_hit(b.side, a, -direction, damage, force, config));
    }

    let push = (reach - distance) / 2.0;
    if center_a.x < center_b.x {
        a.position.x -= push;
        b.position.x += push;
    } else {
        a.position.x += push;
        b.position.x -= push;
    }

    ContactReport {
        contact: true,
        hits,
    }
}
