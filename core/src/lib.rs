pub mod combat;
pub mod combatant;
pub mod config;
pub mod constants;
pub mod error;
pub mod init;
pub mod script;
pub mod state;
pub mod step;
pub mod types;
pub mod view;

pub use combat::{resolve_contact, ContactReport, Hit};
pub use combatant::Combatant;
pub use config::SimConfig;
pub use error::{ConfigError, MatchError};
pub use init::*;
pub use script::{ScriptFrame, Session};
pub use state::Match;
pub use types::*;
pub use view::{format_clock, CombatantView, MatchView};
