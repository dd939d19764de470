//! Page-facing views of the session
//!
//! The page owns the dialogs and the 3D scene; these types hold exactly what
//! it needs to draw them.

use glam::Vec3;
use serde::Serialize;

use crate::sim::{FallingKind, GameEvent, GamePhase, GameSession};

/// In-game stats overlay
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    /// Overlay shown only during a run
    pub visible: bool,
    pub paused: bool,
    pub timer_secs: f64,
    pub spawn_interval_secs: f64,
    pub collected: u32,
}

impl Hud {
    pub fn from_session(session: &GameSession, now_ms: f64) -> Self {
        Self {
            visible: session.phase.in_progress(),
            paused: session.phase == GamePhase::Paused,
            timer_secs: session.elapsed_secs(now_ms),
            spawn_interval_secs: session.spawner.interval_ms / 1000.0,
            collected: session.collected,
        }
    }

    /// Stats block markup
    pub fn stats_html(&self) -> String {
        format!(
            "Timer: {:.1}<br>Rain spawning: {:.2}s<br>Cats collected: {}",
            self.timer_secs, self.spawn_interval_secs, self.collected
        )
    }

    /// Pause button icon (shows the action the button performs)
    pub fn pause_icon(&self) -> &'static str {
        if self.paused { "/resume.svg" } else { "/pause.svg" }
    }
}

/// Contents of the game-over dialog
#[derive(Debug, Clone, PartialEq)]
pub struct GameOverSummary {
    pub survived_secs: f64,
    pub collected: u32,
    pub new_record: bool,
    pub best_secs: f64,
}

impl GameOverSummary {
    pub fn from_event(event: &GameEvent) -> Option<Self> {
        match *event {
            GameEvent::GameOver {
                survived_secs,
                collected,
                new_record,
                best_secs,
            } => Some(Self {
                survived_secs,
                collected,
                new_record,
                best_secs,
            }),
            _ => None,
        }
    }

    pub fn html(&self) -> String {
        let footer = if self.new_record {
            "New record!".to_string()
        } else {
            format!("Your highscore: {:.1}s", self.best_secs)
        };
        format!(
            "You survived for <b>{:.1}</b> seconds and collected <b>{}</b> cats.<br><br><b>{}</b>",
            self.survived_secs, self.collected, footer
        )
    }
}

/// A falling entity as the renderer sees it
#[derive(Debug, Clone, Serialize)]
pub struct EntitySnapshot {
    pub id: u32,
    pub kind: FallingKind,
    pub position: Vec3,
    pub rotation: Vec3,
}

/// Scene positions for one frame
#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub player: Vec3,
    pub camera: Vec3,
    pub entities: Vec<EntitySnapshot>,
}

impl RenderSnapshot {
    pub fn from_session(session: &GameSession) -> Self {
        Self {
            player: session.player.pos.extend(0.0),
            camera: session.camera.pos,
            entities: session
                .entities
                .iter()
                .map(|e| EntitySnapshot {
                    id: e.id,
                    kind: e.kind,
                    position: e.pos.extend(0.0),
                    rotation: e.rotation,
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            log::warn!("Failed to serialize render snapshot: {e}");
            String::from("{}")
        })
    }
}
