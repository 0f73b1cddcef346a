//! Replays a recorded pointer session against an artboard's resize frame.
//!
//! ```text
//! draftboard-replay session.json
//! ```
//!
//! The script is JSON:
//! ```json
//! {
//!   "config": { "min_size": 40 },
//!   "artboard": { "name": "Home", "rect": { "x0": 0, "y0": 0, "x1": 100, "y1": 100 } },
//!   "events": [
//!     { "type": "down", "position": [2, 2] },
//!     { "type": "move", "position": [-8, -8] },
//!     { "type": "up", "position": [-8, -8] }
//!   ]
//! }
//! ```
//! The final artboard is printed to stdout as JSON.

use draftboard_core::{Artboard, FrameConfig, HandleFrame, PointerEvent, Scene};
use serde::Deserialize;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, thiserror::Error)]
enum ReplayError {
    #[error("usage: draftboard-replay <script.json>")]
    Usage,
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid script: {0}")]
    Script(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] draftboard_core::ConfigError),
    #[error("artboard was removed during replay")]
    MissingArtboard,
}

/// Artboard fields a script may override.
#[derive(Debug, Deserialize)]
struct ArtboardSpec {
    #[serde(default = "default_name")]
    name: String,
    rect: Option<kurbo::Rect>,
    #[serde(default)]
    position: kurbo::Point,
}

fn default_name() -> String {
    "Artboard".to_string()
}

#[derive(Debug, Deserialize)]
struct Script {
    #[serde(default)]
    config: FrameConfig,
    artboard: Option<ArtboardSpec>,
    #[serde(default)]
    events: Vec<PointerEvent>,
}

fn build_artboard(spec: Option<ArtboardSpec>) -> Artboard {
    let Some(spec) = spec else {
        return Artboard::default();
    };
    let artboard = Artboard::new(spec.name).with_position(spec.position);
    match spec.rect {
        Some(rect) => artboard.with_rect(rect),
        None => artboard,
    }
}

fn replay(script: Script) -> Result<Artboard, ReplayError> {
    script.config.validate()?;

    let mut scene = Scene::new();
    let id = scene.insert(build_artboard(script.artboard));

    let mut frame = HandleFrame::new(script.config);
    let artboard = scene.get_mut(id).ok_or(ReplayError::MissingArtboard)?;
    frame.attach(id, artboard);

    for (index, event) in script.events.into_iter().enumerate() {
        let consumed = frame.handle_pointer_event(event, &mut scene);
        log::trace!("Event {} {:?} consumed: {}", index, event, consumed);
    }
    log::info!("Replay finished with frame at {:?}", frame.scene_rect());

    scene.remove(id).ok_or(ReplayError::MissingArtboard)
}

fn run() -> Result<(), ReplayError> {
    let path = std::env::args_os().nth(1).map(PathBuf::from).ok_or(ReplayError::Usage)?;
    let json = std::fs::read_to_string(&path).map_err(|source| ReplayError::Read {
        path: path.clone(),
        source,
    })?;
    let script: Script = serde_json::from_str(&json)?;
    log::info!("Replaying {} events from {}", script.events.len(), path.display());

    let artboard = replay(script)?;
    println!("{}", serde_json::to_string_pretty(&artboard)?);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replay_top_left_drag() {
        let script: Script = serde_json::from_str(
            r#"{
                "artboard": { "name": "Home", "rect": { "x0": 0, "y0": 0, "x1": 92, "y1": 92 }, "position": [4, 4] },
                "events": [
                    { "type": "down", "position": [2, 2] },
                    { "type": "move", "position": [-8, -8] },
                    { "type": "up", "position": [-8, -8] }
                ]
            }"#,
        )
        .unwrap();

        let artboard = replay(script).unwrap();
        assert_eq!(artboard.name, "Home");
        assert!((artboard.rect.width() - 102.0).abs() < 1e-9);
        assert!((artboard.rect.height() - 102.0).abs() < 1e-9);
        assert!((artboard.position.x + 6.0).abs() < 1e-9);
        assert!((artboard.position.y + 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_replay_defaults_without_events() {
        let script: Script = serde_json::from_str("{}").unwrap();
        let artboard = replay(script).unwrap();
        assert_eq!(artboard.rect, kurbo::Rect::new(0.0, 0.0, 375.0, 667.0));
    }

    #[test]
    fn test_replay_rejects_invalid_config() {
        let script: Script = serde_json::from_str(r#"{ "config": { "min_size": -1 } }"#).unwrap();
        assert!(matches!(replay(script), Err(ReplayError::Config(_))));
    }
}
