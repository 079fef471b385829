use crate::session::Session;
use crate::settings::OutputFormat;
use crate::ui::commands::{Command, HELP};
use crate::ui::frame::Frame;
use tracing::warn;

/// What the console should do after a command
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// State may have changed, draw a frame
    Render,
    /// Show a message instead of a frame
    Message(String),
    Quit,
}

/// Apply one console command to the session
pub fn apply(session: &mut Session, command: Command) -> Outcome {
    match command {
        Command::Toggle => session.toggle(),
        Command::Play => session.play(),
        Command::Pause => session.pause(),
        Command::Seek(index) => session.scrub(index),
        Command::StepForward => session.step_forward(),
        Command::StepBack => session.step_back(),
        Command::Speed(speed) => session.set_speed(speed),
        Command::SpeedUp => session.set_speed(session.speed().faster()),
        Command::SpeedDown => session.set_speed(session.speed().slower()),
        Command::Load(path) => match session.load_file(&path) {
            Ok(dropped) => {
                return Outcome::Message(format!(
                    "loaded {} ({} samples, {} rows dropped)",
                    path.display(),
                    session.series().len(),
                    dropped
                ))
            }
            Err(e) => {
                warn!("Load failed: {:#}", e);
                return Outcome::Message(format!("load failed: {:#}", e));
            }
        },
        Command::Status => return Outcome::Message(status(session)),
        Command::Help => return Outcome::Message(HELP.to_string()),
        Command::Quit => return Outcome::Quit,
    }

    Outcome::Render
}

/// Render the current frame in the chosen format
pub fn render(session: &Session, format: OutputFormat) -> String {
    let frame = Frame::new(session.state(), session.series().len(), session.current_sample());
    match format {
        OutputFormat::Text => frame.to_text(),
        OutputFormat::Json => frame.to_json().unwrap_or_else(|e| {
            warn!("Failed to serialize frame: {}", e);
            String::new()
        }),
    }
}

fn status(session: &Session) -> String {
    let state = session.state();
    let span = session
        .series()
        .time_span()
        .map(|(start, end)| format!("{:.2}s..{:.2}s", start, end))
        .unwrap_or_else(|| "empty".to_string());

    format!(
        "{} samples ({}), index {}, {}, speed {}",
        session.series().len(),
        span,
        state.current_index,
        if state.is_playing { "playing" } else { "paused" },
        session.speed()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::PlaybackSpeed;

    fn session() -> Session {
        let mut session = Session::new();
        session.load_text("time,speed\n0,10\n0.5,20\n1,30\n");
        session
    }

    #[test]
    fn test_transport_commands() {
        let mut s = session();
        assert_eq!(apply(&mut s, Command::Toggle), Outcome::Render);
        assert!(s.is_playing());
        apply(&mut s, Command::Seek(2));
        assert!(!s.is_playing());
        assert_eq!(s.state().current_index, 2);
        apply(&mut s, Command::StepBack);
        assert_eq!(s.state().current_index, 1);
    }

    #[test]
    fn test_speed_commands() {
        let mut s = session();
        apply(&mut s, Command::SpeedUp);
        assert_eq!(s.speed(), PlaybackSpeed::Double);
        apply(&mut s, Command::Speed(PlaybackSpeed::Half));
        apply(&mut s, Command::SpeedDown);
        assert_eq!(s.speed(), PlaybackSpeed::Half);
    }

    #[test]
    fn test_status_message() {
        let mut s = session();
        match apply(&mut s, Command::Status) {
            Outcome::Message(msg) => {
                assert!(msg.starts_with("3 samples (0.00s..1.00s), index 0, paused"), "{msg}")
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(apply(&mut s, Command::Quit), Outcome::Quit);
    }

    #[test]
    fn test_failed_load_is_reported() {
        let mut s = session();
        let dir = tempfile::tempdir().unwrap();
        let outcome = apply(&mut s, Command::Load(dir.path().join("missing.csv")));
        assert!(matches!(outcome, Outcome::Message(msg) if msg.starts_with("load failed")));
        assert_eq!(s.series().len(), 3);
    }

    #[test]
    fn test_render_formats() {
        let s = session();
        assert!(render(&s, OutputFormat::Text).starts_with("[0/2] ||"));
        let json: serde_json::Value = serde_json::from_str(&render(&s, OutputFormat::Json)).unwrap();
        assert_eq!(json["total"], 3);
        assert_eq!(json["sample"]["speed"], 10.0);
    }
}
