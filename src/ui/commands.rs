use crate::error::CommandError;
use crate::playback::PlaybackSpeed;
use std::path::PathBuf;

/// A console transport command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Toggle,
    Play,
    Pause,
    Seek(usize),
    StepForward,
    StepBack,
    Speed(PlaybackSpeed),
    SpeedUp,
    SpeedDown,
    Load(PathBuf),
    Status,
    Help,
    Quit,
}

/// Help text listing every console command
pub const HELP: &str = "\
commands:
  <enter>, p       play/pause
  play, pause      set transport state
  seek N, s N      jump to sample N (pauses)
  n, b             step forward/back one sample (pauses)
  speed S          0.5x, 1x, 2x, 4x (or 500/200/100/50 ms)
  +, -             faster/slower
  load PATH        replace the current log
  status           print playback state
  help, ?          this text
  q, quit          exit";

impl Command {
    /// Parse one line of console input
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "" | "p" | "toggle" => Command::Toggle,
            "play" => Command::Play,
            "pause" => Command::Pause,
            "seek" | "s" => {
                let arg = required(rest, "seek")?;
                let index = arg
                    .parse::<usize>()
                    .map_err(|_| CommandError::InvalidIndex(arg.to_string()))?;
                Command::Seek(index)
            }
            "n" | "next" => Command::StepForward,
            "b" | "back" => Command::StepBack,
            "speed" => Command::Speed(required(rest, "speed")?.parse()?),
            "+" => Command::SpeedUp,
            "-" => Command::SpeedDown,
            "load" => Command::Load(PathBuf::from(required(rest, "load")?)),
            "status" => Command::Status,
            "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(command)
    }
}

fn required<'a>(arg: &'a str, command: &'static str) -> Result<&'a str, CommandError> {
    if arg.is_empty() {
        Err(CommandError::MissingArgument(command))
    } else {
        Ok(arg)
    }
}
