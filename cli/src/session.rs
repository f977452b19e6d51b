use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::{Context, Result};
use mines_core::{Coord, Coord2, Minefield, RandomLayoutGenerator};
use thiserror::Error;

use crate::clock::{GameClock, format_elapsed};
use crate::records::{Record, RecordStore};
use crate::render::render;
use crate::settings::Settings;

const HELP: &str = "\
Commands:
  o X Y, open X Y   open the cell in column X, row Y
  f X Y, flag X Y   put or remove a flag
  r, records        list recorded wins
  n, restart        abandon this game and start a new one
  h, help           show this help
  q, quit           leave";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Open(Coord2),
    Flag(Coord2),
    Records,
    Restart,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command {0:?}, type `help` for a list")]
    Unknown(String),
    #[error("Expected coordinates: {0} X Y")]
    MissingCoords(&'static str),
    #[error("Invalid coordinate {0:?}")]
    BadCoord(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(word) = words.next() else {
            return Err(CommandError::Empty);
        };

        match word.to_ascii_lowercase().as_str() {
            "o" | "open" => Ok(Self::Open(parse_coords(words, "open")?)),
            "f" | "flag" => Ok(Self::Flag(parse_coords(words, "flag")?)),
            "r" | "records" => Ok(Self::Records),
            "n" | "new" | "restart" => Ok(Self::Restart),
            "h" | "help" | "?" => Ok(Self::Help),
            "q" | "quit" | "exit" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_owned())),
        }
    }
}

fn parse_coords<'a>(
    mut words: impl Iterator<Item = &'a str>,
    command: &'static str,
) -> Result<Coord2, CommandError> {
    let (Some(x), Some(y)) = (words.next(), words.next()) else {
        return Err(CommandError::MissingCoords(command));
    };
    let parse = |word: &str| {
        word.parse::<Coord>()
            .map_err(|_| CommandError::BadCoord(word.to_owned()))
    };
    Ok((parse(x)?, parse(y)?))
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Flow {
    Restart,
    Quit,
}

/// Plays games one after another until the player quits or input ends.
pub struct Session<R, W> {
    settings: Settings,
    records: RecordStore,
    input: R,
    output: W,
    games: u64,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(settings: Settings, input: R, output: W) -> Self {
        let records = RecordStore::new(settings.records.clone());
        Self {
            settings,
            records,
            input,
            output,
            games: 0,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn run(&mut self) -> Result<()> {
        loop {
            let seed = self.next_seed();
            let config = self.settings.config;
            log::info!(
                "New {}x{} game with {} mines, seed {}",
                config.width(),
                config.height(),
                config.mines,
                seed
            );

            // every game gets a fresh field, a finished one is never reused
            let mut field = Minefield::generate(config, RandomLayoutGenerator::new(seed))?;
            let mut clock = GameClock::start();

            match self.play(&mut field, &mut clock)? {
                Flow::Restart => continue,
                Flow::Quit => return Ok(()),
            }
        }
    }

    fn next_seed(&mut self) -> u64 {
        let seed = match self.settings.seed {
            Some(seed) => seed.wrapping_add(self.games),
            None => rand::random(),
        };
        self.games += 1;
        seed
    }

    fn play(&mut self, field: &mut Minefield, clock: &mut GameClock) -> Result<Flow> {
        loop {
            self.show(field, clock)?;
            let Some(line) = self.prompt("> ")? else {
                return Ok(Flow::Quit);
            };

            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(CommandError::Empty) => continue,
                Err(err) => {
                    writeln!(self.output, "{err}")?;
                    continue;
                }
            };
            log::debug!("command: {:?}", command);

            let moved = match command {
                Command::Open(coords) => field.open(coords).map(|outcome| outcome.has_update()),
                Command::Flag(coords) => field.flag(coords).map(|outcome| outcome.has_update()),
                Command::Records => {
                    self.show_records()?;
                    continue;
                }
                Command::Restart => return Ok(Flow::Restart),
                Command::Help => {
                    writeln!(self.output, "{HELP}")?;
                    continue;
                }
                Command::Quit => return Ok(Flow::Quit),
            };

            match moved {
                Ok(false) => log::debug!("{:?} changed nothing", command),
                Ok(true) => {}
                Err(err) => {
                    writeln!(self.output, "{err}")?;
                    continue;
                }
            }

            if let Some(flow) = self.check_state(field, clock)? {
                return Ok(flow);
            }
        }
    }

    /// Runs after every move, ends the game once the field reports a terminal state.
    fn check_state(&mut self, field: &Minefield, clock: &mut GameClock) -> Result<Option<Flow>> {
        if !field.is_finished() {
            return Ok(None);
        }

        clock.stop();
        let time = format_elapsed(clock.elapsed());
        write!(self.output, "{}", render(field))?;

        if field.exploded() {
            log::info!("Game lost after {}", time);
            writeln!(self.output, "KA-BOOM!!!")?;
            return Ok(Some(Flow::Restart));
        }

        log::info!("Game won after {}", time);
        writeln!(self.output, "You win! Time: {time}")?;
        let Some(name) = self.prompt("What's your name? ")? else {
            return Ok(Some(Flow::Quit));
        };

        let name = name.trim();
        if !name.is_empty() {
            if let Err(err) = self.records.add(&Record::new(name, time)) {
                log::warn!("{:?}", err);
                writeln!(self.output, "{err}")?;
            }
        }
        Ok(Some(Flow::Restart))
    }

    fn show(&mut self, field: &Minefield, clock: &GameClock) -> Result<()> {
        write!(self.output, "{}", render(field))?;
        writeln!(
            self.output,
            "Time {}  Mines left {}",
            format_elapsed(clock.elapsed()),
            field.mines_left()
        )?;
        Ok(())
    }

    fn show_records(&mut self) -> Result<()> {
        match self.records.read() {
            Ok(records) if records.is_empty() => writeln!(self.output, "No records yet")?,
            Ok(records) => {
                for record in records {
                    writeln!(self.output, "{record}")?;
                }
            }
            Err(err) => {
                log::warn!("{:?}", err);
                writeln!(self.output, "{err}")?;
            }
        }
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Could not read input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end().to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mines_core::{GameConfig, LayoutGenerator};
    use std::io::Cursor;

    fn settings(dir: &tempfile::TempDir, config: GameConfig, seed: u64) -> Settings {
        Settings {
            config,
            seed: Some(seed),
            records: dir.path().join("records.txt"),
        }
    }

    fn play(settings: Settings, input: &str) -> String {
        let mut session = Session::new(settings, Cursor::new(input.to_owned()), Vec::new());
        session.run().unwrap();
        String::from_utf8(session.into_output()).unwrap()
    }

    fn mine_of(config: GameConfig, seed: u64) -> Coord2 {
        RandomLayoutGenerator::new(seed)
            .generate(config)
            .unwrap()
            .mines()
            .next()
            .unwrap()
    }

    #[test]
    fn parses_commands() {
        assert_eq!("o 3 4".parse::<Command>(), Ok(Command::Open((3, 4))));
        assert_eq!("FLAG 0 12".parse::<Command>(), Ok(Command::Flag((0, 12))));
        assert_eq!("  records ".parse::<Command>(), Ok(Command::Records));
        assert_eq!("restart".parse::<Command>(), Ok(Command::Restart));
        assert_eq!("q".parse::<Command>(), Ok(Command::Quit));
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!(
            "open 1".parse::<Command>(),
            Err(CommandError::MissingCoords("open"))
        );
        assert_eq!(
            "f 1 -2".parse::<Command>(),
            Err(CommandError::BadCoord("-2".to_owned()))
        );
        assert_eq!(
            "dig 1 1".parse::<Command>(),
            Err(CommandError::Unknown("dig".to_owned()))
        );
    }

    #[test]
    fn win_records_the_player() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(&dir, GameConfig::new(1, 1, 0).unwrap(), 1);
        let store = RecordStore::new(settings.records.clone());

        let output = play(settings, "open 0 0\nalice\nquit\n");

        assert!(output.contains("You win! Time: "));
        let records = store.read().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "alice");
        assert_eq!(records[0].time.matches(':').count(), 2);
    }

    #[test]
    fn blank_name_is_not_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(&dir, GameConfig::new(1, 1, 0).unwrap(), 1);
        let store = RecordStore::new(settings.records.clone());

        play(settings, "o 0 0\n   \nrecords\nq\n");

        assert!(store.read().unwrap().is_empty());
    }

    #[test]
    fn end_of_input_at_name_prompt_quits() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(&dir, GameConfig::new(1, 1, 0).unwrap(), 1);
        let store = RecordStore::new(settings.records.clone());

        let output = play(settings, "o 0 0\n");

        assert!(output.ends_with("What's your name? "));
        assert!(store.read().unwrap().is_empty());
    }

    #[test]
    fn opening_the_mine_loses_and_restarts() {
        let dir = tempfile::tempdir().unwrap();
        let config = GameConfig::new(1, 2, 1).unwrap();
        let (x, y) = mine_of(config, 5);

        let output = play(settings(&dir, config, 5), &format!("open {x} {y}\nquit\n"));

        let (lost, next_game) = output.split_once("KA-BOOM!!!").unwrap();
        assert!(lost.contains('*'));
        assert!(next_game.contains("Time 0:00:0"));
    }

    #[test]
    fn flagged_mine_cannot_be_opened() {
        let dir = tempfile::tempdir().unwrap();
        let config = GameConfig::new(1, 2, 1).unwrap();
        let (x, y) = mine_of(config, 9);

        let output = play(
            settings(&dir, config, 9),
            &format!("flag {x} {y}\nopen {x} {y}\nquit\n"),
        );

        assert!(!output.contains("KA-BOOM!!!"));
        assert!(output.contains("Mines left 0"));
    }

    #[test]
    fn bad_input_is_reported_and_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(&dir, GameConfig::new(3, 3, 1).unwrap(), 2);

        let output = play(settings, "dance\nopen 9 9\nopen x 1\nflag 2\n\nhelp\nquit\n");

        assert!(output.contains("Unknown command \"dance\""));
        assert!(output.contains("Invalid coordinates (9, 9)"));
        assert!(output.contains("Invalid coordinate \"x\""));
        assert!(output.contains("Expected coordinates: flag X Y"));
        assert!(output.contains("Commands:"));
        assert!(!output.contains("KA-BOOM!!!"));
    }

    #[test]
    fn records_command_lists_wins() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(&dir, GameConfig::new(1, 1, 0).unwrap(), 1);
        RecordStore::new(settings.records.clone())
            .add(&Record::new("bob", "0:00:42"))
            .unwrap();

        let output = play(settings, "records\nquit\n");

        assert!(output.contains("bob :: 0:00:42"));
    }

    #[test]
    fn fixed_seed_advances_per_game() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new(
            settings(&dir, GameConfig::new(2, 2, 1).unwrap(), 10),
            Cursor::new(String::new()),
            Vec::new(),
        );

        assert_eq!(session.next_seed(), 10);
        assert_eq!(session.next_seed(), 11);
    }
}
