//! Console collaborator: everything the engine shows to or asks of the players.

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use crate::model::{Decision, Player, PlayerNumber};
use crate::rules::{MAX_PLAYERS, MIN_PLAYERS};

pub trait Table {
    fn welcome(&mut self) -> io::Result<()> { Ok(()) }
    fn prompt_number_of_players(&mut self) -> io::Result<usize>;
    fn prompt_throw_or_hold(&mut self, player: &Player) -> io::Result<Decision>;
    fn render_turn_state(&mut self, player: &Player) -> io::Result<()>;
    fn render_bust(&mut self, player: &Player) -> io::Result<()>;
    fn render_final_scores(&mut self, scores: &[(PlayerNumber, u32)]) -> io::Result<()>;
}

pub fn parse_decision(input: &str) -> Option<Decision> {
    match input.trim().to_ascii_lowercase().as_str() {
        "t" | "throw" => Some(Decision::Throw),
        "h" | "hold" => Some(Decision::Hold),
        _ => None,
    }
}

pub fn parse_player_count(input: &str) -> Option<usize> {
    input.trim().parse().ok().filter(|n| (MIN_PLAYERS..=MAX_PLAYERS).contains(n))
}

pub struct Terminal<R, W> {
    input: R,
    output: W,
    pacing: Duration,
    clear_screen: bool,
}

impl Terminal<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio(pacing: Duration, clear_screen: bool) -> Self {
        Terminal::new(io::stdin().lock(), io::stdout(), pacing, clear_screen)
    }
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W, pacing: Duration, clear_screen: bool) -> Self {
        Self { input, output, pacing, clear_screen }
    }

    pub fn into_output(self) -> W { self.output }

    fn say(&mut self, msg: &str) -> io::Result<()> {
        writeln!(self.output, "--> {}", msg)
    }

    fn rule(&mut self) -> io::Result<()> {
        writeln!(self.output, "----------------------------------")
    }

    fn clear(&mut self) -> io::Result<()> {
        if self.clear_screen { write!(self.output, "\x1B[2J\x1B[H")?; }
        Ok(())
    }

    /// Quarter of the pacing before the message, the rest after it.
    fn paced(&mut self, msg: &str) -> io::Result<()> {
        let before = self.pacing / 4;
        thread::sleep(before);
        self.say(msg)?;
        self.output.flush()?;
        thread::sleep(self.pacing - before);
        Ok(())
    }

    fn read_line(&mut self) -> io::Result<String> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line)
    }

    /// Read lines until `parse` accepts one, repeating `retry` after each miss.
    fn ask<T>(&mut self, retry: &str, parse: impl Fn(&str) -> Option<T>) -> io::Result<T> {
        loop {
            let line = self.read_line()?;
            if let Some(v) = parse(&line) { return Ok(v); }
            self.say(retry)?;
        }
    }
}

impl<R: BufRead, W: Write> Table for Terminal<R, W> {
    fn welcome(&mut self) -> io::Result<()> {
        self.clear()?;
        self.rule()?;
        self.say("Welcome to Being Lucky!")?;
        self.rule()
    }

    fn prompt_number_of_players(&mut self) -> io::Result<usize> {
        self.rule()?;
        self.say("How many people are playing?")?;
        self.ask(
            &format!("Sorry, must choose between {} - {}.", MIN_PLAYERS, MAX_PLAYERS),
            parse_player_count,
        )
    }

    fn prompt_throw_or_hold(&mut self, _player: &Player) -> io::Result<Decision> {
        self.say("(T)hrow dice or (H)old score")?;
        self.ask("Sorry, must choose T or H.", parse_decision)
    }

    fn render_turn_state(&mut self, player: &Player) -> io::Result<()> {
        self.clear()?;
        self.say(&format!("Player {} Turn:", player.number))?;
        if let Some(roll) = &player.current_roll {
            self.say(&format!("Player just rolled: {}", roll))?;
            self.say(&format!("Last roll points: {}", roll.throw_score))?;
        }
        self.say(&format!("Available dice: {}", player.valid_dice))?;
        self.say(&format!("Cumulative Score: {}", player.total_score))?;
        self.say(&format!("Round Score: {}", player.round_score))?;
        self.rule()
    }

    fn render_bust(&mut self, _player: &Player) -> io::Result<()> {
        self.paced("You rolled a 0. Turn over. Round points lost")
    }

    fn render_final_scores(&mut self, scores: &[(PlayerNumber, u32)]) -> io::Result<()> {
        self.clear()?;
        self.say("Game over. Final scores:")?;
        self.rule()?;
        for (number, total) in scores {
            self.say(&format!("player {}: {}", number, total))?;
        }
        self.output.flush()
    }
}
