//! Line-based battle loop.
use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use arena_core::{BattleResult, Combatant, Outcome, SelectionMenu, Session, Side};

/// A command typed during a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Hit,
    Skill,
    Pass,
    Status,
    Restart,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hit" | "h" => Ok(Self::Hit),
            "skill" | "s" => Ok(Self::Skill),
            "pass" | "p" => Ok(Self::Pass),
            "status" | "st" => Ok(Self::Status),
            "restart" | "r" => Ok(Self::Restart),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            other => Err(format!("unknown command '{other}'")),
        }
    }
}

/// Terminal front end over one [`Session`].
pub struct CliApp<R, W> {
    session: Session,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> CliApp<R, W> {
    pub fn new(session: Session, input: R, output: W) -> Self {
        Self {
            session,
            input,
            output,
        }
    }

    /// Picks both combatants, then plays until the player quits or input ends.
    pub fn run(&mut self) -> Result<()> {
        let menu = self.session.selection_menu();
        self.print_menu(&menu)?;
        self.choose(Side::Player, &menu)?;
        self.choose(Side::Enemy, &menu)?;

        let start = self.session.start_fight()?.clone();
        self.print_status(&start)?;
        self.print_help()?;

        while let Some(line) = self.prompt("> ")? {
            if line.is_empty() {
                continue;
            }
            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(message) => {
                    writeln!(self.output, "{message}")?;
                    self.print_help()?;
                    continue;
                }
            };
            match command {
                Command::Hit => self.play(Session::hit)?,
                Command::Skill => self.play(Session::use_skill)?,
                Command::Pass => self.play(Session::pass_turn)?,
                Command::Status => {
                    let current = self.session.current_result().clone();
                    self.print_status(&current)?;
                }
                Command::Restart => {
                    let restarted = self.session.start_fight()?.clone();
                    writeln!(self.output, "A new battle begins.")?;
                    self.print_status(&restarted)?;
                }
                Command::Quit => break,
            }
        }
        Ok(())
    }

    #[cfg(test)]
    fn session(&self) -> &Session {
        &self.session
    }

    fn play(&mut self, round: impl FnOnce(&mut Session) -> BattleResult) -> Result<()> {
        if !self.session.arena().is_running() {
            writeln!(
                self.output,
                "The battle is over. Type 'restart' to fight again or 'quit' to leave."
            )?;
            return Ok(());
        }
        let result = round(&mut self.session);
        for line in &result.narration {
            writeln!(self.output, "{line}")?;
        }
        self.print_status(&result)?;
        if let Some(verdict) = verdict(result.outcome) {
            writeln!(self.output, "{verdict}")?;
        }
        Ok(())
    }

    fn choose(&mut self, side: Side, menu: &SelectionMenu) -> Result<()> {
        writeln!(self.output, "\nChoose the {side}.")?;
        loop {
            let name = self.require("Name: ")?;
            let class = self.require("Class: ")?;
            let weapon = self.optional("Weapon (blank for none): ")?;
            let armor = self.optional("Armor (blank for none): ")?;
            let choice = Combatant {
                name,
                class,
                weapon,
                armor,
            };

            let chosen = match side {
                Side::Player => self.session.choose_player(&choice),
                Side::Enemy => self.session.choose_enemy(&choice),
            }
            .map(|unit| format!("{} the {} is ready.", unit.name(), unit.class()));
            match chosen {
                Ok(summary) => {
                    writeln!(self.output, "{summary}")?;
                    return Ok(());
                }
                Err(err) if err.is_recoverable() => {
                    writeln!(self.output, "{err}. Try again.")?;
                    self.print_menu(menu)?;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    fn print_menu(&mut self, menu: &SelectionMenu) -> Result<()> {
        writeln!(self.output, "Weapons: {}", menu.weapons.join(", "))?;
        writeln!(self.output, "Armors:  {}", menu.armors.join(", "))?;
        let classes: Vec<String> = menu
            .classes
            .iter()
            .map(|c| format!("{} ({})", c.name, c.skill))
            .collect();
        writeln!(self.output, "Classes: {}", classes.join(", "))?;
        Ok(())
    }

    fn print_status(&mut self, result: &BattleResult) -> Result<()> {
        for status in [&result.player, &result.enemy].into_iter().flatten() {
            writeln!(self.output, "  {status}")?;
        }
        Ok(())
    }

    fn print_help(&mut self) -> Result<()> {
        writeln!(
            self.output,
            "Commands: hit, skill, pass, status, restart, quit"
        )?;
        Ok(())
    }

    fn require(&mut self, label: &str) -> Result<String> {
        match self.prompt(label)? {
            Some(value) => Ok(value),
            None => bail!("input closed before the combatants were chosen"),
        }
    }

    fn optional(&mut self, label: &str) -> Result<Option<String>> {
        let value = self.require(label)?;
        Ok((!value.is_empty()).then_some(value))
    }

    /// Reads one trimmed line; `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read from stdin")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

fn verdict(outcome: Outcome) -> Option<&'static str> {
    match outcome {
        Outcome::Ongoing => None,
        Outcome::PlayerWon => Some("Victory!"),
        Outcome::EnemyWon => Some("Defeat."),
        Outcome::Draw => Some("Draw."),
    }
}
