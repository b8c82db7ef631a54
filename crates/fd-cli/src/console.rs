//! Line-based console for the human player.

use std::io::{BufRead, Write};

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use fd_core::{Cell, DiceSet, ProbabilityMatrix};
use fd_game::{
    Choice, Event, GameResult, InputProvider, OutputSink, Prompt, Side, Stage, Winner,
    parse_choice,
};

/// Reads answers from `input` and writes the transcript to `output`.
pub struct ConsoleIo<R, W> {
    input: R,
    output: W,
    line: String,
}

impl<R: BufRead, W: Write> ConsoleIo<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            line: String::new(),
        }
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> InputProvider for ConsoleIo<R, W> {
    fn read_choice(&mut self, prompt: &Prompt) -> GameResult<Choice> {
        loop {
            write!(self.output, "{prompt}: ")?;
            self.output.flush()?;

            self.line.clear();
            if self.input.read_line(&mut self.line)? == 0 {
                // EOF
                writeln!(self.output)?;
                return Ok(Choice::Abort);
            }

            match parse_choice(&self.line, prompt.bound()) {
                Some(choice) => return Ok(choice),
                None => writeln!(self.output, "{}", "Invalid input.".yellow())?,
            }
        }
    }
}

fn possessive(side: Side) -> &'static str {
    match side {
        Side::User => "Your",
        Side::Computer => "My",
    }
}

impl<R: BufRead, W: Write> OutputSink for ConsoleIo<R, W> {
    fn emit(&mut self, event: &Event<'_>) -> GameResult<()> {
        let out = &mut self.output;
        match event {
            Event::Committed { stage, offer } => {
                if let Stage::Roll(side) = stage {
                    writeln!(out)?;
                    writeln!(out, "{}", format!("--- {} roll ---", possessive(*side)).bold())?;
                }
                writeln!(
                    out,
                    "I selected a random value in the range 0..{} (HMAC={}).",
                    offer.range - 1,
                    offer.digest.to_string().cyan()
                )?;
            }
            Event::GuessRevealed { outcome, first } => {
                writeln!(
                    out,
                    "My selection: {} (KEY={}).",
                    outcome.reveal.number,
                    outcome.reveal.key.to_string().cyan()
                )?;
                match first {
                    Side::User => writeln!(out, "{}", "You guessed right! You choose first.".green())?,
                    Side::Computer => writeln!(out, "{}", "You guessed wrong. I choose first.".yellow())?,
                }
            }
            Event::DieOptions { dice } => {
                writeln!(out)?;
                for die in dice.iter() {
                    writeln!(out, "{} - {}", die.id(), die)?;
                }
                writeln!(out, "X - exit")?;
                writeln!(out, "? - help")?;
            }
            Event::DieChosen { side, die } => match side {
                Side::User => writeln!(out, "You chose the [{}] die.", die.to_string().bold())?,
                Side::Computer => writeln!(out, "I chose the [{}] die.", die.to_string().bold())?,
            },
            Event::Help { dice, matrix } => {
                write!(out, "{}", render_help(dice, matrix))?;
            }
            Event::RollRevealed { side, value, roll } => {
                writeln!(
                    out,
                    "My number is {} (KEY={}).",
                    value.reveal.number,
                    value.reveal.key.to_string().cyan()
                )?;
                writeln!(
                    out,
                    "The fair number generation result is {} + {} = {} (mod {}).",
                    value.reveal.number, value.contribution, value.result, value.reveal.range
                )?;
                writeln!(
                    out,
                    "{} roll result is {}.",
                    possessive(*side),
                    roll.face.to_string().bold()
                )?;
            }
            Event::Finished(score) => {
                let (user, computer) = (score.user.face, score.computer.face);
                writeln!(out)?;
                match score.winner {
                    Winner::User => {
                        writeln!(out, "{}", format!("You win ({user} > {computer})!").green().bold())?
                    }
                    Winner::Computer => {
                        writeln!(out, "{}", format!("I win ({computer} > {user})!").red().bold())?
                    }
                    Winner::Draw => {
                        writeln!(out, "{}", format!("It's a draw ({user} = {computer}).").bold())?
                    }
                }
            }
        }
        Ok(())
    }
}

/// The probability table shown on `?` and by `--table`.
///
/// Rows are the user's die, columns the computer's. A die never plays
/// against itself, so the diagonal shows `-`.
pub fn render_help(dice: &DiceSet, matrix: &ProbabilityMatrix) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec!["User dice v".to_string()];
    header.extend(dice.iter().map(|d| d.to_string()));
    table.set_header(header);

    for die in dice {
        let mut row = vec![die.to_string()];
        row.extend(matrix.row(die.id()).iter().map(|cell| match cell {
            Cell::NotApplicable => "-".to_string(),
            Cell::Odds(odds) => odds.to_string(),
        }));
        table.add_row(row);
    }

    format!(
        "\n{}\nEach cell shows the probability that the user's die (row) beats the computer's die (column).\n{table}\n\n",
        "Probability of the win for the user:".bold()
    )
}
