//! Line-oriented front end over [`RentalApi`].

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use carrental_core::RentalApi;
use serde::Serialize;
use tracing::debug;

const PROMPT: &str = "carrental> ";
const HELP: &str = "commands:
  register <email> <password> <name>
  login <email> <password>
  logout
  cars
  rent <car_id> <days>
  rentals
  help
  quit";

#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Register {
        email: &'a str,
        password: &'a str,
        name: String,
    },
    Login {
        email: &'a str,
        password: &'a str,
    },
    Logout,
    Cars,
    Rent {
        car_id: &'a str,
        days: &'a str,
    },
    Rentals,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command<'_>, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Err(String::new());
    };
    let args: Vec<&str> = words.collect();

    let command = match (verb.to_lowercase().as_str(), args.as_slice()) {
        ("register", &[email, password, ref name @ ..]) if !name.is_empty() => Command::Register {
            email,
            password,
            name: name.join(" "),
        },
        ("login", &[email, password]) => Command::Login { email, password },
        ("logout", &[]) => Command::Logout,
        ("cars", &[]) => Command::Cars,
        ("rent", &[car_id, days]) => Command::Rent { car_id, days },
        ("rentals", &[]) => Command::Rentals,
        ("help", _) => Command::Help,
        ("quit" | "exit", _) => Command::Quit,
        (other, _) => return Err(format!("unrecognised command '{other}'; try 'help'")),
    };
    Ok(command)
}

/// Interactive session holding the signed-in account, if any.
pub struct Shell {
    api: RentalApi,
    email: Option<String>,
}

impl Shell {
    pub fn new(api: RentalApi) -> Self {
        Self { api, email: None }
    }

    /// Read commands until end of input or `quit`.
    pub fn run(&mut self, input: impl BufRead, mut output: impl Write) -> Result<()> {
        write!(output, "{PROMPT}")?;
        output.flush()?;
        for line in input.lines() {
            let line = line.context("failed to read command")?;
            match self.handle(&line)? {
                Some(reply) if reply.is_empty() => {}
                Some(reply) => writeln!(output, "{reply}")?,
                None => break,
            }
            write!(output, "{PROMPT}")?;
            output.flush()?;
        }
        writeln!(output)?;
        Ok(())
    }

    /// Execute one line. Returns `None` when the session should end.
    fn handle(&mut self, line: &str) -> Result<Option<String>> {
        let command = match parse_command(line.trim()) {
            Ok(command) => command,
            Err(message) => return Ok(Some(message)),
        };
        debug!("shell command: {command:?}");

        let reply = match command {
            Command::Register {
                email,
                password,
                name,
            } => {
                let response = self.api.register(&name, password, email);
                if response.success {
                    self.email = Some(email.to_lowercase());
                }
                to_json(&response)?
            }
            Command::Login { email, password } => {
                let response = self.api.login(email, password);
                if response.success {
                    self.email = Some(email.to_lowercase());
                }
                to_json(&response)?
            }
            Command::Logout => {
                self.email = None;
                "signed out".to_string()
            }
            Command::Cars => to_json(&self.api.get_available_cars())?,
            Command::Rent { car_id, days } => match self.email.as_deref() {
                Some(email) => to_json(&self.api.rent_car(car_id, email, days))?,
                None => "please log in first".to_string(),
            },
            Command::Rentals => match self.email.as_deref() {
                Some(email) => to_json(&self.api.get_rentals(email))?,
                None => "please log in first".to_string(),
            },
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(None),
        };
        Ok(Some(reply))
    }
}

fn to_json(value: &impl Serialize) -> Result<String> {
    serde_json::to_string(value).context("failed to encode reply")
}

#[cfg(test)]
mod tests {
    use super::*;
    use carrental_core::{catalog, CarInventory, JsonAccountStore, RentalService};
    use serde_json::{json, Value};
    use tempfile::tempdir;

    #[test]
    fn parses_commands() {
        assert_eq!(
            parse_command("register a@b.com pw Ann Lee"),
            Ok(Command::Register {
                email: "a@b.com",
                password: "pw",
                name: "Ann Lee".to_string(),
            })
        );
        assert_eq!(
            parse_command("RENT 7 3"),
            Ok(Command::Rent {
                car_id: "7",
                days: "3"
            })
        );
        assert!(parse_command("register a@b.com pw").is_err());
        assert!(parse_command("fly away").is_err());
    }

    #[test]
    fn scripted_session() -> Result<()> {
        let dir = tempdir()?;
        let mut inventory = CarInventory::new();
        catalog::parse_catalog("7,Toyota,Corolla,2020,Sedan,true\n", &mut inventory);
        let service =
            RentalService::new(inventory, JsonAccountStore::new(dir.path().join("users.json")));
        let mut shell = Shell::new(RentalApi::new(service));

        let script = "rent 7 3\nregister a@b.com pw Ann\nrent 7 3\nrentals\ncars\nquit\nhelp\n";
        let mut output = Vec::new();
        shell.run(script.as_bytes(), &mut output)?;

        let text = String::from_utf8(output)?;
        let replies: Vec<&str> = text
            .split(PROMPT)
            .map(str::trim)
            .filter(|reply| !reply.is_empty())
            .collect();
        assert_eq!(replies[0], "please log in first");

        let rented: Value = serde_json::from_str(replies[2])?;
        assert_eq!(rented["success"], json!(true));
        let rentals: Value = serde_json::from_str(replies[3])?;
        assert_eq!(rentals[0]["car"], json!("Toyota Corolla"));
        assert_eq!(replies[4], "[]");
        assert_eq!(replies.len(), 5);
        Ok(())
    }
}
