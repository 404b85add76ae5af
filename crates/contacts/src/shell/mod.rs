//! Interactive menu shell
//!
//! Reads menu choices and field values line by line, hands them to the
//! command handlers in `contacts_core::commands`, and prints each outcome.
//! Phone/email re-prompting lives here; the handlers only validate.
//!
//! End of input at any prompt behaves like choosing Exit, so a piped
//! session still saves its edits.

mod prompt;

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use contacts_core::{
    commands, is_valid_email, is_valid_phone, ContactStore, ContactUpdate, NewContact,
};

use self::prompt::{ask, ask_until};

const MENU: &str = "\n----- Contact Book -----\n\
                    1. Add Contact\n\
                    2. View Contacts\n\
                    3. Update Contact\n\
                    4. Delete Contact\n\
                    5. Search Contact\n\
                    6. Exit";

const PHONE_REJECTED: &str =
    "Invalid phone number. Please enter a valid phone number with +91 and 10 digits.";
const EMAIL_REJECTED: &str = "Invalid email address. Please enter a valid email.";

/// A menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    View,
    Update,
    Delete,
    Search,
    Exit,
}

impl MenuChoice {
    /// Map the typed option to a menu entry.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Add),
            "2" => Some(Self::View),
            "3" => Some(Self::Update),
            "4" => Some(Self::Delete),
            "5" => Some(Self::Search),
            "6" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Whether the loop keeps running after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Menu loop over a contact store
pub struct Shell<R, W> {
    store: ContactStore,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(store: ContactStore, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
        }
    }

    /// Run until Exit (or end of input), save, and return the final store.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read/written or the store
    /// cannot be saved. Invalid user input is never an error.
    pub fn run(mut self) -> Result<ContactStore> {
        loop {
            self.say(MENU)?;
            let Some(choice) = self.ask("Choose an option (1-6): ")? else {
                break;
            };

            let flow = match MenuChoice::parse(&choice) {
                Some(MenuChoice::Add) => self.add()?,
                Some(MenuChoice::View) => self.view()?,
                Some(MenuChoice::Update) => self.update()?,
                Some(MenuChoice::Delete) => self.delete()?,
                Some(MenuChoice::Search) => self.search()?,
                Some(MenuChoice::Exit) => Flow::Exit,
                None => {
                    tracing::debug!(choice = %choice, "Unknown menu option");
                    self.say("Invalid option. Please try again.")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Exit {
                break;
            }
        }

        let outcome = commands::exit(&self.store)?;
        self.say(&outcome.to_string())?;
        Ok(self.store)
    }

    fn add(&mut self) -> Result<Flow> {
        let Some(name) = self.ask("Enter name: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(phone) = self.ask_valid(
            "Enter phone number (+91 followed by 10 digits): ",
            PHONE_REJECTED,
            false,
            is_valid_phone,
        )?
        else {
            return Ok(Flow::Exit);
        };
        let Some(email) =
            self.ask_valid("Enter email address: ", EMAIL_REJECTED, false, is_valid_email)?
        else {
            return Ok(Flow::Exit);
        };
        let Some(address) = self.ask("Enter address: ")? else {
            return Ok(Flow::Exit);
        };

        let new = NewContact {
            name,
            phone,
            email,
            address,
        };
        let result = commands::add(&mut self.store, new);
        self.report(result)
    }

    fn view(&mut self) -> Result<Flow> {
        let listing = commands::view(&self.store);
        self.say(&listing.to_string())?;
        Ok(Flow::Continue)
    }

    fn update(&mut self) -> Result<Flow> {
        self.view()?;
        let Some(selection_text) =
            self.ask("Enter the number of the contact you want to update: ")?
        else {
            return Ok(Flow::Exit);
        };
        let current = match self.store.select(&selection_text) {
            Ok(selection) => self.store.get(selection).cloned(),
            Err(err) => return self.report(Err(err)),
        };
        let Some(current) = current else {
            return Ok(Flow::Continue);
        };

        self.say("Leave the field empty if you don't want to update it.")?;
        let Some(name) = self.ask(&format!("Enter new name (current: {}): ", current.name))?
        else {
            return Ok(Flow::Exit);
        };
        let Some(phone) = self.ask_valid(
            &format!("Enter new phone number (current: {}): ", current.phone),
            PHONE_REJECTED,
            true,
            is_valid_phone,
        )?
        else {
            return Ok(Flow::Exit);
        };
        let Some(email) = self.ask_valid(
            &format!("Enter new email (current: {}): ", current.email),
            EMAIL_REJECTED,
            true,
            is_valid_email,
        )?
        else {
            return Ok(Flow::Exit);
        };
        let Some(address) =
            self.ask(&format!("Enter new address (current: {}): ", current.address))?
        else {
            return Ok(Flow::Exit);
        };

        let changes = ContactUpdate::from_inputs(name, phone, email, address);
        let result = commands::update(&mut self.store, &selection_text, changes);
        self.report(result)
    }

    fn delete(&mut self) -> Result<Flow> {
        self.view()?;
        let Some(selection_text) =
            self.ask("Enter the number of the contact you want to delete: ")?
        else {
            return Ok(Flow::Exit);
        };
        let result = commands::delete(&mut self.store, &selection_text);
        self.report(result)
    }

    fn search(&mut self) -> Result<Flow> {
        let Some(term) = self.ask("Enter name or phone number to search: ")? else {
            return Ok(Flow::Exit);
        };
        let matches = commands::search(&self.store, &term);
        self.say(&matches.to_string())?;
        Ok(Flow::Continue)
    }

    /// Print a handler result. Recoverable errors are shown to the user;
    /// anything else aborts the shell.
    fn report(&mut self, result: contacts_core::Result<commands::Outcome>) -> Result<Flow> {
        match result {
            Ok(outcome) => self.say(&outcome.to_string())?,
            Err(err) if err.is_recoverable() => self.say(&err.to_string())?,
            Err(err) => return Err(err.into()),
        }
        Ok(Flow::Continue)
    }

    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        ask(&mut self.input, &mut self.output, prompt)
    }

    fn ask_valid(
        &mut self,
        prompt: &str,
        rejection: &str,
        allow_empty: bool,
        accept: fn(&str) -> bool,
    ) -> Result<Option<String>> {
        ask_until(
            &mut self.input,
            &mut self.output,
            prompt,
            rejection,
            allow_empty,
            accept,
        )
    }

    fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}").context("Failed to write output")
    }
}
