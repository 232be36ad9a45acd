use std::{
    io::{self, BufRead, Write},
    str::FromStr,
};

use rust_decimal::Decimal;

use crate::{
    domain::bank::{AccountId, Bank},
    error::{Error, Result},
};

/// One menu choice per loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Create,
    Deposit,
    Withdraw,
    Transfer,
    Status,
    Update,
    Quit,
}

impl Command {
    fn from_choice(choice: i64) -> Option<Self> {
        match choice {
            1 => Some(Self::Create),
            2 => Some(Self::Deposit),
            3 => Some(Self::Withdraw),
            4 => Some(Self::Transfer),
            5 => Some(Self::Status),
            6 => Some(Self::Update),
            7 => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Drive the menu over `input`/`output` until the quit option is chosen or
/// the input is exhausted.
///
/// Every failure of a mutating bank operation is rendered as one generic
/// message; only the status lookup reports "account not found" on its own.
/// Unparsable numbers are reported and re-prompted, never fatal.
pub fn run(bank: &mut Bank, input: impl BufRead, output: impl Write) -> Result<()> {
    let mut session = Session {
        bank,
        input,
        output,
    };

    match session.run_loop() {
        Err(Error::ConsoleError(e)) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(()),
        other => other,
    }
}

struct Session<'a, R, W> {
    bank: &'a mut Bank,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<'_, R, W> {
    fn run_loop(&mut self) -> Result<()> {
        loop {
            self.write_menu()?;

            let line = self.prompt("Choose an option: ")?;
            let choice: i64 = match line.trim().parse() {
                Ok(choice) => choice,
                Err(_) => {
                    writeln!(self.output, "Error: invalid input, enter a number.")?;
                    continue;
                }
            };
            let Some(command) = Command::from_choice(choice) else {
                writeln!(
                    self.output,
                    "Error: invalid option, choose an option from 1 to 7."
                )?;
                continue;
            };

            match command {
                Command::Create => self.create()?,
                Command::Deposit => self.deposit()?,
                Command::Withdraw => self.withdraw()?,
                Command::Transfer => self.transfer()?,
                Command::Status => self.status()?,
                Command::Update => self.update()?,
                Command::Quit => {
                    writeln!(self.output, "Leaving the system...")?;
                    return Ok(());
                }
            }
        }
    }

    fn write_menu(&mut self) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "             Menu             ")?;
        writeln!(self.output, "1. Create account")?;
        writeln!(self.output, "2. Deposit funds")?;
        writeln!(self.output, "3. Withdraw funds")?;
        writeln!(self.output, "4. Transfer funds")?;
        writeln!(self.output, "5. Account status")?;
        writeln!(self.output, "6. Change name or password")?;
        writeln!(self.output, "7. Quit")?;
        Ok(())
    }

    fn create(&mut self) -> Result<()> {
        let id: AccountId = self.prompt_parsed("Enter the account id (whole number): ")?;
        let name = self.prompt("Enter your name: ")?;
        let password = self.prompt_secret_twice("Enter a password: ", "Confirm the password: ")?;
        let initial_balance: Decimal = self.prompt_parsed("Enter the opening balance: ")?;

        match self.bank.create_account(id, name, password, initial_balance) {
            Ok(()) => writeln!(self.output, "Account created with id {id}")?,
            Err(_) => writeln!(self.output, "Error: that account id is already in use.")?,
        }
        Ok(())
    }

    fn deposit(&mut self) -> Result<()> {
        let id: AccountId = self.prompt_parsed("Enter the account id: ")?;
        let amount: Decimal = self.prompt_parsed("Enter the amount to deposit: ")?;

        match self.bank.deposit(id, amount) {
            Ok(()) => writeln!(self.output, "Deposit complete")?,
            Err(_) => writeln!(
                self.output,
                "Error: the deposit could not be made. Check the account id."
            )?,
        }
        Ok(())
    }

    fn withdraw(&mut self) -> Result<()> {
        let id: AccountId = self.prompt_parsed("Enter the account id: ")?;
        let password = self.prompt("Enter the password: ")?;
        let amount: Decimal = self.prompt_parsed("Enter the amount to withdraw: ")?;

        match self.bank.withdraw(id, amount, &password) {
            Ok(()) => writeln!(self.output, "Withdrawal complete")?,
            Err(_) => writeln!(
                self.output,
                "Error: the withdrawal could not be made. Check the password and balance."
            )?,
        }
        Ok(())
    }

    fn transfer(&mut self) -> Result<()> {
        let source: AccountId = self.prompt_parsed("Enter the source account id: ")?;
        let password = self.prompt("Enter the source account password: ")?;
        let target: AccountId = self.prompt_parsed("Enter the target account id: ")?;
        let amount: Decimal = self.prompt_parsed("Enter the amount to transfer: ")?;

        match self.bank.transfer(source, target, amount, &password) {
            Ok(()) => writeln!(self.output, "Transfer complete")?,
            Err(_) => writeln!(
                self.output,
                "Error: the transfer could not be made. Check the account ids and password."
            )?,
        }
        Ok(())
    }

    fn status(&mut self) -> Result<()> {
        let id: AccountId = self.prompt_parsed("Enter the account id: ")?;

        match self.bank.account(id) {
            Ok(account) => {
                writeln!(self.output, "Account name: {}", account.name())?;
                writeln!(self.output, "Balance: ${}", account.balance())?;
            }
            Err(_) => writeln!(self.output, "Error: account not found.")?,
        }
        Ok(())
    }

    fn update(&mut self) -> Result<()> {
        let id: AccountId = self.prompt_parsed("Enter the account id: ")?;
        let password = self.prompt("Enter the current password: ")?;

        writeln!(self.output, "Choose an option:")?;
        writeln!(self.output, "1. Change name")?;
        writeln!(self.output, "2. Change password")?;
        let sub_choice = self.prompt("")?;

        match sub_choice.trim() {
            "1" => {
                let new_name = self.prompt("Enter the new name: ")?;
                match self.bank.change_account_name(id, new_name, &password) {
                    Ok(()) => writeln!(self.output, "Name changed")?,
                    Err(_) => writeln!(
                        self.output,
                        "Error: the name could not be changed. Check the account id and password."
                    )?,
                }
            }
            "2" => {
                let new_password = self
                    .prompt_secret_twice("Enter the new password: ", "Confirm the new password: ")?;
                match self.bank.change_account_password(id, new_password, &password) {
                    Ok(()) => writeln!(self.output, "Password changed")?,
                    Err(_) => writeln!(
                        self.output,
                        "Error: the password could not be changed. Check the account id and current password."
                    )?,
                }
            }
            _ => writeln!(self.output, "Error: invalid option")?,
        }
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> Result<String> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Re-prompts until the entered line parses, reporting each bad line.
    fn prompt_parsed<T: FromStr>(&mut self, text: &str) -> Result<T> {
        loop {
            let line = self.prompt(text)?;
            match line.trim().parse() {
                Ok(value) => return Ok(value),
                Err(_) => writeln!(self.output, "Error: invalid input, enter a number.")?,
            }
        }
    }

    /// The secret has to be entered twice; mismatching entries are reported
    /// and both are asked for again.
    fn prompt_secret_twice(&mut self, first: &str, confirm: &str) -> Result<String> {
        loop {
            let password = self.prompt(first)?;
            let confirmation = self.prompt(confirm)?;
            if password == confirmation {
                return Ok(password);
            }
            writeln!(self.output, "Error: the passwords do not match, try again.")?;
        }
    }
}
