//! The `termkit menu` loop.

use std::io::Write;

use termkit_core::{netmask_to_prefix, parse_prefix};
use tracing::debug;

use super::commands::{self, LockSettings};
use super::menu::MenuOptions;
use super::prompt::{LineReader, PromptError, Prompter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    PrefixToNetmask,
    NetmaskToPrefix,
    IpInNetwork,
    ValidateRoute,
    LockStatus,
    CreateLock,
}

static ACTIONS: [(&str, Action); 6] = [
    ("prefix -> netmask", Action::PrefixToNetmask),
    ("netmask -> prefix", Action::NetmaskToPrefix),
    ("ip in network", Action::IpInNetwork),
    ("validate route", Action::ValidateRoute),
    ("lock status", Action::LockStatus),
    ("create lock", Action::CreateLock),
];

const MAIN_MESSAGE: &str = "Select an operation";

/// Runs the main menu until the user picks exit.
///
/// Lock failures are reported in red and the menu continues.
///
/// # Errors
///
/// Returns [`PromptError`] when input ends or the terminal fails.
pub fn run_menu<R: LineReader, W: Write>(
    prompter: &mut Prompter<R, W>,
    locks: &LockSettings,
) -> Result<(), PromptError> {
    let options = MenuOptions {
        allow_exit: true,
        allow_back: false,
    };
    while let Some(action) = prompter.select(&ACTIONS, MAIN_MESSAGE, options)? {
        debug!(?action, "menu action");
        match *action {
            Action::PrefixToNetmask => prefix_to_netmask(prompter)?,
            Action::NetmaskToPrefix => netmask_to_prefix_action(prompter)?,
            Action::IpInNetwork => ip_in_network(prompter)?,
            Action::ValidateRoute => validate_route(prompter)?,
            Action::LockStatus => lock_status(prompter, locks)?,
            Action::CreateLock => create_lock(prompter, locks)?,
        }
    }
    Ok(())
}

fn prefix_to_netmask<R: LineReader, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> Result<(), PromptError> {
    let palette = prompter.palette();
    let prefix = prompter.input(
        |s| parse_prefix(s).is_ok(),
        "Please input prefix: ",
        "invalid value.",
        None,
    )?;
    // The validator already accepted the prefix.
    match commands::netmask(&prefix) {
        Ok(mask) => prompter.say(&palette.green(&mask))?,
        Err(e) => prompter.say(&palette.red(&e.to_string()))?,
    }
    Ok(())
}

fn netmask_to_prefix_action<R: LineReader, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> Result<(), PromptError> {
    let palette = prompter.palette();
    let mask = prompter.input(
        |s| netmask_to_prefix(s).is_some(),
        "Please input netmask: ",
        "invalid value.",
        None,
    )?;
    if let Some(prefix) = commands::prefix(&mask) {
        prompter.say(&palette.green(&prefix.to_string()))?;
    }
    Ok(())
}

fn ip_in_network<R: LineReader, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> Result<(), PromptError> {
    let palette = prompter.palette();
    let network = prompter.ipv4(None, true)?;
    let ip = prompter.ipv4(None, false)?;
    if commands::contains(&network, &ip) {
        prompter.say(&palette.green(&format!("{ip} is in {network}")))?;
    } else {
        prompter.say(&palette.red(&format!("{ip} is not in {network}")))?;
    }
    Ok(())
}

fn validate_route<R: LineReader, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> Result<(), PromptError> {
    let palette = prompter.palette();
    let route = prompter.input(
        |s| !s.is_empty(),
        "Please input route (<ipv4>/<prefix> via <ipv4>): ",
        "invalid value.",
        None,
    )?;
    if commands::check(commands::CheckKind::Route, &route) {
        prompter.say(&palette.green("valid route"))?;
    } else {
        prompter.say(&palette.red("invalid route"))?;
    }
    Ok(())
}

fn ask_header<R: LineReader, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> Result<String, PromptError> {
    prompter.input(
        |s| !s.is_empty(),
        "Please input lock header: ",
        "invalid value.",
        None,
    )
}

fn lock_status<R: LineReader, W: Write>(
    prompter: &mut Prompter<R, W>,
    locks: &LockSettings,
) -> Result<(), PromptError> {
    let palette = prompter.palette();
    let header = ask_header(prompter)?;
    match locks.lock(&header) {
        Ok(lock) => {
            let report = commands::lock_status(&lock);
            let text = report.to_string();
            if report.is_locked() {
                prompter.say(&palette.yellow(&text))?;
            } else {
                prompter.say(&palette.green(&text))?;
            }
        }
        Err(e) => prompter.say(&palette.red(&e.to_string()))?,
    }
    Ok(())
}

fn create_lock<R: LineReader, W: Write>(
    prompter: &mut Prompter<R, W>,
    locks: &LockSettings,
) -> Result<(), PromptError> {
    let palette = prompter.palette();
    let header = ask_header(prompter)?;
    let lock = match locks.lock(&header) {
        Ok(lock) => lock,
        Err(e) => {
            prompter.say(&palette.red(&e.to_string()))?;
            return Ok(());
        }
    };

    let confirmed = if lock.is_locked() {
        prompter.yes_no(&format!("{header} is locked. Create another marker"), false)?
    } else {
        prompter.yes_no(&format!("Create lock marker for {header}"), true)?
    };
    if !confirmed {
        prompter.say("Cancelled.")?;
        return Ok(());
    }

    match commands::lock_create(&lock) {
        Ok(marker) => {
            prompter.say(&palette.green(&format!("created: {marker}")))?;
        }
        Err(e) => prompter.say(&palette.red(&e.to_string()))?,
    }
    Ok(())
}
