//! User interaction for the interactive commands

use anyhow::{Context, Result};
use colored::*;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};

use super::render::{format_grid, row_summary};
use crate::inventory::{EditRow, EditView};

/// Next step chosen while editing a tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowChoice {
    /// Edit the quantity of this 0-based row
    Edit(usize),
    Save,
    Skip,
}

/// Messages and prompts used by the dashboard
pub trait Console {
    fn heading(&mut self, text: &str);
    fn success(&mut self, text: &str);
    fn warning(&mut self, text: &str);
    fn error(&mut self, text: &str);
    fn grid(&mut self, title: &str, view: &EditView);

    /// Pick one of `items`, returning its index
    fn select(&mut self, prompt: &str, items: &[String]) -> Result<usize>;
    fn choose_row(&mut self, view: &EditView) -> Result<RowChoice>;
    /// New quantity for `row`; keeping the current value is allowed
    fn input_quantity(&mut self, column: &str, row: &EditRow) -> Result<String>;
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// Console backed by the terminal
pub struct TerminalConsole {
    theme: ColorfulTheme,
}

impl TerminalConsole {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for TerminalConsole {
    fn heading(&mut self, text: &str) {
        println!();
        println!("{}", text.bright_blue().bold());
    }

    fn success(&mut self, text: &str) {
        println!("{} {}", "✓".green().bold(), text);
    }

    fn warning(&mut self, text: &str) {
        println!("{} {}", "!".yellow().bold(), text.yellow());
    }

    fn error(&mut self, text: &str) {
        eprintln!("{} {}", "✗".red().bold(), text.red());
    }

    fn grid(&mut self, title: &str, view: &EditView) {
        println!("{}", title.dimmed());
        println!("{}", format_grid(view));
    }

    fn select(&mut self, prompt: &str, items: &[String]) -> Result<usize> {
        Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()
            .context("Selection cancelled")
    }

    fn choose_row(&mut self, view: &EditView) -> Result<RowChoice> {
        let mut items: Vec<String> = view.rows.iter().map(|row| row_summary(row, &view.column)).collect();
        items.push("Save changes".to_string());
        items.push("Skip this tab".to_string());

        let picked = Select::with_theme(&self.theme)
            .with_prompt("Pick a row to edit")
            .items(&items)
            .default(0)
            .max_length(20)
            .interact()
            .context("Selection cancelled")?;

        Ok(match picked {
            idx if idx < view.rows.len() => RowChoice::Edit(idx),
            idx if idx == view.rows.len() => RowChoice::Save,
            _ => RowChoice::Skip,
        })
    }

    fn input_quantity(&mut self, column: &str, row: &EditRow) -> Result<String> {
        let input: String = Input::with_theme(&self.theme)
            .with_prompt(format!("{} [{}]", row.labels.join(" / "), column))
            .with_initial_text(row.quantity.clone())
            .allow_empty(true)
            .interact_text()
            .context("Input cancelled")?;
        Ok(input)
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact()
            .context("Confirmation cancelled")
    }
}

/// Console that replays scripted answers and records every message
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    pub messages: Vec<(&'static str, String)>,
    pub selections: std::collections::VecDeque<usize>,
    pub row_choices: std::collections::VecDeque<RowChoice>,
    pub quantities: std::collections::VecDeque<String>,
    pub confirmations: std::collections::VecDeque<bool>,
}

#[cfg(test)]
impl ScriptedConsole {
    pub fn count(&self, kind: &str) -> usize {
        self.messages.iter().filter(|(k, _)| *k == kind).count()
    }

    /// Warnings and errors
    pub fn problems(&self) -> usize {
        self.count("warning") + self.count("error")
    }
}

#[cfg(test)]
impl Console for ScriptedConsole {
    fn heading(&mut self, text: &str) {
        self.messages.push(("heading", text.to_string()));
    }

    fn success(&mut self, text: &str) {
        self.messages.push(("success", text.to_string()));
    }

    fn warning(&mut self, text: &str) {
        self.messages.push(("warning", text.to_string()));
    }

    fn error(&mut self, text: &str) {
        self.messages.push(("error", text.to_string()));
    }

    fn grid(&mut self, title: &str, view: &EditView) {
        self.messages
            .push(("grid", format!("{}: {} rows", title, view.rows.len())));
    }

    fn select(&mut self, _prompt: &str, _items: &[String]) -> Result<usize> {
        self.selections.pop_front().context("no scripted selection")
    }

    fn choose_row(&mut self, _view: &EditView) -> Result<RowChoice> {
        Ok(self.row_choices.pop_front().unwrap_or(RowChoice::Skip))
    }

    fn input_quantity(&mut self, _column: &str, _row: &EditRow) -> Result<String> {
        self.quantities.pop_front().context("no scripted quantity")
    }

    fn confirm(&mut self, _prompt: &str) -> Result<bool> {
        Ok(self.confirmations.pop_front().unwrap_or(false))
    }
}
