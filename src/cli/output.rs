//! Colored output helpers for CLI
//!
//! Provides consistent, colored terminal output for the Baseera CLI.

use crate::calendar::IslamicDateInfo;
use crate::types::{ChatResponse, Reminder};
use owo_colors::OwoColorize;

/// Output style configuration
pub struct Output {
    /// Whether to use colored output
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

const BANNER: [&str; 5] = [
    r" ____    _    ____  _____ _____ ____      _    ",
    r"| __ )  / \  / ___|| ____| ____|  _ \    / \   ",
    r"|  _ \ / _ \ \___ \|  _| |  _| | |_) |  / _ \  ",
    r"| |_) / ___ \ ___) | |___| |___|  _ <  / ___ \ ",
    r"|____/_/   \_\____/|_____|_____|_| \_\/_/   \_\",
];

impl Output {
    /// Create a new output helper with colors enabled
    pub fn new() -> Self {
        Self { colored: true }
    }

    /// Create a new output helper with colors disabled
    pub fn no_color() -> Self {
        Self { colored: false }
    }

    /// Print the Baseera banner
    pub fn banner(&self) {
        println!();
        if self.colored {
            println!("   {}", BANNER[0].bright_green().bold());
            println!("   {}", BANNER[1].bright_green().bold());
            println!("   {}", BANNER[2].green().bold());
            println!("   {}", BANNER[3].green().bold());
            println!("   {}", BANNER[4].cyan().bold());
            println!(
                "\n   {} {}\n",
                "Islamic reminders and Q&A".bright_white().bold(),
                format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
            );
        } else {
            for line in BANNER {
                println!("   {}", line);
            }
            println!(
                "\n   Islamic reminders and Q&A v{}\n",
                env!("CARGO_PKG_VERSION")
            );
        }
    }

    /// Print a success message with a checkmark
    pub fn success(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "✓".green().bold(), message.green());
        } else {
            println!("  [OK] {}", message);
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "•".blue(), message);
        } else {
            println!("  [INFO] {}", message);
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "⚠".yellow().bold(), message.yellow());
        } else {
            println!("  [WARN] {}", message);
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "✗".red().bold(), message.red());
        } else {
            eprintln!("  [ERROR] {}", message);
        }
    }

    /// Print a file creation message
    pub fn created(&self, file_type: &str, path: &str) {
        if self.colored {
            println!(
                "  {} {} {}",
                "✓".green().bold(),
                file_type.dimmed(),
                path.bright_white()
            );
        } else {
            println!("  [CREATED] {} {}", file_type, path);
        }
    }

    /// Print a file skipped message
    pub fn skipped(&self, path: &str, reason: &str) {
        if self.colored {
            println!(
                "  {} {} {}",
                "○".yellow(),
                path.dimmed(),
                format!("({})", reason).yellow()
            );
        } else {
            println!("  [SKIPPED] {} ({})", path, reason);
        }
    }

    /// Print a directory creation message
    pub fn created_dir(&self, path: &str) {
        if self.colored {
            println!(
                "  {} {} {}",
                "✓".green().bold(),
                "directory".dimmed(),
                path.bright_white()
            );
        } else {
            println!("  [CREATED] directory {}", path);
        }
    }

    /// Print a header for a section
    pub fn header(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.bright_white().bold().underline());
        } else {
            println!("\n  === {} ===", title);
        }
    }

    /// Print a subheader
    pub fn subheader(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.cyan().bold());
        } else {
            println!("\n  --- {} ---", title);
        }
    }

    /// Print a key-value pair
    pub fn kv(&self, key: &str, value: &str) {
        if self.colored {
            println!("    {}: {}", key.dimmed(), value.bright_white());
        } else {
            println!("    {}: {}", key, value);
        }
    }

    /// Print a list item
    pub fn list_item(&self, item: &str) {
        if self.colored {
            println!("    {} {}", "•".blue(), item);
        } else {
            println!("    - {}", item);
        }
    }

    /// Print a hint/tip message
    pub fn hint(&self, message: &str) {
        if self.colored {
            println!("\n  {} {}", "💡".dimmed(), message.dimmed().italic());
        } else {
            println!("\n  [TIP] {}", message);
        }
    }

    /// Print a command suggestion
    pub fn command(&self, cmd: &str) {
        if self.colored {
            println!("     {}", format!("$ {}", cmd).bright_cyan());
        } else {
            println!("     $ {}", cmd);
        }
    }

    /// Print completion message with next steps
    pub fn complete(&self, message: &str) {
        if self.colored {
            println!("\n  {} {}", "🚀".green(), message.bright_green().bold());
        } else {
            println!("\n  [DONE] {}", message);
        }
    }

    /// Print a reminder: Arabic text, translation, then source
    pub fn reminder(&self, reminder: &Reminder) {
        if self.colored {
            println!("\n  {}", reminder.kind.label().green().bold());
            println!("\n    {}", reminder.arabic.bright_white());
            println!("\n    {}", reminder.english.italic());
            println!("\n    {}", format!("— {}", reminder.source).green());
        } else {
            println!("\n  {}", reminder.kind.label());
            println!("\n    {}", reminder.arabic);
            println!("\n    {}", reminder.english);
            println!("\n    -- {}", reminder.source);
        }
    }

    /// Print a Hijri estimate with the event of the day
    pub fn islamic_date(&self, info: &IslamicDateInfo) {
        self.kv("Gregorian", &info.gregorian);
        self.kv("Hijri", &info.hijri.to_string());

        if let Some(event) = &info.event {
            if self.colored {
                println!("\n    {} {}", "✦".bright_yellow(), event.title.bright_yellow().bold());
                println!("      {}", event.description.dimmed());
            } else {
                println!("\n    * {}", event.title);
                println!("      {}", event.description);
            }
        }
    }

    /// Print a chat answer followed by its references
    pub fn answer(&self, response: &ChatResponse) {
        println!("\n  {}", response.answer);

        if response.references.is_empty() {
            return;
        }

        self.subheader("References");
        for reference in &response.references {
            self.list_item(&format!("{} ({})", reference.citation, reference.kind.label()));
            if !reference.arabic.is_empty() {
                println!("      {}", reference.arabic);
            }
            if !reference.english.is_empty() {
                if self.colored {
                    println!("      {}", reference.english.italic());
                } else {
                    println!("      {}", reference.english);
                }
            }
        }
    }

    /// Print newline
    pub fn newline(&self) {
        println!();
    }
}
