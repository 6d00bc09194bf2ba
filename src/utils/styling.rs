//! Terminal styling utilities for the import front-end

use console::{style, Emoji};
use std::path::Path;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static GEAR: Emoji<'_, '_> = Emoji("⚙️  ", "");
pub static DATABASE: Emoji<'_, '_> = Emoji("🗄️  ", "");
pub static WARNING: Emoji<'_, '_> = Emoji("⚠️  ", "[!] ");

/// Print the application banner
pub fn print_banner(version: &str) {
    let banner = r#"
    ╔╦╗╦═╗╔═╗╔═╗  ╦╔╦╗╔═╗╔═╗╦═╗╔╦╗
     ║║╠╦╝║ ║╠═╝  ║║║║╠═╝║ ║╠╦╝ ║
    ═╩╝╩╚═╚═╝╩    ╩╩ ╩╩  ╚═╝╩╚═ ╩
    "#;

    println!();
    println!("{}", style(banner).cyan().bold());
    println!(
        "    {}",
        style("Bring your v4 configs and download history along").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print the paths the session works against
pub fn print_paths(config_dir: &Path, history_db: &Path, log_file: &Path) {
    println!(
        "    {} Configs:  {}",
        GEAR,
        style(truncate_path(config_dir, 48)).dim()
    );
    println!(
        "    {} History:  {}",
        DATABASE,
        style(truncate_path(history_db, 48)).dim()
    );
    println!(
        "    {} Log file: {}",
        FOLDER,
        style(truncate_path(log_file, 48)).dim()
    );
    println!();
}

/// Print a section header with styling
pub fn print_section_header(title: &str) {
    println!();
    println!(
        "    {} {}",
        style("◆").cyan().bold(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("    {} {}", WARNING, style(message).yellow());
}

/// Print an error message
pub fn print_error(message: &str) {
    println!("    {} {}", style("✗").red().bold(), style(message).red());
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        ROCKET,
        style("Import session finished").green().bold()
    );
    println!();
}

// Helper functions

pub fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

pub fn truncate_string(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        s.to_string()
    } else {
        let tail: String = chars[chars.len() - max_len.saturating_sub(3)..].iter().collect();
        format!("...{}", tail)
    }
}
