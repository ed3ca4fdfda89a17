pub mod field;
pub mod form;

use authform_validation::ValidationResult;
use colored::Colorize;

/// One line per verdict: `✓ email` or `✗ email: message`
pub(crate) fn print_verdict(field: &str, result: &ValidationResult) {
    match result.message() {
        None => println!("{} {}", "✓".green().bold(), field),
        Some(message) => println!("{} {}: {}", "✗".red().bold(), field.bold(), message),
    }
}
