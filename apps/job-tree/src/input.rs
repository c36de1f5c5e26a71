//! Input readers for the job-role and NAICS industry lists.

use std::path::Path;

use tracing::info;

use crate::errors::AppError;

/// Reads job roles from a newline-delimited file.
pub fn read_job_roles(path: &Path) -> Result<Vec<String>, AppError> {
    let text = std::fs::read_to_string(path).map_err(|e| AppError::input(path, e))?;
    let roles = parse_job_roles(&text);
    info!("Loaded {} job roles from {}", roles.len(), path.display());
    Ok(roles)
}

/// Reads NAICS industry labels from a newline-delimited file, skipping the
/// single-letter section headers.
pub fn read_naics_industries(path: &Path) -> Result<Vec<String>, AppError> {
    let text = std::fs::read_to_string(path).map_err(|e| AppError::input(path, e))?;
    let industries = parse_naics_industries(&text);
    info!(
        "Loaded {} NAICS industries from {}",
        industries.len(),
        path.display()
    );
    Ok(industries)
}

pub fn parse_job_roles(text: &str) -> Vec<String> {
    trimmed_lines(text).map(str::to_string).collect()
}

pub fn parse_naics_industries(text: &str) -> Vec<String> {
    trimmed_lines(text)
        .filter(|line| !is_section_header(line))
        .map(str::to_string)
        .collect()
}

fn trimmed_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|line| !line.is_empty())
}

/// A header line is exactly one alphabetic character, e.g. `A` or `b`.
fn is_section_header(line: &str) -> bool {
    let mut chars = line.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic())
}
