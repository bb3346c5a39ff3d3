use std::io::Write;

use folio_core::{ExtractedText, HistoryRecord, PortfolioRecord};
use owo_colors::OwoColorize;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

fn heading(w: &mut dyn Write, text: &str, color: ColorMode) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{}", text.bold())
    } else {
        writeln!(w, "{}", text)
    }
}

fn field(w: &mut dyn Write, label: &str, value: &str, color: ColorMode) -> std::io::Result<()> {
    let value = if value.is_empty() { "-" } else { value };
    if color.enabled() {
        writeln!(w, "  {:<10} {}", label.dimmed(), value)
    } else {
        writeln!(w, "  {:<10} {}", label, value)
    }
}

/// Print where the text came from and how plausible it looked.
pub fn print_extraction_summary(
    w: &mut dyn Write,
    file_name: &str,
    text: &ExtractedText,
    color: ColorMode,
) -> std::io::Result<()> {
    let m = &text.metrics;
    let line = format!(
        "Extracted {} characters from {} ({}; readable {:.0}%, {} resume terms)",
        m.length,
        file_name,
        text.method,
        m.readable_ratio * 100.0,
        m.vocabulary_hits
    );
    if color.enabled() {
        writeln!(w, "{}", line.dimmed())?;
    } else {
        writeln!(w, "{}", line)?;
    }
    writeln!(w)
}

/// Human-readable rendering of a portfolio record.
pub fn print_portfolio(
    w: &mut dyn Write,
    record: &PortfolioRecord,
    color: ColorMode,
) -> std::io::Result<()> {
    let p = &record.personal;
    if color.enabled() {
        writeln!(w, "{}", p.name.bold().cyan())?;
    } else {
        writeln!(w, "{}", p.name)?;
    }
    writeln!(w, "{}", p.tagline)?;
    writeln!(w)?;
    field(w, "email", &p.email, color)?;
    field(w, "phone", &p.phone, color)?;
    field(w, "location", &p.location, color)?;
    field(w, "github", &record.links.github, color)?;
    field(w, "linkedin", &record.links.linkedin, color)?;
    writeln!(w)?;
    writeln!(w, "{}", p.bio)?;
    writeln!(w)?;

    heading(w, "Skills", color)?;
    for (category, skills) in &record.skills {
        let names: Vec<&str> = skills.iter().map(|s| s.name.as_str()).collect();
        field(w, category, &names.join(", "), color)?;
    }

    if !record.experience.is_empty() {
        heading(w, "Experience", color)?;
        for job in &record.experience {
            writeln!(w, "  {} at {} ({})", job.title, job.company, job.period)?;
        }
    }

    if !record.education.is_empty() {
        heading(w, "Education", color)?;
        for edu in &record.education {
            writeln!(w, "  {}, {} {}", edu.degree, edu.institution, edu.year)?;
        }
    }

    if !record.projects.is_empty() {
        heading(w, "Projects", color)?;
        for project in &record.projects {
            if project.technologies.is_empty() {
                writeln!(w, "  {}", project.name)?;
            } else {
                writeln!(w, "  {} [{}]", project.name, project.technologies.join(", "))?;
            }
        }
    }

    if !record.certifications.is_empty() {
        heading(w, "Certifications", color)?;
        for cert in &record.certifications {
            writeln!(w, "  {}", cert.name)?;
        }
    }

    heading(w, "Highlights", color)?;
    for highlight in &record.about.highlights {
        writeln!(w, "  - {}", highlight)?;
    }
    Ok(())
}

/// One line per saved portfolio, newest first.
pub fn print_history(
    w: &mut dyn Write,
    records: &[HistoryRecord],
    color: ColorMode,
) -> std::io::Result<()> {
    if records.is_empty() {
        return writeln!(w, "No saved portfolios.");
    }
    for r in records {
        let when = r.created_at.format("%Y-%m-%d %H:%M");
        let id = if color.enabled() {
            r.portfolio_id.yellow().to_string()
        } else {
            r.portfolio_id.clone()
        };
        writeln!(
            w,
            "{}  {}  {} ({}) from {} via {}; {} skills, {} jobs",
            id,
            when,
            r.name,
            r.title,
            r.file_name,
            r.extraction_method,
            r.summary.skill_count,
            r.summary.experience_count
        )?;
    }
    Ok(())
}
