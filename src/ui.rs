use anyhow::{Context, Result};
use console::{Style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use passlab::StrengthReport;
use rpassword::read_password;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::{Duration, Instant};
use zeroize::Zeroizing;

pub const STRONG_SCORE: u8 = 3;
pub const WEAK_SCORE: u8 = 1;

pub struct DisplayOptions {
    pub unicode_support: bool,
    pub color_support: bool,
    pub quiet: bool,
}

impl DisplayOptions {
    pub fn detect(quiet: bool) -> Self {
        Self {
            unicode_support: detect_unicode_support(),
            color_support: detect_color_support(),
            quiet,
        }
    }
}

pub struct GenerationSummary<'a> {
    pub seed_count: usize,
    pub word_count: usize,
    pub target: Option<usize>,
    pub min_length: usize,
    pub max_length: usize,
    pub out: Option<&'a Path>,
    pub elapsed: Duration,
}

struct Glyphs {
    branch: &'static str,
    last: &'static str,
    pipe: &'static str,
}

pub fn detect_unicode_support() -> bool {
    supports_unicode::on(supports_unicode::Stream::Stdout)
}

pub fn detect_color_support() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

pub fn get_status_symbols(unicode_support: bool) -> (&'static str, &'static str) {
    if unicode_support {
        ("✓", "!")
    } else {
        ("+", "!")
    }
}

fn glyphs(unicode_support: bool) -> Glyphs {
    if unicode_support {
        Glyphs {
            branch: "├─",
            last: "└─",
            pipe: "│ ",
        }
    } else {
        Glyphs {
            branch: "|-",
            last: "`-",
            pipe: "| ",
        }
    }
}

fn score_style(score: u8, options: &DisplayOptions) -> Style {
    if !options.color_support {
        Style::new()
    } else if score >= STRONG_SCORE {
        Style::new().green()
    } else if score > WEAK_SCORE {
        Style::new().yellow()
    } else {
        Style::new().red()
    }
}

pub fn prompt_password(prompt: &str) -> Result<Zeroizing<String>> {
    eprint!("{}", prompt);
    io::stderr().flush()?;

    let password = read_password().context("Failed to read password")?;
    Ok(Zeroizing::new(password))
}

/// Passwords from a terminal, one per prompt, until a blank entry.
pub fn prompt_until_blank() -> Result<Vec<Zeroizing<String>>> {
    let mut passwords = Vec::new();
    loop {
        let password = prompt_password("> ")?;
        if password.is_empty() {
            return Ok(passwords);
        }
        passwords.push(password);
    }
}

/// Lines from `reader` up to the first blank line or end of input.
pub fn read_until_blank<R: BufRead>(reader: R) -> Result<Vec<Zeroizing<String>>> {
    let mut passwords = Vec::new();
    for line in reader.lines() {
        let line = Zeroizing::new(line.context("Failed to read password")?);
        let password = line.trim_end_matches('\r');
        if password.is_empty() {
            break;
        }
        passwords.push(Zeroizing::new(password.to_string()));
    }
    Ok(passwords)
}

pub fn show_progress<F, T>(options: &DisplayOptions, f: F) -> Result<(T, Duration)>
where
    F: FnOnce() -> Result<T>,
{
    if options.quiet {
        let start = Instant::now();
        return f().map(|r| (r, start.elapsed()));
    }

    let term = Term::stderr();
    term.hide_cursor().ok();

    let pb = ProgressBar::new_spinner();

    if options.unicode_support {
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
    } else {
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("-\\|/-"),
        );
    }

    pb.set_message("Generating wordlist...");
    pb.enable_steady_tick(Duration::from_millis(80));

    let start = Instant::now();
    let result = f();
    let elapsed = start.elapsed();

    pb.finish_and_clear();
    term.show_cursor().ok();

    result.map(|r| (r, elapsed))
}

pub fn display_report(index: usize, report: &StrengthReport, options: &DisplayOptions) {
    let (check_ok, check_warn) = get_status_symbols(options.unicode_support);
    let g = glyphs(options.unicode_support);
    let style = score_style(report.score, options);
    let status = if report.score >= STRONG_SCORE {
        check_ok
    } else {
        check_warn
    };

    println!("Out[{}]:", index);

    if options.quiet {
        println!("{} ({}/4)", style.apply_to(report.strength), report.score);
        return;
    }

    println!("  {} Engine     {}", g.branch, report.engine);
    println!(
        "  {} Strength   {} {} ({}/4)",
        g.branch,
        style.apply_to(format!("[{}]", status)),
        style.apply_to(report.strength),
        report.score
    );
    println!(
        "  {} Entropy    {} bits",
        g.branch,
        style.apply_to(format!("{:.1}", report.entropy_bits))
    );

    if let Some(bits) = report.fallback_entropy_bits {
        let crack_time = report.fallback_crack_time.as_deref().unwrap_or("-");
        println!(
            "  {} Charset    {:.1} bits, {}",
            g.branch, bits, crack_time
        );
    }
    if let Some(reason) = &report.fallback_reason {
        println!("  {} Fallback   {}", g.branch, reason);
    }
    for m in &report.matched_patterns {
        let source = m.dictionary_name.as_deref().unwrap_or(&m.pattern);
        let leet = if m.l33t { " (l33t)" } else { "" };
        println!("  {} Pattern    {}{}", g.branch, source, leet);
    }
    if let Some(warning) = &report.warning {
        let warn_style = if options.color_support {
            Style::new().yellow()
        } else {
            Style::new()
        };
        println!("  {} Warning    {}", g.branch, warn_style.apply_to(warning));
    }

    if report.suggestions.is_empty() {
        println!("  {} Crack time {}", g.last, report.crack_time);
    } else {
        println!("  {} Crack time {}", g.branch, report.crack_time);
        println!("  {} Suggestions", g.last);
        for (i, suggestion) in report.suggestions.iter().enumerate() {
            let prefix = if i == report.suggestions.len() - 1 {
                g.last
            } else {
                g.branch
            };
            println!("     {} {}", prefix, suggestion);
        }
    }

    println!();
}

pub fn display_generation_summary(
    summary: &GenerationSummary<'_>,
    options: &DisplayOptions,
) -> Result<()> {
    if options.quiet {
        return Ok(());
    }

    let (check_ok, check_warn) = get_status_symbols(options.unicode_support);
    let g = glyphs(options.unicode_support);
    let term = Term::stderr();

    let complete = summary.target.is_none_or(|t| summary.word_count >= t);
    let style = if !options.color_support {
        Style::new()
    } else if complete {
        Style::new().green()
    } else {
        Style::new().yellow()
    };
    let status = if complete { check_ok } else { check_warn };

    term.write_line("Stats:")?;
    term.write_line(&format!(
        "  {} Seeds      {}",
        g.branch, summary.seed_count
    ))?;
    term.write_line(&format!(
        "  {} Lengths    {}-{} chars",
        g.branch, summary.min_length, summary.max_length
    ))?;

    let target = summary
        .target
        .map_or_else(|| "default".to_string(), |t| t.to_string());
    term.write_line(&format!(
        "  {} Words      {} {} (target {})",
        g.branch,
        style.apply_to(format!("[{}]", status)),
        style.apply_to(summary.word_count),
        target
    ))?;

    if let Some(out) = summary.out {
        term.write_line(&format!("  {} Output     {}", g.branch, out.display()))?;
    }
    term.write_line(&format!(
        "  {} Time       {:.2}s",
        g.last,
        summary.elapsed.as_secs_f64()
    ))?;

    if !complete {
        term.write_line(&format!(
            "  {}  Seeds exhausted before the target was reached.",
            g.pipe
        ))?;
    }

    Ok(())
}
