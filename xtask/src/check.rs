//! Workspace-wide quality checks.

use std::path::PathBuf;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use xshell::{Shell, cmd};

/// A named check and the function that runs it.
type Step = (&'static str, fn(&Shell) -> Result<()>);

const STEPS: [Step; 5] = [
    ("Formatting", run_fmt_check),
    ("Clippy", run_clippy),
    ("Tests", run_tests),
    ("Documentation", run_doc_check),
    ("Safety", run_safety_scan),
];

/// Run all checks. Outside CI mode failures are reported but not fatal.
pub fn run(ci_mode: bool) -> Result<()> {
    let sh = Shell::new()?;

    println!();
    println!("{}", "mesh-extrude Quality Check".bold());
    println!("{}", "==========================".bold());
    println!();

    let mut all_passed = true;
    for (name, step) in STEPS {
        println!("{}", format!("{name}...").dimmed());
        let result = step(&sh);
        report_result(name, &result);
        all_passed &= result.is_ok();
    }

    println!();

    if all_passed {
        println!("{}", "✓ All checks passed!".green().bold());
        Ok(())
    } else if ci_mode {
        println!("{}", "✗ Some checks failed.".red().bold());
        std::process::exit(1);
    } else {
        println!("{}", "⚠ Some checks failed. Fix before committing.".yellow());
        Ok(())
    }
}

/// Run the full CI suite, collecting every failure before exiting.
pub fn run_ci() -> Result<()> {
    let sh = Shell::new()?;

    println!();
    println!("{}", "mesh-extrude CI Suite".bold());
    println!("{}", "=====================".bold());
    println!();

    let mut failures = Vec::new();
    for (i, (name, step)) in STEPS.iter().enumerate() {
        println!("{}", format!("Step {}/{}: {name}...", i + 1, STEPS.len()).cyan());
        if let Err(e) = step(&sh) {
            failures.push(format!("{name}: {e}"));
            println!("  {} {name} failed", "✗".red());
        } else {
            println!("  {} {name} OK", "✓".green());
        }
    }

    println!();

    if failures.is_empty() {
        println!("{}", "  ✓ CI PASSED".green().bold());
        Ok(())
    } else {
        println!("{}", "  ✗ CI FAILED".red().bold());
        println!();
        println!("Failures:");
        for f in &failures {
            println!("  - {}", f.red());
        }
        std::process::exit(1);
    }
}

fn report_result(name: &str, result: &Result<()>) {
    match result {
        Ok(()) => println!("  {} {}", "✓".green(), name),
        Err(e) => println!("  {} {} - {}", "✗".red(), name, e),
    }
}

fn run_fmt_check(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo fmt --all -- --check")
        .run()
        .context("Formatting check failed")?;
    Ok(())
}

fn run_clippy(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo clippy --all-targets --all-features -- -D warnings")
        .run()
        .context("Clippy check failed")?;
    Ok(())
}

fn run_tests(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo test --all-features")
        .run()
        .context("Tests failed")?;
    Ok(())
}

fn run_doc_check(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo doc --no-deps --all-features")
        .env("RUSTDOCFLAGS", "-D warnings")
        .run()
        .context("Documentation build failed")?;
    Ok(())
}

/// Flag `unwrap`/`expect` calls in library sources.
///
/// Only code above a file's `#[cfg(test)]` module counts; doc comments and
/// `unwrap_or*` variants are ignored.
fn run_safety_scan(sh: &Shell) -> Result<()> {
    let files = library_sources(sh)?;
    if files.is_empty() {
        anyhow::bail!("No library sources found under mesh/*/src");
    }

    let mut violations = Vec::new();
    for path in &files {
        let source = sh
            .read_file(path)
            .with_context(|| format!("reading {}", path.display()))?;
        for (line_no, line) in library_lines(&source) {
            if line.contains(".unwrap()") || line.contains(".expect(") {
                violations.push(format!("{}:{line_no}", path.display()));
            }
        }
    }

    if !violations.is_empty() {
        anyhow::bail!(
            "Found {} unwrap/expect calls in library code: {}",
            violations.len(),
            violations.join(", ")
        );
    }

    Ok(())
}

/// Every `.rs` file in `mesh/<crate>/src`, sorted.
fn library_sources(sh: &Shell) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for crate_dir in sh.read_dir("mesh").context("listing mesh/")? {
        let src = crate_dir.join("src");
        if !src.is_dir() {
            continue;
        }
        for path in sh.read_dir(&src).with_context(|| format!("listing {}", src.display()))? {
            if path.extension().is_some_and(|ext| ext == "rs") {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}

/// Non-comment lines before the test module, numbered from 1.
fn library_lines(source: &str) -> impl Iterator<Item = (usize, &str)> {
    source
        .lines()
        .enumerate()
        .take_while(|(_, line)| !line.trim_start().starts_with("#[cfg(test)]"))
        .filter(|(_, line)| !line.trim_start().starts_with("//"))
        .map(|(i, line)| (i + 1, line))
}
