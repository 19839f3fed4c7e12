use std::collections::BTreeMap;

use colored::{Color, ColoredString, Colorize};
use crossterm::terminal;

use crate::testing::{ExecutionResult, TestCase, Verdict};

#[macro_export]
macro_rules! print_success {
    ($fmt:literal, $($e:tt)*) => {{
        use ::colored::Colorize as _;
        println!("{}", format!($fmt, $($e)*).green())
    }}
}

const BOLD_LINE: &str = "━";
const THIN_LINE: &str = "─";

pub fn is_truecolor_supported() -> bool {
    let Ok(v) = std::env::var("COLORTERM") else {
        return false
    };
    matches!(v.as_str(), "truecolor" | "24bit")
}

pub trait ColorTheme {
    fn color(&self) -> Color;
}

impl ColorTheme for Verdict {
    fn color(&self) -> Color {
        use Verdict::*;
        if !self::is_truecolor_supported() {
            return match self {
                Exact | Accepted => Color::Green,
                WrongAnswer => Color::Yellow,
                RuntimeError => Color::Magenta,
            };
        }

        match self {
            Exact => Color::TrueColor {
                r: 30,
                g: 180,
                b: 40,
            },
            Accepted => Color::TrueColor {
                r: 40,
                g: 150,
                b: 120,
            },
            WrongAnswer => Color::TrueColor {
                r: 210,
                g: 138,
                b: 4,
            },
            RuntimeError => Color::TrueColor {
                r: 171,
                g: 40,
                b: 200,
            },
        }
    }
}

pub fn verdict_icon(verdict: Verdict) -> ColoredString {
    let fg = if is_truecolor_supported() {
        Color::TrueColor {
            r: 255,
            g: 255,
            b: 255,
        }
    } else {
        Color::BrightBlack
    };
    format!(" {} ", verdict)
        .on_color(verdict.color())
        .bold()
        .color(fg)
}

fn terminal_cols() -> usize {
    let (cols, _) = terminal::size().unwrap_or((40, 40));
    cols as usize
}

fn print_sub_title(s: &str, cols: usize) {
    println!(
        "{}{}",
        s.cyan().bold(),
        THIN_LINE.repeat(cols.saturating_sub(s.len() + 1)).bright_black(),
    )
}

/// Print `s` line by line, marking trailing whitespace and a missing final newline.
fn print_lines(s: &str) {
    let lines: Vec<_> = s.lines().collect();
    if lines.is_empty() {
        println!("{}", "<EMPTY>".magenta().dimmed());
        return;
    }
    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim_end();
        print!("{}", trimmed);

        let num_trailing_whitespace = line.len() - trimmed.len();
        if num_trailing_whitespace > 0 {
            print!(
                "{}{}",
                " ".repeat(num_trailing_whitespace).on_red(),
                "(Trailing whitespace)".bright_red().bold()
            );
        }

        let is_last_line = i + 1 == lines.len();
        if is_last_line && !s.ends_with('\n') {
            print!("{}", " Missing new line ".on_yellow().black().bold());
        }

        println!();
    }
}

/// Printed right before the program starts, so that echoed output follows it.
pub fn print_case_header(case: usize) {
    print_sub_title(&format!("[Case #{}: output]", case), terminal_cols());
}

/// `show_output` prints the captured stdout too (for runs without live echo).
pub fn print_case_report(
    case: usize,
    testcase: &TestCase,
    res: &ExecutionResult,
    show_output: bool,
) {
    let cols = terminal_cols();

    if res.verdict != Verdict::Exact {
        if show_output {
            print_sub_title("[stdout]", cols);
            print_lines(&res.output);
        }
        print_sub_title("[answer]", cols);
        print_lines(&testcase.answer);
        if res.verdict == Verdict::RuntimeError {
            let status = match res.status {
                Some(code) => format!("exitcode={}", code),
                None => "terminated by signal".to_owned(),
            };
            println!("{}", status.bright_red());
        }
    }

    println!(
        "{} {}: {} [{}ms] {}\n",
        "===".blue().bold(),
        format!("Case #{}", case).color(Color::BrightYellow).bold(),
        self::verdict_icon(res.verdict),
        res.execution_time.as_millis(),
        "===".blue().bold(),
    );
}

pub fn print_summary(results: &[ExecutionResult]) {
    let bar = BOLD_LINE.repeat(5).blue();
    print!("{} ", bar);

    let count: BTreeMap<Verdict, usize> = results.iter().fold(BTreeMap::new(), |mut count, r| {
        *count.entry(r.verdict).or_default() += 1;
        count
    });

    let num_total_test = results.len();
    let num_passed = results.iter().filter(|r| r.verdict.is_accepted()).count();
    let num_failed = num_total_test - num_passed;

    if num_passed == num_total_test {
        let msg = format!("All {} tests passed ✨", num_total_test);
        print!("{}", msg.green());
    } else {
        let summary_msg = if num_passed > 0 {
            format!("{}/{} tests failed 💣", num_failed, num_total_test)
        } else {
            format!("All {} tests failed 💀", num_total_test)
        };
        print!("{}", summary_msg.bright_red());
    }

    let detail_msg = count
        .iter()
        .map(|(&verdict, &cnt)| {
            format!(
                "{}{}{}",
                self::verdict_icon(verdict),
                "x".dimmed(),
                cnt.to_string().bold().bright_white(),
            )
        })
        .collect::<Vec<String>>()
        .join(", ");
    if !detail_msg.is_empty() {
        print!(" ({})", detail_msg);
    }

    println!(" {}", bar);
}
