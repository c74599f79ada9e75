use anstyle::{AnsiColor, Color, Style};

pub const HEADER: Style = Style::new()
    .fg_color(Some(Color::Ansi(AnsiColor::Green)))
    .bold();

pub const USAGE: Style = Style::new()
    .fg_color(Some(Color::Ansi(AnsiColor::Green)))
    .bold();

pub const LITERAL: Style = Style::new()
    .fg_color(Some(Color::Ansi(AnsiColor::Cyan)));

pub const BANNER: Style = Style::new()
    .fg_color(Some(Color::Ansi(AnsiColor::Blue)))
    .bold();

pub fn get_clap_styles() -> clap::builder::Styles {
    clap::builder::Styles::styled()
        .header(HEADER)
        .usage(USAGE)
        .literal(LITERAL)
        .placeholder(LITERAL)
}

/// The startup banner, one line per entry.
pub fn banner_lines() -> Vec<String> {
    let title = format!("uepack v{}", env!("CARGO_PKG_VERSION"));
    let subtitle = "Unreal Engine release packager";
    let width = title.len().max(subtitle.len()) + 2;
    let rule = "=".repeat(width + 2);
    vec![
        rule.clone(),
        format!("|{:^width$}|", title),
        format!("|{:^width$}|", subtitle),
        rule,
    ]
}

pub fn print_banner() {
    println!();
    for line in banner_lines() {
        println!("{BANNER}{line}{BANNER:#}");
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_lines_share_one_width() {
        let lines = banner_lines();
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|line| line.len() == lines[0].len()));
        assert!(lines[1].contains(env!("CARGO_PKG_VERSION")));
    }
}
