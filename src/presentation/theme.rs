use colored::Colorize;

pub struct Theme {
    pub question: fn(&str) -> String,
    pub value: fn(&str) -> String,
    pub label: fn(&str) -> String,
    pub sql: fn(&str) -> String,
    pub line: fn(&str) -> String,
    pub error: fn(&str) -> String,
    pub hint: fn(&str) -> String,
}

impl Theme {
    pub fn from_name(name: &str) -> Self {
        match name {
            "temp" | "" => Self::temp(),
            "wudao" => Self::wudao(),
            "canvas" => Self::canvas(),
            _ => {
                eprintln!("{}", format!("✘ Unknown theme: {}", name).red());
                Self::temp()
            }
        }
    }

    fn temp() -> Self {
        Self {
            question: |s| s.bright_magenta().italic().bold().to_string(),
            value: |s| s.bright_white().bold().to_string(),
            label: |s| s.cyan().to_string(),
            sql: |s| s.yellow().to_string(),
            line: |s| s.bright_black().dimmed().to_string(),
            error: |s| s.red().bold().to_string(),
            hint: |s| s.bright_white().dimmed().italic().to_string(),
        }
    }

    fn wudao() -> Self {
        Self {
            question: |s| s.red().italic().bold().to_string(),
            value: |s| s.cyan().bold().to_string(),
            label: |s| s.green().italic().to_string(),
            sql: |s| s.bright_white().to_string(),
            line: |s| s.bright_black().dimmed().to_string(),
            error: |s| s.red().to_string(),
            hint: |s| s.bright_yellow().dimmed().italic().to_string(),
        }
    }

    fn canvas() -> Self {
        Self {
            question: |s| s.blue().bold().underline().to_string(),
            value: |s| s.magenta().bold().to_string(),
            label: |s| s.bright_cyan().bold().to_string(),
            sql: |s| s.black().to_string(),
            line: |s| s.bright_black().dimmed().to_string(),
            error: |s| s.red().bold().to_string(),
            hint: |s| s.bright_black().italic().to_string(),
        }
    }
}
