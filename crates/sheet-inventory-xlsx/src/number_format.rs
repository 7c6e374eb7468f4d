//! Number format codes
//!
//! Formats are surfaced as display metadata. The only decision the reader
//! takes from them is whether a numeric cell holds a date/time.

/// Number format attached to a cell through its style
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum NumberFormat {
    /// General format (default)
    #[default]
    General,

    /// Built-in format by ID
    BuiltIn(u32),

    /// Custom format string from `styles.xml`
    Custom(String),
}

impl NumberFormat {
    /// Resolve a `numFmtId` against the custom formats of a workbook
    pub fn from_id(id: u32, custom: Option<&str>) -> Self {
        match (id, custom) {
            (_, Some(code)) => NumberFormat::Custom(code.to_string()),
            (0, None) => NumberFormat::General,
            (id, None) => NumberFormat::BuiltIn(id),
        }
    }

    /// Get the format string
    pub fn format_string(&self) -> &str {
        match self {
            NumberFormat::General => "General",
            NumberFormat::BuiltIn(id) => Self::builtin_format_string(*id),
            NumberFormat::Custom(s) => s,
        }
    }

    /// Get built-in format string by ID
    fn builtin_format_string(id: u32) -> &'static str {
        match id {
            0 => "General",
            1 => "0",
            2 => "0.00",
            3 => "#,##0",
            4 => "#,##0.00",
            9 => "0%",
            10 => "0.00%",
            11 => "0.00E+00",
            12 => "# ?/?",
            13 => "# ??/??",
            14 => "mm-dd-yy",
            15 => "d-mmm-yy",
            16 => "d-mmm",
            17 => "mmm-yy",
            18 => "h:mm AM/PM",
            19 => "h:mm:ss AM/PM",
            20 => "h:mm",
            21 => "h:mm:ss",
            22 => "m/d/yy h:mm",
            37 => "#,##0 ;(#,##0)",
            38 => "#,##0 ;[Red](#,##0)",
            39 => "#,##0.00;(#,##0.00)",
            40 => "#,##0.00;[Red](#,##0.00)",
            45 => "mm:ss",
            46 => "[h]:mm:ss",
            47 => "mmss.0",
            48 => "##0.0E+0",
            49 => "@",
            _ => "General",
        }
    }

    /// Check if this is a date/time format
    ///
    /// Built-in ids 14-22 and 45-47 are dates/times, as are the locale
    /// dependent ids 27-36 and 50-58. Custom codes count as dates when a
    /// `d`, `m`, `y`, `h` or `s` placeholder survives after quoted text,
    /// escaped characters and bracketed sections (colors, conditions,
    /// locales) are removed. Elapsed-time brackets like `[h]` count too.
    pub fn is_date_format(&self) -> bool {
        match self {
            NumberFormat::General => false,
            NumberFormat::BuiltIn(id) => {
                matches!(id, 14..=22 | 27..=36 | 45..=47 | 50..=58)
            }
            NumberFormat::Custom(code) => is_date_code(code),
        }
    }
}

fn is_date_code(code: &str) -> bool {
    if code.eq_ignore_ascii_case("general") {
        return false;
    }

    // Only the first (positive) section decides
    let mut chars = code.chars().peekable();
    let mut in_quotes = false;
    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                in_quotes = false;
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            '\\' | '_' | '*' => {
                chars.next();
            }
            ';' => return false,
            '[' => {
                let mut inner = String::new();
                for c in chars.by_ref() {
                    if c == ']' {
                        break;
                    }
                    inner.push(c);
                }
                let inner = inner.to_ascii_lowercase();
                if !inner.is_empty() && inner.chars().all(|c| matches!(c, 'h' | 'm' | 's')) {
                    return true;
                }
            }
            'd' | 'D' | 'm' | 'M' | 'y' | 'Y' | 'h' | 'H' | 's' | 'S' => return true,
            _ => {}
        }
    }

    false
}
