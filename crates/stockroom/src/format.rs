//! Number and currency formatting for the table and chart.

/// Separators and currency symbol used when writing numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberFormat {
    /// Symbol placed before currency amounts.
    pub currency_symbol: String,
    /// Separator between groups of three integer digits (may be empty).
    pub thousands_separator: String,
    /// Separator between the integer and fractional parts.
    pub decimal_separator: String,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            thousands_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
        }
    }
}

impl NumberFormat {
    /// Format an amount as currency with exactly two decimal places.
    ///
    /// ```
    /// use stockroom::format::NumberFormat;
    ///
    /// assert_eq!(NumberFormat::default().currency(1234.5), "$1,234.50");
    /// ```
    #[must_use]
    pub fn currency(&self, amount: f64) -> String {
        if amount.is_nan() {
            return format!("{}?", self.currency_symbol);
        }
        if amount.is_infinite() {
            let sign = if amount < 0.0 { "-" } else { "" };
            return format!("{sign}{}\u{221e}", self.currency_symbol);
        }
        let fixed = format!("{:.2}", amount.abs());
        let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
        let sign = if amount < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
            "-"
        } else {
            ""
        };
        format!(
            "{sign}{}{}{}{frac_part}",
            self.currency_symbol,
            self.group(int_part),
            self.decimal_separator
        )
    }

    /// Format a plain quantity using the shortest decimal that round-trips.
    ///
    /// Whole numbers have no fractional part; no digit grouping is applied.
    #[must_use]
    pub fn quantity(&self, value: f64) -> String {
        let plain = format!("{value}");
        if self.decimal_separator == "." {
            plain
        } else {
            plain.replace('.', &self.decimal_separator)
        }
    }

    /// Format a whole number with digit grouping.
    #[must_use]
    pub fn integer(&self, value: f64) -> String {
        let rounded = format!("{:.0}", value.abs());
        let sign = if value <= -0.5 { "-" } else { "" };
        format!("{sign}{}", self.group(&rounded))
    }

    /// Insert the thousands separator into a run of ASCII digits.
    fn group(&self, digits: &str) -> String {
        if self.thousands_separator.is_empty() || digits.len() <= 3 {
            return digits.to_string();
        }

        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        let lead = digits.len() % 3;
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (i + 3 - lead) % 3 == 0 {
                out.push_str(&self.thousands_separator);
            }
            out.push(ch);
        }
        out
    }
}
