use num_format::{Locale, ToFormattedString};

/// Plain text table builder used to render reports for humans
pub struct StatsReport {
    pub output: String,
    pub label_width: usize,
}

impl Default for StatsReport {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsReport {
    pub fn new() -> Self {
        Self { output: String::new(), label_width: 20 }
    }

    pub fn set_label_width(&mut self, width: usize) {
        self.label_width = width;
    }

    pub fn title(&mut self, label: &str) {
        self.output += &format!("\n{label}\n{}\n", "-".repeat(label.len()));
    }

    pub fn add_count(&mut self, label: &str, count: u64) {
        self.output += &format!(
            "{:<label_width$} {:>15}\n",
            label,
            count.to_formatted_string(&Locale::en),
            label_width = self.label_width
        );
    }

    pub fn title_top_count_perc(&mut self, title: &str) {
        self.output += &format!(
            "\n{title}\n{}\n{:>15} {:>7} mnemonic\n",
            "-".repeat(std::cmp::min(title.len(), 38)),
            "count",
            "%",
        );
    }

    pub fn add_top_count_perc(&mut self, label: &str, count: u64, perc: f64) {
        self.output += &format!(
            "{:>15} {:6.2}% {label}\n",
            count.to_formatted_string(&Locale::en),
            perc
        );
    }

    pub fn add_separator(&mut self) {
        self.output += &format!("{}\n", "-".repeat(38));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_count_uses_thousands_separators() {
        let mut report = StatsReport::new();
        report.set_label_width(10);
        report.add_count("total", 1234567);
        assert_eq!(report.output, format!("{:<10} {:>15}\n", "total", "1,234,567"));
    }

    #[test]
    fn test_add_top_count_perc() {
        let mut report = StatsReport::new();
        report.add_top_count_perc("ADD", 1000, 50.0);
        assert_eq!(report.output, format!("{:>15}  50.00% ADD\n", "1,000"));
    }

    #[test]
    fn test_title_is_underlined() {
        let mut report = StatsReport::new();
        report.title("Top");
        report.add_separator();
        assert_eq!(report.output, format!("\nTop\n---\n{}\n", "-".repeat(38)));
    }
}
