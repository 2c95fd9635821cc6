//! CSV Output

use crate::report::Report;

const HEADER: &str = "kind,group,mean_ms,std_dev_ms,min_ms,max_ms,median_ms,samples";

/// Generate a CSV table with one row per (kind, group) statistic
pub fn generate_csv_report(report: &Report) -> String {
    let mut output = String::with_capacity(64 * (report.results.len() + 1));
    output.push_str(HEADER);
    output.push('\n');

    for row in &report.results {
        let s = &row.statistic;
        output.push_str(&format!(
            "{},{},{},{},{},{},{},{}\n",
            escape(&row.kind),
            escape(&row.group),
            s.mean,
            s.std_dev,
            s.min,
            s.max,
            s.median,
            s.sample_count
        ));
    }

    output
}

/// Quote a field when it contains a delimiter, quote or newline
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::sample_report;

    #[test]
    fn test_csv_rows() {
        let csv = generate_csv_report(&sample_report());
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], HEADER);
        assert_eq!(lines.len(), 5);
        assert!(lines[1].starts_with("scalar,sum,8,0,8,8,8,2"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("a,b"), "\"a,b\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
