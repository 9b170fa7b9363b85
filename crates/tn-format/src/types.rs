/// Type names, one per line. Blank lines are skipped.
pub fn parse_type_names(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Names used when no type list is supplied: `T1..Tn`.
pub fn default_type_names(count: usize) -> Vec<String> {
    (1..=count).map(|n| format!("T{n}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crlf_list() {
        assert_eq!(parse_type_names("SER\r\nPLA\r\n\r\n"), vec!["SER", "PLA"]);
    }

    #[test]
    fn defaults() {
        assert_eq!(default_type_names(3), vec!["T1", "T2", "T3"]);
    }
}
