use crate::reader::DocumentUnit;

/// One unit per line, numbered from 1. Blank lines keep their number.
pub fn parse(content: &str) -> Vec<DocumentUnit> {
    content
        .lines()
        .enumerate()
        .map(|(line_num, line)| DocumentUnit::new(line, line_num + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_parsing() {
        let units = parse("Hello world!\n\nThird line");

        assert_eq!(units.len(), 3);
        assert_eq!(units[0], DocumentUnit::new("Hello world!", 1));
        assert_eq!(units[1].text, "");
        assert_eq!(units[2].index, 3);
    }

    #[test]
    fn test_crlf_line_endings() {
        let units = parse("one\r\ntwo\r\n");
        assert_eq!(units, vec![DocumentUnit::new("one", 1), DocumentUnit::new("two", 2)]);
    }

    #[test]
    fn test_empty_content() {
        assert!(parse("").is_empty());
    }
}
