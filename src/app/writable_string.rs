use std::io::Write;

/// A `String` buffer usable where clap expects a writer, used to log help messages line by line.
#[derive(Default)]
pub(crate) struct WritableString(String);

impl WritableString {
    /// Iterates over the lines written so far.
    pub(crate) fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.split('\n')
    }
}

impl Write for WritableString {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.push_str(&String::from_utf8_lossy(buf));
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl std::fmt::Display for WritableString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_and_display() {
        let mut s = WritableString::default();
        write!(s, "usage:").unwrap();
        write!(s, "\n  domchart").unwrap();
        s.flush().unwrap();
        assert_eq!("usage:\n  domchart", s.to_string());
        assert_eq!(vec!["usage:", "  domchart"], s.lines().collect::<Vec<_>>());
    }
}
