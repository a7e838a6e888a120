use std::path::Path;

use crate::error::{DemoError, Result};

pub(crate) fn load_binary(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|err| DemoError::io(path, err))
}

pub(crate) fn load_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|err| DemoError::io(path, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_text_reads_file_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "@vertex fn vs_main() {{}}").unwrap();
        assert_eq!(load_text(file.path()).unwrap(), "@vertex fn vs_main() {}");
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_binary(Path::new("does/not/exist.png")).unwrap_err();
        assert!(matches!(err, DemoError::Io { ref path, .. } if path.ends_with("exist.png")));
    }
}
