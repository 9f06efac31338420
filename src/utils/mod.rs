use std::borrow::Cow;
use std::path::Path;

pub trait PathExt {
    /// Final path component for console output, falling back to the full path.
    fn display_name(&self) -> Cow<'_, str>;
}

impl PathExt for Path {
    fn display_name(&self) -> Cow<'_, str> {
        match self.file_name() {
            Some(name) => name.to_string_lossy(),
            None => self.to_string_lossy(),
        }
    }
}
