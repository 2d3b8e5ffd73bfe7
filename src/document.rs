use crate::error::DocumentError;
use std::fs;
use std::path::{Path, PathBuf};

/// A line-oriented text document with structurally located regions.
///
/// Regions are found by substring match, rewritten wholesale, and the whole
/// document is written back on save. A marker that cannot be found is an
/// error rather than a silent no-op.
pub struct Document {
    path: PathBuf,
    lines: Vec<String>,
}

impl Document {
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        if !path.exists() {
            return Err(DocumentError::NotFound(path.to_path_buf()));
        }
        let content =
            fs::read_to_string(path).map_err(|e| DocumentError::Read(e, path.to_path_buf()))?;
        Ok(Self {
            path: path.to_path_buf(),
            lines: content.split('\n').map(str::to_string).collect(),
        })
    }

    /// Replaces the first line containing `marker` wholesale.
    pub fn replace_line_containing(
        &mut self,
        marker: &str,
        replacement: &str,
    ) -> Result<(), DocumentError> {
        let line = self
            .lines
            .iter_mut()
            .find(|line| line.contains(marker))
            .ok_or_else(|| DocumentError::MarkerNotFound(marker.to_string()))?;
        *line = replacement.to_string();
        Ok(())
    }

    /// Replaces the first block from the line containing `open` through the
    /// next line containing `close`, markers included, with `block`.
    pub fn replace_block(
        &mut self,
        open: &str,
        close: &str,
        block: Vec<String>,
    ) -> Result<(), DocumentError> {
        let start = self
            .lines
            .iter()
            .position(|line| line.contains(open))
            .ok_or_else(|| DocumentError::MarkerNotFound(open.to_string()))?;
        let end = self.lines[start..]
            .iter()
            .position(|line| line.contains(close))
            .map(|offset| start + offset)
            .ok_or(DocumentError::UnclosedBlock(start + 1))?;
        self.lines.splice(start..=end, block);
        Ok(())
    }

    pub fn save(&self) -> Result<(), DocumentError> {
        fs::write(&self.path, self.lines.join("\n"))
            .map_err(|e| DocumentError::Write(e, self.path.clone()))
    }

    pub fn contents(&self) -> String {
        self.lines.join("\n")
    }
}
