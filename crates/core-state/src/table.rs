//! The process-wide file table: `Files` are deduplicated by byte-equal
//! path and owned by this table for the life of the program; `Window`s
//! only ever hold a `FileId` handle (spec §3, §5, §9).

use crate::error::EditorError;
use crate::file::File;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId(pub usize);

#[derive(Default)]
pub struct FileTable {
    files: Vec<File>,
}

impl FileTable {
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    fn find(&self, path: &[u8]) -> Option<FileId> {
        self.files
            .iter()
            .position(|f| f.path() == path)
            .map(FileId)
    }

    /// `open_path` — returns the existing `FileId` if the path is already
    /// loaded (byte-equal), otherwise reads the file from disk and adds it.
    /// On failure no entry is added.
    pub fn open_path(&mut self, path: &[u8]) -> Result<FileId, EditorError> {
        if let Some(id) = self.find(path) {
            return Ok(id);
        }
        let file = File::open_path(path)?;
        self.files.push(file);
        Ok(FileId(self.files.len() - 1))
    }

    /// `create_path` — returns the existing `FileId` if already present,
    /// otherwise a fresh untitled file.
    pub fn create_path(&mut self, path: &[u8]) -> FileId {
        if let Some(id) = self.find(path) {
            return id;
        }
        let file = File::create_path(path);
        self.files.push(file);
        FileId(self.files.len() - 1)
    }

    pub fn get(&self, id: FileId) -> &File {
        &self.files[id.0]
    }

    pub fn get_mut(&mut self, id: FileId) -> &mut File {
        &mut self.files[id.0]
    }

    pub fn save(&mut self, id: FileId) -> Result<(), EditorError> {
        self.files[id.0].save()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_path_dedupes_by_byte_equal_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "hello").unwrap();
        let path_bytes = path.to_str().unwrap().as_bytes().to_vec();

        let mut table = FileTable::new();
        let id1 = table.open_path(&path_bytes).unwrap();
        let id2 = table.open_path(&path_bytes).unwrap();
        assert_eq!(id1, id2);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn failed_open_adds_no_entry() {
        let mut table = FileTable::new();
        assert!(table.open_path(b"/no/such/file").is_err());
        assert!(table.is_empty());
    }

    #[test]
    fn create_path_dedupes_too() {
        let mut table = FileTable::new();
        let id1 = table.create_path(b"untitled");
        let id2 = table.create_path(b"untitled");
        assert_eq!(id1, id2);
    }
}
