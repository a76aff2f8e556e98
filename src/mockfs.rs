// MockFS is used for testing, it is instantiated with the values we want it to return.

use crate::error::{Error, Result};
use crate::procfsapi;

use std::collections::HashMap;

pub struct MockFS {
    proc_files: HashMap<String, String>,
    etc_files: HashMap<String, String>,
    entries: Option<Vec<procfsapi::DirEntry>>,
}

impl MockFS {
    pub fn new(
        proc_files: HashMap<String, String>,
        etc_files: HashMap<String, String>,
        entries: Option<Vec<procfsapi::DirEntry>>,
    ) -> MockFS {
        MockFS {
            proc_files,
            etc_files,
            entries,
        }
    }
}

impl procfsapi::ProcfsAPI for MockFS {
    fn read_to_string(&self, path: &str) -> Result<String> {
        match self.proc_files.get(path) {
            Some(s) => Ok(s.clone()),
            None => Err(Error::not_found(format!("/proc/{path}"))),
        }
    }

    fn read_etc_to_string(&self, path: &str) -> Result<String> {
        match self.etc_files.get(path) {
            Some(s) => Ok(s.clone()),
            None => Err(Error::not_found(format!("/etc/{path}"))),
        }
    }

    // Only the top-level /proc listing is modeled, and it is unreadable unless entries were given.
    fn read_dir_entries(&self, path: &str) -> Result<Vec<procfsapi::DirEntry>> {
        match (path.is_empty(), &self.entries) {
            (true, Some(entries)) => Ok(entries.clone()),
            (true, None) => Err(Error::not_found("/proc")),
            (false, _) => Err(Error::not_found(format!("/proc/{path}"))),
        }
    }
}
