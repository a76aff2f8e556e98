use crate::error::{Error, Result};
use crate::procfsapi;

use std::fs;
use std::path;

// RealProcFS is used to actually access /proc and /etc.  Every call opens and closes its own file
// handle, nothing is cached.

pub struct RealProcFS {}

impl RealProcFS {
    pub fn new() -> RealProcFS {
        RealProcFS {}
    }
}

fn read_file(filename: String) -> Result<String> {
    match fs::read_to_string(path::Path::new(&filename)) {
        Ok(s) => Ok(s),
        Err(e) => {
            log::debug!("Reading {filename} failed: {e}");
            Err(Error::not_found(filename))
        }
    }
}

impl procfsapi::ProcfsAPI for RealProcFS {
    fn read_to_string(&self, path: &str) -> Result<String> {
        read_file(format!("{}/{path}", procfsapi::PROC_DIR))
    }

    fn read_etc_to_string(&self, path: &str) -> Result<String> {
        read_file(format!("{}/{path}", procfsapi::ETC_DIR))
    }

    fn read_dir_entries(&self, path: &str) -> Result<Vec<procfsapi::DirEntry>> {
        let dirname = if path.is_empty() {
            procfsapi::PROC_DIR.to_string()
        } else {
            format!("{}/{path}", procfsapi::PROC_DIR)
        };
        let dir = match fs::read_dir(&dirname) {
            Ok(dir) => dir,
            Err(e) => {
                log::debug!("Listing {dirname} failed: {e}");
                return Err(Error::not_found(dirname));
            }
        };
        let mut entries = vec![];
        for dirent in dir.flatten() {
            // Processes may vanish between readdir and the type query; skip those.
            let is_dir = match dirent.file_type() {
                Ok(t) => t.is_dir(),
                Err(_) => continue,
            };
            entries.push(procfsapi::DirEntry {
                name: dirent.file_name().to_string_lossy().to_string(),
                is_dir,
            });
        }
        Ok(entries)
    }
}
