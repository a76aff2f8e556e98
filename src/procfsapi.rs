use crate::error::Result;

// Abstraction to the files we scrape, implemented differently by real systems and by test
// harnesses.  All paths are relative: `read_to_string("1234/status")` reads /proc/1234/status.

pub const PROC_DIR: &str = "/proc";
pub const ETC_DIR: &str = "/etc";

// Files below /proc
pub const VERSION_FILE: &str = "version";
pub const UPTIME_FILE: &str = "uptime";
pub const MEMINFO_FILE: &str = "meminfo";
pub const STAT_FILE: &str = "stat";

// Files below /proc/<pid>
pub const PID_STAT_FILE: &str = "stat";
pub const PID_STATUS_FILE: &str = "status";
pub const PID_CMDLINE_FILE: &str = "cmdline";

// Files below /etc
pub const OS_RELEASE_FILE: &str = "os-release";
pub const PASSWD_FILE: &str = "passwd";

pub fn pid_path(pid: usize, file: &str) -> String {
    format!("{pid}/{file}")
}

// One entry of a directory listing.  `is_dir` is false for anything that is not a directory,
// including entries whose type could not be determined.
#[derive(Clone, Debug, PartialEq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

pub trait ProcfsAPI {
    // Open /proc/<path> (which can have multiple path elements, eg, {PID}/filename), read it, and
    // return its entire contents as a string.  Return Error::NotFound if the file can't be opened
    // or read.
    fn read_to_string(&self, path: &str) -> Result<String>;

    // Same, for /etc/<path>.
    fn read_etc_to_string(&self, path: &str) -> Result<String>;

    // Return every entry of /proc/<path>, where path can be empty.  Entries that can't be inspected
    // are skipped; only failing to open the directory at all is an error.
    fn read_dir_entries(&self, path: &str) -> Result<Vec<DirEntry>>;
}
