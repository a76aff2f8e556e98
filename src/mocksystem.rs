use crate::mockfs::MockFS;
use crate::procfsapi;
use crate::systemapi;

use std::collections::HashMap;

#[derive(Default)]
pub struct Builder {
    proc_files: Option<HashMap<String, String>>,
    etc_files: Option<HashMap<String, String>>,
    entries: Option<Vec<procfsapi::DirEntry>>,
    ticks_per_sec: Option<usize>,
}

#[allow(dead_code)]
impl Builder {
    pub fn new() -> Builder {
        Builder {
            ..Default::default()
        }
    }

    // Files below /proc
    pub fn with_proc_files(self, files: HashMap<String, String>) -> Builder {
        Builder {
            proc_files: Some(files),
            ..self
        }
    }

    // Files below /etc
    pub fn with_etc_files(self, files: HashMap<String, String>) -> Builder {
        Builder {
            etc_files: Some(files),
            ..self
        }
    }

    // Raw entries of the /proc directory, numeric or not.  Without entries or pids, /proc can't
    // be listed.
    pub fn with_entries(self, entries: Vec<procfsapi::DirEntry>) -> Builder {
        Builder {
            entries: Some(entries),
            ..self
        }
    }

    // Shorthand for a /proc listing that has only these pid directories.
    pub fn with_pids(self, pids: &[usize]) -> Builder {
        Builder {
            entries: Some(
                pids.iter()
                    .map(|pid| procfsapi::DirEntry {
                        name: pid.to_string(),
                        is_dir: true,
                    })
                    .collect::<Vec<procfsapi::DirEntry>>(),
            ),
            ..self
        }
    }

    pub fn with_ticks_per_sec(self, ticks_per_sec: usize) -> Builder {
        Builder {
            ticks_per_sec: Some(ticks_per_sec),
            ..self
        }
    }

    pub fn freeze(self) -> MockSystem {
        MockSystem {
            fs: MockFS::new(
                self.proc_files.unwrap_or_default(),
                self.etc_files.unwrap_or_default(),
                self.entries,
            ),
            ticks_per_sec: if let Some(x) = self.ticks_per_sec {
                x
            } else {
                100
            },
        }
    }
}

pub struct MockSystem {
    fs: MockFS,
    ticks_per_sec: usize,
}

impl systemapi::SystemAPI for MockSystem {
    fn get_procfs(&self) -> &dyn procfsapi::ProcfsAPI {
        &self.fs
    }

    fn get_clock_ticks_per_sec(&self) -> usize {
        self.ticks_per_sec
    }
}
