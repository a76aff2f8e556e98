// System-wide facts from /proc and /etc.  https://man7.org/linux/man-pages/man5/proc.5.html

use crate::error::{Error, Result};
use crate::linux::statreader::{self, Normalization};
use crate::procfsapi::{self, ProcfsAPI};

// Columns of the aggregate `cpu` line of /proc/stat, after the label.  The discriminant is the
// column index.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(usize)]
pub enum CpuState {
    User = 0,
    Nice = 1,
    System = 2,
    Idle = 3,
    IoWait = 4,
    Irq = 5,
    SoftIrq = 6,
    Steal = 7,
    #[allow(dead_code)]
    Guest = 8,
    #[allow(dead_code)]
    GuestNice = 9,
}

impl CpuState {
    fn name(self) -> &'static str {
        match self {
            CpuState::User => "user",
            CpuState::Nice => "nice",
            CpuState::System => "system",
            CpuState::Idle => "idle",
            CpuState::IoWait => "iowait",
            CpuState::Irq => "irq",
            CpuState::SoftIrq => "softirq",
            CpuState::Steal => "steal",
            CpuState::Guest => "guest",
            CpuState::GuestNice => "guest_nice",
        }
    }
}

// Guest time is already accounted for in user and nice, so the totals stop at steal.
const ALL_STATES: [CpuState; 8] = [
    CpuState::User,
    CpuState::Nice,
    CpuState::System,
    CpuState::Idle,
    CpuState::IoWait,
    CpuState::Irq,
    CpuState::SoftIrq,
    CpuState::Steal,
];

const ACTIVE_STATES: [CpuState; 6] = [
    CpuState::User,
    CpuState::Nice,
    CpuState::System,
    CpuState::Irq,
    CpuState::SoftIrq,
    CpuState::Steal,
];

const IDLE_STATES: [CpuState; 2] = [CpuState::Idle, CpuState::IoWait];

// Figures in kB.
#[derive(Debug, PartialEq)]
pub struct Memory {
    pub total_kib: u64,
    pub free_kib: u64,
}

// The PRETTY_NAME of /etc/os-release, or "" if there is none.

pub fn operating_system(fs: &dyn ProcfsAPI) -> String {
    let text = match fs.read_etc_to_string(procfsapi::OS_RELEASE_FILE) {
        Ok(s) => s,
        Err(e) => {
            log::debug!("{e}");
            return "".to_string();
        }
    };
    match statreader::find_value(&text, "PRETTY_NAME", Normalization::OsRelease) {
        Some(name) => name.replace('_', " "),
        None => "".to_string(),
    }
}

// /proc/version reads "Linux version 6.5.0-14-generic (buildd@...) ...", we want the third word.

pub fn kernel(fs: &dyn ProcfsAPI) -> String {
    match fs.read_to_string(procfsapi::VERSION_FILE) {
        Ok(s) => match s.lines().next() {
            Some(l) => l.split_ascii_whitespace().nth(2).unwrap_or("").to_string(),
            None => "".to_string(),
        },
        Err(e) => {
            log::debug!("{e}");
            "".to_string()
        }
    }
}

// Enumerate all pids.  Non-numeric entries (self, net, sys, ...) and non-directories are ignored,
// as are names that overflow.  The order is the order of the directory listing.

pub fn pids(fs: &dyn ProcfsAPI) -> Result<Vec<usize>> {
    let mut pids = vec![];
    for entry in fs.read_dir_entries("")? {
        if !entry.is_dir || entry.name.is_empty() {
            continue;
        }
        if !entry.name.bytes().all(|c| c.is_ascii_digit()) {
            continue;
        }
        if let Ok(pid) = entry.name.parse::<usize>() {
            pids.push(pid);
        }
    }
    Ok(pids)
}

// Read MemTotal and MemFree from /proc/meminfo.  We expect "tag:\s+(\d+)\s+kB", roughly.

pub fn get_memory(fs: &dyn ProcfsAPI) -> Result<Memory> {
    let path = format!("/proc/{}", procfsapi::MEMINFO_FILE);
    let meminfo_s = fs.read_to_string(procfsapi::MEMINFO_FILE)?;
    let mut total = None;
    let mut free = None;
    for l in meminfo_s.lines() {
        let fields = l.split_ascii_whitespace().collect::<Vec<&str>>();
        match fields.first() {
            Some(&"MemTotal:") => {
                total = Some(statreader::parse_u64_field(&fields, 1, &path, "MemTotal:")?);
            }
            Some(&"MemFree:") => {
                free = Some(statreader::parse_u64_field(&fields, 1, &path, "MemFree:")?);
            }
            _ => {}
        }
    }
    match (total, free) {
        (None, _) => Err(Error::missing("MemTotal:", path)),
        (_, None) => Err(Error::missing("MemFree:", path)),
        (Some(total_kib), Some(free_kib)) => Ok(Memory {
            total_kib,
            free_kib,
        }),
    }
}

// Fraction of memory in use, in [0,1].

pub fn memory_utilization(fs: &dyn ProcfsAPI) -> Result<f64> {
    let Memory {
        total_kib,
        free_kib,
    } = get_memory(fs)?;
    if total_kib == 0 {
        return Err(Error::missing(
            "MemTotal:",
            format!("/proc/{}", procfsapi::MEMINFO_FILE),
        ));
    }
    Ok(total_kib.saturating_sub(free_kib) as f64 / total_kib as f64)
}

// Seconds since boot.  /proc/uptime is "12345.67 54321.00"; the first number is truncated.  An
// unreadable file yields 0.

pub fn uptime(fs: &dyn ProcfsAPI) -> Result<u64> {
    let path = format!("/proc/{}", procfsapi::UPTIME_FILE);
    let s = match fs.read_to_string(procfsapi::UPTIME_FILE) {
        Ok(s) => s,
        Err(e) => {
            log::debug!("{e}, using 0");
            return Ok(0);
        }
    };
    let first = match s.split_ascii_whitespace().next() {
        Some(x) => x,
        None => return Err(Error::missing("uptime", path)),
    };
    let secs = match first.split_once('.') {
        Some((whole, _)) => whole,
        None => first,
    };
    statreader::parse_u64(secs, &path, "uptime")
}

// The counters of the aggregate `cpu` line of /proc/stat, as text and in column order.  An
// unreadable file yields an empty vector.

pub fn cpu_utilization(fs: &dyn ProcfsAPI) -> Vec<String> {
    match fs.read_to_string(procfsapi::STAT_FILE) {
        Ok(s) => match s.lines().next() {
            Some(l) => l
                .split_ascii_whitespace()
                .skip(1)
                .map(|x| x.to_string())
                .collect::<Vec<String>>(),
            None => vec![],
        },
        Err(e) => {
            log::debug!("{e}");
            vec![]
        }
    }
}

fn sum_states(fs: &dyn ProcfsAPI, states: &[CpuState]) -> Result<u64> {
    let path = format!("/proc/{}", procfsapi::STAT_FILE);
    let values = cpu_utilization(fs);
    let fields = values.iter().map(|x| x.as_str()).collect::<Vec<&str>>();
    let mut sum = 0u64;
    for state in states {
        let ix = *state as usize;
        let n = statreader::parse_u64_field(&fields, ix, &path, state.name())?;
        sum = match sum.checked_add(n) {
            Some(x) => x,
            None => return Err(Error::parse(state.name(), path, fields[ix])),
        };
    }
    Ok(sum)
}

// Total jiffies, user through steal.

pub fn jiffies(fs: &dyn ProcfsAPI) -> Result<u64> {
    sum_states(fs, &ALL_STATES)
}

// Jiffies spent doing work: everything but idle and iowait.

pub fn active_jiffies(fs: &dyn ProcfsAPI) -> Result<u64> {
    sum_states(fs, &ACTIVE_STATES)
}

#[allow(dead_code)]
pub fn idle_jiffies(fs: &dyn ProcfsAPI) -> Result<u64> {
    sum_states(fs, &IDLE_STATES)
}

fn stat_count(fs: &dyn ProcfsAPI, key: &str) -> Result<u64> {
    let value = statreader::get_stat(fs, procfsapi::STAT_FILE, key);
    statreader::parse_u64(&value, &format!("/proc/{}", procfsapi::STAT_FILE), key)
}

// Processes and threads created since boot.

pub fn total_processes(fs: &dyn ProcfsAPI) -> Result<u64> {
    stat_count(fs, "processes")
}

pub fn running_processes(fs: &dyn ProcfsAPI) -> Result<u64> {
    stat_count(fs, "procs_running")
}
