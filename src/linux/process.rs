// Per-process facts from /proc/<pid>.  A pid may disappear at any time, so every query tolerates
// missing files the same way the system queries do.

use crate::error::{Error, Result};
use crate::linux::statreader;
use crate::linux::system;
use crate::procfsapi::{self, ProcfsAPI};
use crate::systemapi::SystemAPI;

pub const UNKNOWN_USER: &str = "unknown user";

// Longer command lines are cut to this many characters and marked with "...".
pub const MAX_COMMAND_LEN: usize = 30;

// NOTE relative to the `proc` documentation: field offsets below are relative to the command (so
// state is 0, not 3), and zero-based.
const UTIME_FIELD: usize = 11;
const STIME_FIELD: usize = 12;
const STARTTIME_FIELD: usize = 19;

#[derive(Debug, PartialEq)]
pub struct ProcessSnapshot {
    pub pid: usize,
    pub uid: String,
    pub user: String,
    pub command: String,
    pub ram_mib: String,
    pub uptime_secs: u64,
    pub cpu_utilization: f64,
}

// The command line, with argument separators shown as spaces.  Empty if the file can't be read,
// as it is for kernel threads.

pub fn command(fs: &dyn ProcfsAPI, pid: usize) -> String {
    let s = match fs.read_to_string(&procfsapi::pid_path(pid, procfsapi::PID_CMDLINE_FILE)) {
        Ok(s) => s,
        Err(e) => {
            log::debug!("{e}");
            return "".to_string();
        }
    };
    let line = s.lines().next().unwrap_or("").replace('\0', " ");
    let command = line.trim_end();
    if command.chars().count() >= MAX_COMMAND_LEN {
        let mut truncated = command.chars().take(MAX_COMMAND_LEN).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        command.to_string()
    }
}

// Virtual memory size in MB, as text.  "0" if VmSize is not there (kernel threads).

pub fn ram(fs: &dyn ProcfsAPI, pid: usize) -> Result<String> {
    let path = procfsapi::pid_path(pid, procfsapi::PID_STATUS_FILE);
    let kib = statreader::parse_u64(
        &statreader::get_stat(fs, &path, "VmSize:"),
        &format!("/proc/{path}"),
        "VmSize:",
    )?;
    Ok((kib / 1024).to_string())
}

// The real uid, the first of the four numbers on the Uid: line.

fn lookup_uid(fs: &dyn ProcfsAPI, pid: usize) -> Result<String> {
    statreader::lookup_stat(
        fs,
        &procfsapi::pid_path(pid, procfsapi::PID_STATUS_FILE),
        "Uid:",
    )
}

pub fn uid(fs: &dyn ProcfsAPI, pid: usize) -> String {
    match lookup_uid(fs, pid) {
        Ok(uid) => uid,
        Err(e) => {
            log::debug!("{e}, using {}", statreader::DEFAULT_STAT);
            statreader::DEFAULT_STAT.to_string()
        }
    }
}

// Map the process's uid to a name through /etc/passwd, whose lines are
// name:password:uid:gid:gecos:home:shell.

pub fn user(fs: &dyn ProcfsAPI, pid: usize) -> String {
    // Not uid(): its "0" default would attribute vanished processes to root.
    let uid = match lookup_uid(fs, pid) {
        Ok(uid) => uid,
        Err(e) => {
            log::debug!("{e}");
            return UNKNOWN_USER.to_string();
        }
    };
    let passwd = match fs.read_etc_to_string(procfsapi::PASSWD_FILE) {
        Ok(s) => s,
        Err(e) => {
            log::debug!("{e}");
            return UNKNOWN_USER.to_string();
        }
    };
    for l in passwd.lines() {
        let fields = l.split(':').collect::<Vec<&str>>();
        if fields.len() >= 3 && fields[2] == uid {
            return fields[0].to_string();
        }
    }
    UNKNOWN_USER.to_string()
}

// The fields of /proc/<pid>/stat that follow the command.  The command is between the first '('
// and the last ')' and may itself contain spaces and parentheses, so split after it.

fn stat_fields(fs: &dyn ProcfsAPI, pid: usize) -> Result<(String, Vec<String>)> {
    let path = format!(
        "/proc/{}",
        procfsapi::pid_path(pid, procfsapi::PID_STAT_FILE)
    );
    let line = fs.read_to_string(&procfsapi::pid_path(pid, procfsapi::PID_STAT_FILE))?;
    match line.rfind(')') {
        None => Err(Error::parse("comm", path, line)),
        Some(commend) => Ok((
            path,
            line[commend + 1..]
                .split_ascii_whitespace()
                .map(|x| x.to_string())
                .collect::<Vec<String>>(),
        )),
    }
}

// utime + stime, in ticks.

pub fn active_jiffies(fs: &dyn ProcfsAPI, pid: usize) -> Result<u64> {
    let (path, fields) = stat_fields(fs, pid)?;
    let fields = fields.iter().map(|x| x.as_str()).collect::<Vec<&str>>();
    let utime_ticks = statreader::parse_u64_field(&fields, UTIME_FIELD, &path, "utime")?;
    let stime_ticks = statreader::parse_u64_field(&fields, STIME_FIELD, &path, "stime")?;
    match utime_ticks.checked_add(stime_ticks) {
        Some(ticks) => Ok(ticks),
        None => Err(Error::parse("stime", path, fields[STIME_FIELD])),
    }
}

fn ticks_per_sec(system: &dyn SystemAPI) -> Result<u64> {
    match system.get_clock_ticks_per_sec() {
        0 => Err(Error::missing("CLK_TCK", "sysconf")),
        n => Ok(n as u64),
    }
}

// Age of the process in seconds: system uptime minus the start time.  The start time is in ticks
// since boot.

pub fn uptime(system: &dyn SystemAPI, pid: usize) -> Result<u64> {
    let fs = system.get_procfs();
    let ticks_per_sec = ticks_per_sec(system)?;
    let (path, fields) = stat_fields(fs, pid)?;
    let fields = fields.iter().map(|x| x.as_str()).collect::<Vec<&str>>();
    let start_ticks = statreader::parse_u64_field(&fields, STARTTIME_FIELD, &path, "starttime")?;
    Ok(system::uptime(fs)?.saturating_sub(start_ticks / ticks_per_sec))
}

// Average CPU utilization over the process's lifetime, 1.0 being one core fully busy.

pub fn cpu_utilization(system: &dyn SystemAPI, pid: usize) -> Result<f64> {
    let ticks_per_sec = ticks_per_sec(system)?;
    let age_secs = uptime(system, pid)?;
    if age_secs == 0 {
        return Ok(0.0);
    }
    let active_secs = active_jiffies(system.get_procfs(), pid)? as f64 / ticks_per_sec as f64;
    Ok(active_secs / age_secs as f64)
}

pub fn snapshot(system: &dyn SystemAPI, pid: usize) -> Result<ProcessSnapshot> {
    let fs = system.get_procfs();
    Ok(ProcessSnapshot {
        pid,
        uid: uid(fs, pid),
        user: user(fs, pid),
        command: command(fs, pid),
        ram_mib: ram(fs, pid)?,
        uptime_secs: uptime(system, pid)?,
        cpu_utilization: cpu_utilization(system, pid)?,
    })
}
