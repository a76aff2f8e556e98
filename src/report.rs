// One-shot text reports over the parsers, used by the command line front end.

use crate::error::Result;
use crate::format;
use crate::linux::{process, system};
use crate::processor;
use crate::systemapi::SystemAPI;

use std::io;

#[derive(Debug, PartialEq)]
pub struct SystemSnapshot {
    pub os_name: String,
    pub kernel: String,
    pub memory_utilization: f64,
    pub cpu_utilization: f64,
    pub total_processes: u64,
    pub running_processes: u64,
    pub uptime_secs: u64,
}

pub fn compute_system(system: &dyn SystemAPI) -> Result<SystemSnapshot> {
    let fs = system.get_procfs();
    Ok(SystemSnapshot {
        os_name: system::operating_system(fs),
        kernel: system::kernel(fs),
        memory_utilization: system::memory_utilization(fs)?,
        cpu_utilization: processor::utilization(fs)?,
        total_processes: system::total_processes(fs)?,
        running_processes: system::running_processes(fs)?,
        uptime_secs: system::uptime(fs)?,
    })
}

fn percent(x: f64) -> String {
    format!("{:.1}%", x * 100.0)
}

pub fn show_system(writer: &mut dyn io::Write, system: &dyn SystemAPI) -> Result<()> {
    let s = compute_system(system)?;
    let _ = writeln!(writer, "OS: {}", s.os_name);
    let _ = writeln!(writer, "Kernel: {}", s.kernel);
    let _ = writeln!(writer, "CPU: {}", percent(s.cpu_utilization));
    let _ = writeln!(writer, "Memory: {}", percent(s.memory_utilization));
    let _ = writeln!(writer, "Total Processes: {}", s.total_processes);
    let _ = writeln!(writer, "Running Processes: {}", s.running_processes);
    let _ = writeln!(writer, "Up Time: {}", format::elapsed_time(s.uptime_secs));
    Ok(())
}

pub fn show_pids(writer: &mut dyn io::Write, system: &dyn SystemAPI) -> Result<()> {
    let mut pids = system::pids(system.get_procfs())?;
    pids.sort();
    for pid in pids {
        let _ = writeln!(writer, "{pid}");
    }
    Ok(())
}

// Processes that can't be read (usually because they've exited) are reported on the log and
// skipped.

pub fn show_processes(writer: &mut dyn io::Write, system: &dyn SystemAPI, pids: &[usize]) {
    for pid in pids {
        match process::snapshot(system, *pid) {
            Ok(p) => {
                let _ = writeln!(
                    writer,
                    "{} {} {} {} {} {} {}",
                    p.pid,
                    p.uid,
                    p.user,
                    percent(p.cpu_utilization),
                    p.ram_mib,
                    format::elapsed_time(p.uptime_secs),
                    p.command
                );
            }
            Err(e) => {
                log::warn!("Skipping pid {pid}: {e}");
            }
        }
    }
}

#[cfg(test)]
use crate::mocksystem;
#[cfg(test)]
use std::collections::HashMap;

#[test]
pub fn show_system_test() {
    let mut files = HashMap::new();
    files.insert(
        "stat".to_string(),
        "cpu  10 20 30 40 5 6 7 8 0 0\nprocesses 500\nprocs_running 4\n".to_string(),
    );
    files.insert(
        "meminfo".to_string(),
        "MemTotal:  1000 kB\nMemFree:  400 kB\n".to_string(),
    );
    files.insert("uptime".to_string(), "3661.50 100.00\n".to_string());
    files.insert(
        "version".to_string(),
        "Linux version 6.1.0-13-amd64 (debian-kernel@lists.debian.org)\n".to_string(),
    );
    let mut etc = HashMap::new();
    etc.insert(
        "os-release".to_string(),
        "PRETTY_NAME=\"Debian GNU/Linux 12 (bookworm)\"\n".to_string(),
    );
    let system = mocksystem::Builder::new()
        .with_proc_files(files)
        .with_etc_files(etc)
        .freeze();

    let mut out: Vec<u8> = vec![];
    show_system(&mut out, &system).unwrap();
    let text = String::from_utf8(out).unwrap();
    // cpu = 81 * 2 / 126
    let expected = "OS: Debian GNU/Linux 12 (bookworm)
Kernel: 6.1.0-13-amd64
CPU: 128.6%
Memory: 60.0%
Total Processes: 500
Running Processes: 4
Up Time: 1:1:1
";
    assert!(text == expected);
}

#[test]
pub fn show_system_error_test() {
    let system = mocksystem::Builder::new().freeze();
    let mut out: Vec<u8> = vec![];
    assert!(show_system(&mut out, &system).is_err());
    assert!(out.is_empty());
}

#[test]
pub fn show_pids_and_processes_test() {
    let mut files = HashMap::new();
    files.insert("uptime".to_string(), "1000.00 500.00\n".to_string());
    files.insert(
        "7/stat".to_string(),
        "7 (sleep) S 1 7 7 0 -1 4194560 100 0 0 0 300 100 0 0 20 0 1 0 50000 0 0".to_string(),
    );
    files.insert(
        "7/status".to_string(),
        "Uid:\t0\t0\t0\t0\nVmSize:\t    8192 kB\n".to_string(),
    );
    files.insert("7/cmdline".to_string(), "sleep\0infinity\0".to_string());
    let mut etc = HashMap::new();
    etc.insert("passwd".to_string(), "root:x:0:0:root:/root:/bin/bash\n".to_string());
    let system = mocksystem::Builder::new()
        .with_proc_files(files)
        .with_etc_files(etc)
        .with_pids(&[7, 3])
        .freeze();

    let mut out: Vec<u8> = vec![];
    show_pids(&mut out, &system).unwrap();
    assert!(String::from_utf8(out).unwrap() == "3\n7\n");

    // pid 3 has no files and is skipped
    let mut out: Vec<u8> = vec![];
    show_processes(&mut out, &system, &[3, 7]);
    assert!(String::from_utf8(out).unwrap() == "7 0 root 0.8% 8 0:8:20 sleep infinity\n");
}
