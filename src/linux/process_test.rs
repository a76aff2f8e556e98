use crate::error::Error;
use crate::linux::process;
use crate::mocksystem;
use crate::systemapi::SystemAPI;

use std::collections::HashMap;

const FIREFOX_STAT: &str = "4018 (firefox) S 2190 2189 2189 0 -1 4194560 19293188 3117638 1823 557 51361 15728 5390 2925 20 0 187 0 16400 5144358912 184775 18446744073709551615 94466859782144 94466860597976 140720852341888 0 0 0 0 4096 17663 0 0 0 17 4 0 0 0 0 0 94466860605280 94466860610840 94466863497216 140720852350777 140720852350820 140720852350820 140720852357069 0";

fn firefox_system() -> mocksystem::MockSystem {
    let mut files = HashMap::new();
    files.insert("uptime".to_string(), "350735.47 2690368.75\n".to_string());
    files.insert("4018/stat".to_string(), FIREFOX_STAT.to_string());
    files.insert(
        "4018/status".to_string(),
        std::include_str!("testdata/status.txt").to_string(),
    );
    files.insert(
        "4018/cmdline".to_string(),
        "/usr/lib/firefox/firefox\0-contentproc\0-childID\01\0".to_string(),
    );

    let mut etc = HashMap::new();
    etc.insert(
        "passwd".to_string(),
        std::include_str!("testdata/passwd.txt").to_string(),
    );

    mocksystem::Builder::new()
        .with_proc_files(files)
        .with_etc_files(etc)
        .with_pids(&[4018])
        .freeze()
}

#[test]
pub fn process_parse_test() {
    let ticks_per_sec = 100.0; // We define this
    let utime_ticks = 51361.0; // field(/proc/4018/stat, 14)
    let stime_ticks = 15728.0; // field(/proc/4018/stat, 15)
    let start_ticks = 16400.0; // field(/proc/4018/stat, 22)
    let uptime = 350735.0; // field(/proc/uptime, 1)

    let system = firefox_system();
    let fs = system.get_procfs();

    assert!(process::uid(fs, 4018) == "1000");
    assert!(process::user(fs, 4018) == "zappa");
    assert!(process::ram(fs, 4018).unwrap() == (5023788 / 1024).to_string());
    assert!(process::command(fs, 4018) == "/usr/lib/firefox/firefox -cont...");
    assert!(process::active_jiffies(fs, 4018).unwrap() == 51361 + 15728);

    let age = uptime - (start_ticks / ticks_per_sec);
    assert!(process::uptime(&system, 4018).unwrap() == age as u64);

    let expected = ((utime_ticks + stime_ticks) / ticks_per_sec) / age;
    let util = process::cpu_utilization(&system, 4018).unwrap();
    assert!((util - expected).abs() < 1e-12);

    let p = process::snapshot(&system, 4018).expect("Test: Must have data");
    assert!(p.pid == 4018);
    assert!(p.uid == "1000");
    assert!(p.user == "zappa");
    assert!(p.ram_mib == "4906");
    assert!(p.uptime_secs == 350571);
}

#[test]
pub fn command_truncation_test() {
    let mut files = HashMap::new();
    files.insert("1/cmdline".to_string(), "/sbin/init".to_string());
    files.insert(
        "2/cmdline".to_string(),
        "abcdefghijklmnopqrstuvwxyz0123".to_string(), // exactly 30
    );
    files.insert(
        "3/cmdline".to_string(),
        "abcdefghijklmnopqrstuvwxyz012".to_string(), // 29
    );
    files.insert(
        "4/cmdline".to_string(),
        "ÆØÅæøåÆØÅæøåÆØÅæøåÆØÅæøåÆØÅæøåÆØÅæøå".to_string(), // 36 multibyte
    );
    files.insert("5/cmdline".to_string(), "".to_string());
    let system = mocksystem::Builder::new().with_proc_files(files).freeze();
    let fs = system.get_procfs();

    assert!(process::command(fs, 1) == "/sbin/init");
    assert!(process::command(fs, 2) == "abcdefghijklmnopqrstuvwxyz0123...");
    assert!(process::command(fs, 3) == "abcdefghijklmnopqrstuvwxyz012");
    let c = process::command(fs, 4);
    assert!(c.chars().count() == 33);
    assert!(c.starts_with("ÆØÅæøå"));
    assert!(c.ends_with("..."));
    assert!(process::command(fs, 5) == "");
    assert!(process::command(fs, 6) == ""); // No such process
}

#[test]
pub fn user_lookup_test() {
    let mut files = HashMap::new();
    files.insert("10/status".to_string(), "Uid:\t0\t0\t0\t0\n".to_string());
    files.insert("11/status".to_string(), "Uid:\t65534\t65534\t65534\t65534\n".to_string());
    files.insert("12/status".to_string(), "Uid:\t4242\t4242\t4242\t4242\n".to_string());

    // systemd-network has gid 102, which must not be taken for a uid.
    files.insert("13/status".to_string(), "Uid:\t102\t102\t102\t102\n".to_string());
    files.insert("14/status".to_string(), "Name:\tkthreadd\n".to_string());

    let mut etc = HashMap::new();
    etc.insert(
        "passwd".to_string(),
        std::include_str!("testdata/passwd.txt").to_string(),
    );
    let system = mocksystem::Builder::new()
        .with_proc_files(files)
        .with_etc_files(etc)
        .freeze();
    let fs = system.get_procfs();

    assert!(process::user(fs, 10) == "root");
    assert!(process::user(fs, 11) == "nobody");
    assert!(process::user(fs, 12) == process::UNKNOWN_USER);
    assert!(process::user(fs, 13) == process::UNKNOWN_USER);
    assert!(process::user(fs, 14) == process::UNKNOWN_USER);
    assert!(process::user(fs, 15) == process::UNKNOWN_USER); // No such process

    // Without a password database nobody is known
    let mut files = HashMap::new();
    files.insert("10/status".to_string(), "Uid:\t0\t0\t0\t0\n".to_string());
    let system = mocksystem::Builder::new().with_proc_files(files).freeze();
    assert!(process::user(system.get_procfs(), 10) == process::UNKNOWN_USER);
}

#[test]
pub fn ram_test() {
    let mut files = HashMap::new();
    files.insert("20/status".to_string(), "VmSize:\t    1023 kB\n".to_string());
    files.insert("21/status".to_string(), "VmSize:\t    2048 kB\n".to_string());
    files.insert("22/status".to_string(), "Name:\tkworker/0:1\n".to_string());
    files.insert("23/status".to_string(), "VmSize:\t    big kB\n".to_string());
    let system = mocksystem::Builder::new().with_proc_files(files).freeze();
    let fs = system.get_procfs();

    assert!(process::ram(fs, 20).unwrap() == "0");
    assert!(process::ram(fs, 21).unwrap() == "2");
    assert!(process::ram(fs, 22).unwrap() == "0");
    assert!(process::ram(fs, 23) == Err(Error::parse("VmSize:", "/proc/23/status", "big")));
    assert!(process::uid(fs, 22) == "0");
}

#[test]
pub fn stat_with_spaces_in_command_test() {
    let mut files = HashMap::new();
    files.insert("uptime".to_string(), "1000.00 500.00\n".to_string());
    files.insert(
        "30/stat".to_string(),
        "30 (Web Content (x)) S 1 30 30 0 -1 4194560 100 0 0 0 250 150 0 0 20 0 1 0 20000 0 0".to_string(),
    );
    let system = mocksystem::Builder::new().with_proc_files(files).freeze();

    assert!(process::active_jiffies(system.get_procfs(), 30).unwrap() == 400);
    assert!(process::uptime(&system, 30).unwrap() == 800);
    let util = process::cpu_utilization(&system, 30).unwrap();
    assert!((util - 4.0 / 800.0).abs() < 1e-12);
}

#[test]
pub fn stat_errors_test() {
    let mut files = HashMap::new();
    files.insert("uptime".to_string(), "10.00 5.00\n".to_string());
    files.insert("40/stat".to_string(), "40 garbage".to_string());
    files.insert("41/stat".to_string(), "41 (short) S 1 2 3".to_string());

    // Started after the uptime we read, which happens with racing reads
    files.insert(
        "42/stat".to_string(),
        "42 (late) R 1 42 42 0 -1 0 0 0 0 0 0 0 0 0 20 0 1 0 5000 0 0".to_string(),
    );
    let system = mocksystem::Builder::new().with_proc_files(files).freeze();
    let fs = system.get_procfs();

    assert!(process::active_jiffies(fs, 40).is_err());
    assert!(process::active_jiffies(fs, 41) == Err(Error::missing("utime", "/proc/41/stat")));
    assert!(process::active_jiffies(fs, 43) == Err(Error::not_found("/proc/43/stat")));
    assert!(process::uptime(&system, 42).unwrap() == 0);
    assert!(process::cpu_utilization(&system, 42).unwrap() == 0.0);
    assert!(process::snapshot(&system, 43).is_err());

    let system = mocksystem::Builder::new()
        .with_proc_files(HashMap::new())
        .with_ticks_per_sec(0)
        .freeze();
    assert!(process::uptime(&system, 42) == Err(Error::missing("CLK_TCK", "sysconf")));
}

#[test]
pub fn active_jiffies_overflow_test() {
    let mut files = HashMap::new();
    files.insert(
        "9/stat".to_string(),
        "9 (spin) R 1 9 9 0 -1 0 0 0 0 0 18446744073709551615 1 0 0 20 0 1 0 100 0 0".to_string(),
    );
    let system = mocksystem::Builder::new().with_proc_files(files).freeze();
    assert!(
        process::active_jiffies(system.get_procfs(), 9)
            == Err(Error::parse("stime", "/proc/9/stat", "1"))
    );
}
