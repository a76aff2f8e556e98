// Generic key/value extraction from line-oriented files, plus the field parsers shared by the
// system and process parsers.

use crate::error::{Error, Result};
use crate::procfsapi::ProcfsAPI;

// Returned by get_stat() when the file is unreadable or the key is absent.
pub const DEFAULT_STAT: &str = "0";

// Rewrites applied to every line before it is split into whitespace-separated tokens, so that
// files with other delimiters can be scanned by the same loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Normalization {
    Plain,

    // KEY="some value" becomes `KEY  some_value `, so the value is a single token.  Callers must
    // turn '_' back into ' ' in the result.
    OsRelease,
}

impl Normalization {
    fn apply(self, line: &str) -> String {
        match self {
            Normalization::Plain => line.to_string(),
            Normalization::OsRelease => line.replace(' ', "_").replace('=', " ").replace('"', " "),
        }
    }
}

// Scan `text` line by line.  Each line is normalized and then read as alternating key and value
// tokens: (0,1), (2,3), and so on, with an unpaired trailing token ignored.  Return the value of
// the first pair whose key is `key`.

pub fn find_value(text: &str, key: &str, normalization: Normalization) -> Option<String> {
    for l in text.lines() {
        let line = normalization.apply(l);
        let fields = line.split_ascii_whitespace().collect::<Vec<&str>>();
        for pair in fields.chunks_exact(2) {
            if pair[0] == key {
                return Some(pair[1].to_string());
            }
        }
    }
    None
}

// Look up `key` in /proc/<filename>, falling back to "0" if the file can't be read or the key is
// not there.

pub fn get_stat(fs: &dyn ProcfsAPI, filename: &str, key: &str) -> String {
    match lookup_stat(fs, filename, key) {
        Ok(v) => v,
        Err(e) => {
            log::debug!("{e}, using {DEFAULT_STAT}");
            DEFAULT_STAT.to_string()
        }
    }
}

// Like get_stat() but distinguishes the missing file from the missing key.

pub fn lookup_stat(fs: &dyn ProcfsAPI, filename: &str, key: &str) -> Result<String> {
    let text = fs.read_to_string(filename)?;
    find_value(&text, key, Normalization::Plain)
        .ok_or_else(|| Error::missing(key, format!("/proc/{filename}")))
}

pub fn parse_u64(value: &str, path: &str, fieldname: &str) -> Result<u64> {
    value
        .parse::<u64>()
        .map_err(|_| Error::parse(fieldname, path, value))
}

// Parse fields[ix] as an unsigned number.  The /proc documentation numbers fields from 1, callers
// pass the zero-based index.

pub fn parse_u64_field(fields: &[&str], ix: usize, path: &str, fieldname: &str) -> Result<u64> {
    match fields.get(ix) {
        Some(v) => parse_u64(v, path, fieldname),
        None => Err(Error::missing(fieldname, path)),
    }
}

#[test]
pub fn find_value_pairs_test() {
    let text = "processes 3141\nprocs_running 2\nprocs_blocked 0\n";
    assert!(find_value(text, "procs_running", Normalization::Plain) == Some("2".to_string()));
    assert!(find_value(text, "procs_sleeping", Normalization::Plain).is_none());

    // Tokens pair up from the start of the line as (a,1) (b,c) (1,x), so "1" is a key only in the
    // third pair, and "c" is never a key.
    let text = "a 1 b c 1 x";
    assert!(find_value(text, "b", Normalization::Plain) == Some("c".to_string()));
    assert!(find_value(text, "1", Normalization::Plain) == Some("x".to_string()));
    assert!(find_value(text, "c", Normalization::Plain).is_none());
    assert!(find_value("a 1 b c 1", "1", Normalization::Plain).is_none());

    // An unpaired trailing token is never a key
    assert!(find_value("k v lonely", "lonely", Normalization::Plain).is_none());
}

#[test]
pub fn find_value_first_match_test() {
    let text = "Uid:\t1000\t1001\t1002\t1003\nUid:\t0\n";
    assert!(find_value(text, "Uid:", Normalization::Plain) == Some("1000".to_string()));
}

#[test]
pub fn find_value_os_release_test() {
    let text = "NAME=\"Ubuntu\"\nVERSION_ID=\"22.04\"\nPRETTY_NAME=\"Ubuntu 22.04.3 LTS\"\n";
    assert!(
        find_value(text, "PRETTY_NAME", Normalization::OsRelease)
            == Some("Ubuntu_22.04.3_LTS".to_string())
    );
    assert!(find_value("ID=alpine", "ID", Normalization::OsRelease) == Some("alpine".to_string()));
}

#[test]
pub fn parse_u64_field_test() {
    let xs = ["37", "-1", "42"];
    assert!(parse_u64_field(&xs, 0, "", "x").unwrap() == 37);
    assert!(parse_u64_field(&xs, 1, "", "x").is_err());
    assert!(parse_u64_field(&xs, 2, "", "x").unwrap() == 42);
    assert!(parse_u64_field(&xs, 3, "", "x") == Err(Error::missing("x", "")));
}
