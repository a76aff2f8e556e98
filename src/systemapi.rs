use crate::procfsapi;

pub trait SystemAPI {
    // The file layer that all parsers read through.
    fn get_procfs(&self) -> &dyn procfsapi::ProcfsAPI;

    // USER_HZ, the unit of the tick counters in /proc/stat and /proc/<pid>/stat.  Assumed never to
    // change while the system is running.  Zero means the value could not be obtained.
    fn get_clock_ticks_per_sec(&self) -> usize;
}
