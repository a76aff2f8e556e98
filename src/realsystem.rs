use crate::procfsapi;
use crate::realprocfs;
use crate::systemapi;

pub struct RealSystem {
    fs: realprocfs::RealProcFS,
}

impl RealSystem {
    pub fn new() -> RealSystem {
        RealSystem {
            fs: realprocfs::RealProcFS::new(),
        }
    }
}

impl systemapi::SystemAPI for RealSystem {
    fn get_procfs(&self) -> &dyn procfsapi::ProcfsAPI {
        &self.fs
    }

    fn get_clock_ticks_per_sec(&self) -> usize {
        let ticks = unsafe { libc::sysconf(libc::_SC_CLK_TCK) };
        if ticks <= 0 {
            0
        } else {
            ticks as usize
        }
    }
}
