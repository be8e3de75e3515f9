//! A probe for the resident memory of the current process.
//!
//! Used to report the memory cost of an analysis alongside a digest.
//! The probe is best-effort: on platforms where the process cannot be
//! inspected the reading is zero.

use sysinfo::{get_current_pid, ProcessExt, System, SystemExt};

/// The resident memory of the current process, in KB.
pub fn resident_memory_kb() -> u64 {
    let Ok(pid) = get_current_pid() else {
        return 0;
    };

    let mut system = System::new();
    system.refresh_process(pid);

    match system.process(pid) {
        Some(process) => process.memory() / 1024,
        None => 0,
    }
}
