//! Parsers for the procfs counter files.
//!
//! These operate on file contents only, so they can be tested without touching the filesystem.

use crate::{CoreId, Error, Result, TimeCounters};

const WHAT_CORE: &str = "processor counters";
const WHAT_THREAD: &str = "thread counters";

/// `/proc/stat` processor lines carry at least user, nice, system and idle on every kernel we
/// support. Newer kernels append iowait, irq, softirq, steal, guest and guest_nice.
const MIN_CORE_COLUMNS: usize = 4;
const MAX_CORE_COLUMNS: usize = 9;

// Zero-based positions in the thread stat fields that follow the closing parenthesis of the
// thread name. Field N of proc_pid_stat(5) (one-based, counting pid and comm) is at N - 3.
const THREAD_UTIME_INDEX: usize = 11;
const THREAD_STIME_INDEX: usize = 12;
const THREAD_GUEST_TIME_INDEX: usize = 40;

/// Extracts the counters of one processor from the contents of `/proc/stat`.
///
/// The processor is found by its `cpuN` label, not by line position, so offline processors
/// missing from the file do not shift the lookup.
pub(crate) fn parse_core_counters(stat_contents: &str, core_id: CoreId) -> Result<TimeCounters> {
    let label = format!("cpu{core_id}");

    let columns = stat_contents
        .lines()
        .find_map(|line| {
            let mut fields = line.split_ascii_whitespace();
            (fields.next() == Some(label.as_str())).then_some(fields)
        })
        .ok_or_else(|| Error::parse(WHAT_CORE, format!("no '{label}' line is present")))?;

    let mut values = [0_u64; MAX_CORE_COLUMNS];
    let mut parsed_count = 0_usize;

    for (slot, column) in values.iter_mut().zip(columns) {
        *slot = column.parse().map_err(|inner| {
            Error::parse(
                WHAT_CORE,
                format!("'{column}' in the '{label}' line is not a tick count: {inner}"),
            )
        })?;

        parsed_count = parsed_count.saturating_add(1);
    }

    if parsed_count < MIN_CORE_COLUMNS {
        return Err(Error::parse(
            WHAT_CORE,
            format!(
                "the '{label}' line has {parsed_count} counters but at least {MIN_CORE_COLUMNS} are required"
            ),
        ));
    }

    Ok(TimeCounters::from_stat_columns(values))
}

/// Extracts the user and system time (and the guest time, if present) from the contents of a
/// thread `stat` file.
pub(crate) fn parse_thread_counters(stat_contents: &str) -> Result<TimeCounters> {
    // The thread name may itself contain spaces and parentheses, so everything up to the last
    // closing parenthesis belongs to the pid and name.
    let name_end = stat_contents
        .rfind(')')
        .ok_or_else(|| Error::parse(WHAT_THREAD, "the thread name is not parenthesized"))?;

    let fields: Vec<&str> = stat_contents
        .get(name_end.saturating_add(1)..)
        .unwrap_or_default()
        .split_ascii_whitespace()
        .collect();

    let user_time = thread_field(&fields, THREAD_UTIME_INDEX, "utime")?;
    let sys_time = thread_field(&fields, THREAD_STIME_INDEX, "stime")?;

    let counters = TimeCounters::new(user_time, sys_time);

    // guest_time only exists on newer kernels.
    if fields.len() > THREAD_GUEST_TIME_INDEX {
        let guest_time = thread_field(&fields, THREAD_GUEST_TIME_INDEX, "guest_time")?;
        return Ok(counters.with_guest_time(guest_time));
    }

    Ok(counters)
}

fn thread_field(fields: &[&str], index: usize, field_name: &str) -> Result<u64> {
    let raw = fields.get(index).ok_or_else(|| {
        Error::parse(
            WHAT_THREAD,
            format!(
                "the '{field_name}' field is missing, only {} fields follow the thread name",
                fields.len()
            ),
        )
    })?;

    raw.parse().map_err(|inner| {
        Error::parse(
            WHAT_THREAD,
            format!("'{raw}' in the '{field_name}' field is not a tick count: {inner}"),
        )
    })
}
