//! Cumulative processor time counters.

/// Cumulative processor time counters of a processor or a thread, in kernel clock ticks.
///
/// The values are cumulative since boot (for a processor) or since thread creation (for a
/// thread) and never decrease for the same subject. Only the user and system time are used
/// to calculate utilization. The remaining counters are captured when the counter source
/// provides them (processor counters) and are zero otherwise.
///
/// # Examples
///
/// ```
/// use thread_utilization::TimeCounters;
///
/// let counters = TimeCounters::new(100, 50);
/// assert_eq!(counters.busy_sum(), 150);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[expect(
    clippy::struct_field_names,
    reason = "the names follow the procfs column names"
)]
pub struct TimeCounters {
    user_time: u64,
    nice_time: u64,
    sys_time: u64,
    idle_time: u64,
    iowait_time: u64,
    irq_time: u64,
    softirq_time: u64,
    steal_time: u64,
    guest_time: u64,
}

impl TimeCounters {
    /// Creates counters with the given user and system time, all other counters being zero.
    #[must_use]
    pub const fn new(user_time: u64, sys_time: u64) -> Self {
        Self {
            user_time,
            nice_time: 0,
            sys_time,
            idle_time: 0,
            iowait_time: 0,
            irq_time: 0,
            softirq_time: 0,
            steal_time: 0,
            guest_time: 0,
        }
    }

    /// Creates counters from the columns of a `/proc/stat` processor line, in file order:
    /// user, nice, system, idle, iowait, irq, softirq, steal, guest.
    #[must_use]
    pub(crate) const fn from_stat_columns(columns: [u64; 9]) -> Self {
        let [
            user_time,
            nice_time,
            sys_time,
            idle_time,
            iowait_time,
            irq_time,
            softirq_time,
            steal_time,
            guest_time,
        ] = columns;

        Self {
            user_time,
            nice_time,
            sys_time,
            idle_time,
            iowait_time,
            irq_time,
            softirq_time,
            steal_time,
            guest_time,
        }
    }

    /// Returns a copy with the guest time counter replaced.
    #[must_use]
    pub(crate) const fn with_guest_time(mut self, guest_time: u64) -> Self {
        self.guest_time = guest_time;
        self
    }

    /// Time spent executing in user mode.
    #[must_use]
    pub const fn user_time(&self) -> u64 {
        self.user_time
    }

    /// Time spent executing niced processes in user mode.
    #[must_use]
    pub const fn nice_time(&self) -> u64 {
        self.nice_time
    }

    /// Time spent executing in kernel mode.
    #[must_use]
    pub const fn sys_time(&self) -> u64 {
        self.sys_time
    }

    /// Time spent idle.
    #[must_use]
    pub const fn idle_time(&self) -> u64 {
        self.idle_time
    }

    /// Time spent waiting for I/O to complete.
    #[must_use]
    pub const fn iowait_time(&self) -> u64 {
        self.iowait_time
    }

    /// Time spent servicing hardware interrupts.
    #[must_use]
    pub const fn irq_time(&self) -> u64 {
        self.irq_time
    }

    /// Time spent servicing software interrupts.
    #[must_use]
    pub const fn softirq_time(&self) -> u64 {
        self.softirq_time
    }

    /// Time stolen by the hypervisor for other virtual machines.
    #[must_use]
    pub const fn steal_time(&self) -> u64 {
        self.steal_time
    }

    /// Time spent running a virtual processor for a guest operating system.
    #[must_use]
    pub const fn guest_time(&self) -> u64 {
        self.guest_time
    }

    /// The busy time: user time plus system time.
    #[must_use]
    pub const fn busy_sum(&self) -> u64 {
        self.user_time.saturating_add(self.sys_time)
    }
}
