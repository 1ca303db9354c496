//! Facade for switching between counter source implementations.

use std::sync::Arc;

#[cfg(test)]
use crate::pal::FakeCounterSource;
use crate::pal::{CounterSource, ProcfsCounterSource};
use crate::{CoreId, OsThreadId, Result, TimeCounters};

/// Hides the different counter source implementations behind a single type, so the tracker
/// does not need to be generic over the source.
#[derive(Clone, Debug)]
pub(crate) enum CounterSourceFacade {
    /// Reads the Linux procfs.
    Procfs(ProcfsCounterSource),

    /// A source supplied by the user of the package.
    Custom(Arc<dyn CounterSource>),

    #[cfg(test)]
    Fake(FakeCounterSource),
}

impl CounterSourceFacade {
    pub(crate) fn procfs(source: ProcfsCounterSource) -> Self {
        Self::Procfs(source)
    }

    pub(crate) fn custom(source: Arc<dyn CounterSource>) -> Self {
        Self::Custom(source)
    }

    #[cfg(test)]
    pub(crate) fn fake(source: FakeCounterSource) -> Self {
        Self::Fake(source)
    }
}

impl CounterSource for CounterSourceFacade {
    fn current_thread_id(&self) -> Result<OsThreadId> {
        match self {
            Self::Procfs(source) => source.current_thread_id(),
            Self::Custom(source) => source.current_thread_id(),
            #[cfg(test)]
            Self::Fake(source) => source.current_thread_id(),
        }
    }

    fn core_counters(&self, core_id: CoreId) -> Result<TimeCounters> {
        match self {
            Self::Procfs(source) => source.core_counters(core_id),
            Self::Custom(source) => source.core_counters(core_id),
            #[cfg(test)]
            Self::Fake(source) => source.core_counters(core_id),
        }
    }

    fn thread_counters(&self, thread_id: OsThreadId) -> Result<TimeCounters> {
        match self {
            Self::Procfs(source) => source.thread_counters(thread_id),
            Self::Custom(source) => source.thread_counters(thread_id),
            #[cfg(test)]
            Self::Fake(source) => source.thread_counters(thread_id),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Fixed;

    impl CounterSource for Fixed {
        fn current_thread_id(&self) -> Result<OsThreadId> {
            Ok(9)
        }

        fn core_counters(&self, core_id: CoreId) -> Result<TimeCounters> {
            Ok(TimeCounters::new(u64::from(core_id), 0))
        }

        fn thread_counters(&self, thread_id: OsThreadId) -> Result<TimeCounters> {
            Ok(TimeCounters::new(0, u64::from(thread_id)))
        }
    }

    #[test]
    fn custom_source_is_used() {
        let facade = CounterSourceFacade::custom(Arc::new(Fixed));

        assert_eq!(facade.current_thread_id().unwrap(), 9);
        assert_eq!(facade.core_counters(3).unwrap().user_time(), 3);
        assert_eq!(facade.thread_counters(4).unwrap().sys_time(), 4);
    }

    #[test]
    fn fake_source_is_used() {
        let fake = FakeCounterSource::new();
        fake.set_core_counters(1, TimeCounters::new(5, 5));
        fake.set_current_thread_id(77);

        let facade = CounterSourceFacade::fake(fake);

        assert_eq!(facade.current_thread_id().unwrap(), 77);
        assert_eq!(facade.core_counters(1).unwrap().busy_sum(), 10);
    }

    static_assertions::assert_impl_all!(CounterSourceFacade: Send, Sync);
}
