/// Remember-forever slot for a derived value.
///
/// The first call to [`CacheState::get_or_try_init`] decides the outcome;
/// later calls replay it, including failures.
#[derive(Debug)]
pub(crate) enum CacheState<T, E> {
    Pending,
    Ready(T),
    Failed(E),
}

impl<T, E> Default for CacheState<T, E> {
    fn default() -> Self {
        CacheState::Pending
    }
}

impl<T, E: Clone> CacheState<T, E> {
    pub(crate) fn get_or_try_init(
        &mut self,
        init: impl FnOnce() -> Result<T, E>,
    ) -> Result<&T, E> {
        if let CacheState::Pending = self {
            *self = match init() {
                Ok(value) => CacheState::Ready(value),
                Err(err) => CacheState::Failed(err),
            };
        }
        match self {
            CacheState::Ready(value) => Ok(value),
            CacheState::Failed(err) => Err(err.clone()),
            CacheState::Pending => unreachable!("cache initialized above"),
        }
    }

    pub(crate) fn get(&self) -> Option<&T> {
        match self {
            CacheState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub(crate) fn is_pending(&self) -> bool {
        matches!(self, CacheState::Pending)
    }
}
