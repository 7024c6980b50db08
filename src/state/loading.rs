// Loading state for async data.

/// Lifecycle of one asynchronously loaded value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadingState<T, E> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Error(E),
}

impl<T, E> LoadingState<T, E> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadingState::Loaded(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadingState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            LoadingState::Error(error) => Some(error),
            _ => None,
        }
    }
}
