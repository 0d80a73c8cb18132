/// Local state that is changed before the matching write is confirmed.
///
/// `apply` mutates the value, runs the write, and restores the pre-change
/// snapshot if the write fails.
#[derive(Debug, Clone, PartialEq)]
pub struct Optimistic<T: Clone> {
    value: T,
}

impl<T: Clone> Optimistic<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn into_inner(self) -> T {
        self.value
    }

    /// Replace the value outright, e.g. after reloading from storage.
    pub fn reset(&mut self, value: T) {
        self.value = value;
    }

    /// Change local state without any write behind it.
    pub fn update_local(&mut self, change: impl FnOnce(&mut T)) {
        change(&mut self.value);
    }

    pub fn apply<R, E>(
        &mut self,
        change: impl FnOnce(&mut T),
        persist: impl FnOnce(&T) -> Result<R, E>,
    ) -> Result<R, E> {
        let snapshot = self.value.clone();
        change(&mut self.value);
        match persist(&self.value) {
            Ok(result) => Ok(result),
            Err(e) => {
                self.value = snapshot;
                Err(e)
            }
        }
    }
}
