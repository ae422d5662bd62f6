use std::collections::VecDeque;

/// Flatten any recursive structure breadth-first.
///
/// Starts from every item in `subjects`, yields each in turn, and queues
/// whatever `selector` returns for it. Nothing is read ahead of the item
/// being yielded.
pub fn unroll<S, I, F, C>(subjects: I, selector: F) -> Unroll<S, F>
where
    I: IntoIterator<Item = S>,
    F: FnMut(&S) -> C,
    C: IntoIterator<Item = S>,
{
    Unroll {
        queue: subjects.into_iter().collect(),
        selector,
    }
}

pub struct Unroll<S, F> {
    queue: VecDeque<S>,
    selector: F,
}

impl<S, F, C> Iterator for Unroll<S, F>
where
    F: FnMut(&S) -> C,
    C: IntoIterator<Item = S>,
{
    type Item = S;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.queue.pop_front()?;
        self.queue.extend((self.selector)(&item));
        Some(item)
    }
}
