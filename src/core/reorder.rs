//! Drag-to-reorder logic
//!
//! A gesture starts on a drag source, may hover over any number of items and
//! produces at most one [`Reorder`] when it ends with a drop.

/// Move the item at `from` so it ends up at `to` (remove, then insert).
///
/// Returns false and leaves `items` untouched when the indices are equal or
/// out of range.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from == to || from >= items.len() || to >= items.len() {
        return false;
    }
    let item = items.remove(from);
    items.insert(to, item);
    true
}

/// One ordering transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reorder {
    pub from: usize,
    pub to: usize,
}

/// State of the drag gesture in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragGesture {
    #[default]
    Idle,
    Dragging {
        source: usize,
        target: Option<usize>,
    },
}

impl DragGesture {
    pub fn start(&mut self, index: usize) {
        *self = DragGesture::Dragging {
            source: index,
            target: None,
        };
    }

    /// Pointer entered or moved over `index`. Returns true if the drop target changed.
    pub fn hover(&mut self, index: usize) -> bool {
        match self {
            DragGesture::Dragging { source, target } => {
                let next = (index != *source).then_some(index);
                if *target == next {
                    return false;
                }
                *target = next;
                true
            }
            DragGesture::Idle => false,
        }
    }

    /// Pointer left `index`
    pub fn leave(&mut self, index: usize) {
        if let DragGesture::Dragging { target, .. } = self
            && *target == Some(index)
        {
            *target = None;
        }
    }

    /// Gesture ended with a drop on `index`
    pub fn drop_on(&mut self, index: usize) -> Option<Reorder> {
        let reorder = match *self {
            DragGesture::Dragging { source, .. } if source != index => Some(Reorder {
                from: source,
                to: index,
            }),
            _ => None,
        };
        *self = DragGesture::Idle;
        reorder
    }

    /// Gesture ended anywhere else
    pub fn cancel(&mut self) {
        *self = DragGesture::Idle;
    }

    pub fn source(&self) -> Option<usize> {
        match self {
            DragGesture::Dragging { source, .. } => Some(*source),
            DragGesture::Idle => None,
        }
    }

    pub fn target(&self) -> Option<usize> {
        match self {
            DragGesture::Dragging { target, .. } => *target,
            DragGesture::Idle => None,
        }
    }
}
