#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavigationState {
    /// No folder loaded. Startup fails if it cannot leave this state.
    #[default]
    Empty,
    /// Reading the file at the cursor; selection stays disarmed.
    Loading,
    Viewing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Current,
    Next,
}

impl Direction {
    pub const fn offset(self) -> isize {
        match self {
            Self::Previous => -1,
            Self::Current => 0,
            Self::Next => 1,
        }
    }
}

/// Index into a non-empty file list that wraps in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationCursor {
    index: usize,
    len: usize,
}

impl NavigationCursor {
    pub fn first(len: usize) -> Option<Self> {
        (len > 0).then_some(Self { index: 0, len })
    }

    pub const fn index(&self) -> usize {
        self.index
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub fn step(self, direction: Direction) -> Self {
        let len = self.len as isize;
        let index = (self.index as isize + direction.offset()).rem_euclid(len) as usize;
        Self { index, ..self }
    }
}
