/// Dense bit-per-cell grid used for walls, discovered floors and visibility results.
/// Index of (x, y) is `x + y * width` (row-major), stored in 64-bit words.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitGrid {
    width: i32,
    height: i32,
    words: Vec<u64>,
}

const WORD_BITS: usize = 64;

impl BitGrid {
    /// Create an empty grid (all cells cleared)
    pub fn new(width: i32, height: i32) -> Self {
        let cells = (width.max(0) as usize) * (height.max(0) as usize);
        BitGrid {
            width,
            height,
            words: vec![0; cells.div_ceil(WORD_BITS)],
        }
    }

    /// Create a grid with the given cells set
    pub fn with_cells(width: i32, height: i32, cells: &[(i32, i32)]) -> Self {
        let mut grid = Self::new(width, height);
        for &(x, y) in cells {
            if grid.in_bounds(x, y) {
                grid.set(x, y);
            }
        }
        grid
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Check if (x, y) lies inside the grid
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Convert (x, y) coordinates to cell index
    pub fn index(&self, x: i32, y: i32) -> usize {
        (x + y * self.width) as usize
    }

    /// Convert cell index to (x, y) coordinates
    pub fn coords(&self, index: usize) -> (i32, i32) {
        let index = index as i32;
        (index % self.width, index / self.width)
    }

    /// Mark a cell. Setting an already-set cell is a no-op.
    /// Callers are responsible for bounds; they already know the dimensions.
    pub fn set(&mut self, x: i32, y: i32) {
        let i = self.index(x, y);
        self.words[i / WORD_BITS] |= 1u64 << (i % WORD_BITS);
    }

    pub fn get(&self, x: i32, y: i32) -> bool {
        let i = self.index(x, y);
        (self.words[i / WORD_BITS] >> (i % WORD_BITS)) & 1 == 1
    }

    /// Number of set cells
    // https://graphics.stanford.edu/~seander/bithacks.html#CountBitsSetKernighan
    pub fn count(&self) -> usize {
        let mut count = 0;
        for &word in &self.words {
            let mut w = word;
            while w != 0 {
                w &= w - 1;
                count += 1;
            }
        }
        count
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Set positions in ascending row-major order
    pub fn iter(&self) -> BitGridIter<'_> {
        BitGridIter {
            grid: self,
            word_index: 0,
            current: self.words.first().copied().unwrap_or(0),
        }
    }

    /// Render as text rows, `#` for set cells
    pub fn to_text(&self) -> String {
        let mut result = String::new();
        for y in 0..self.height {
            for x in 0..self.width {
                result.push(if self.get(x, y) { '#' } else { ' ' });
            }
            result.push('\n');
        }
        result
    }
}

/// Lazy iterator over set cells of a [`BitGrid`]
pub struct BitGridIter<'a> {
    grid: &'a BitGrid,
    word_index: usize,
    /// Remaining bits of the current word
    current: u64,
}

impl Iterator for BitGridIter<'_> {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        while self.current == 0 {
            self.word_index += 1;
            if self.word_index >= self.grid.words.len() {
                return None;
            }
            self.current = self.grid.words[self.word_index];
        }

        let bit = self.current.trailing_zeros() as usize;
        self.current &= self.current - 1;
        Some(self.grid.coords(self.word_index * WORD_BITS + bit))
    }
}

impl<'a> IntoIterator for &'a BitGrid {
    type Item = (i32, i32);
    type IntoIter = BitGridIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
