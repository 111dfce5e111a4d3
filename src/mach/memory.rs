/// ## Flat addressable memory
///
/// Cells are zeroed at creation. Addresses outside the memory never
/// touch a cell: loads read 0 and stores are dropped.

pub struct Memory {
    cells: Vec<i64>,
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let used = self.cells.iter().rposition(|&v| v != 0).map_or(0, |i| i + 1);
        write!(f, "{:?}", &self.cells[..used])
    }
}

impl Memory {
    pub fn new(size: usize) -> Memory {
        Memory {
            cells: vec![0; size],
        }
    }
    pub fn len(&self) -> usize {
        self.cells.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
    fn index(&self, address: i64) -> Option<usize> {
        if address >= 0 && (address as u64) < self.cells.len() as u64 {
            Some(address as usize)
        } else {
            None
        }
    }
    pub fn load(&self, address: i64) -> i64 {
        match self.index(address) {
            Some(i) => self.cells[i],
            None => 0,
        }
    }
    pub fn store(&mut self, address: i64, value: i64) {
        if let Some(i) = self.index(address) {
            self.cells[i] = value;
        }
    }
}
